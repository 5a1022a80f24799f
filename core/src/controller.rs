//! UI-state controller for the feed page.
//!
//! [`FeedController`] owns all mutable interaction state: the theme, every
//! registered post, the story viewer, the upload modal, the search panel,
//! the infinite-scroll guard and the live timer keys. Gestures and timer
//! fires go in, [`Effect`]s come out. Nothing here touches a DOM, so any
//! number of independent controllers can run side by side in tests.

use log::{debug, info, warn};

use crate::config::FeedConfig;
use crate::count::format_count;
use crate::effect::Effect;
use crate::post::{Comment, FollowId, PostId, PostSnapshot, PostState};
use crate::search_result::mock_results;
use crate::seed::{RandomSeeds, SeedSource};
use crate::task::{HeartId, Task, TaskRegistry, ToastId};
use crate::theme::Theme;

pub const UPLOAD_SUCCESS_MESSAGE: &'static str = "Post uploaded successfully! 🎉";
pub const SAVED_MESSAGE: &'static str = "Post saved to collection! 📌";
pub const UNSAVED_MESSAGE: &'static str = "Post removed from collection";

pub type Effects = Vec<Effect>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    pub mime: String,
}

impl FileInfo {
    pub fn new(name: &str, mime: &str) -> Self {
        FileInfo {
            name: name.to_owned(),
            mime: mime.to_owned(),
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub inner_height: f64,
    pub scroll_y: f64,
    pub body_height: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    /// An input or textarea currently has focus.
    pub editing: bool,
}

impl KeyPress {
    pub fn plain(key: &str) -> Self {
        KeyPress {
            key: key.to_owned(),
            ..KeyPress::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoryState {
    pub open: bool,
    pub progress: u8,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadState {
    pub open: bool,
    pub uploading: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Query waiting for the debounce window to pass.
    pub pending: Option<String>,
    /// Query the open results panel was rendered for.
    pub panel: Option<String>,
}

pub struct FeedController {
    config: FeedConfig,
    theme: Theme,
    posts: Vec<PostState>,
    follows: Vec<bool>,
    story: StoryState,
    upload: UploadState,
    search: SearchState,
    feed_loading: bool,
    tasks: TaskRegistry,
    next_heart: u64,
    next_toast: u64,
    seeds: Box<dyn SeedSource>,
}

impl FeedController {
    pub fn new(config: FeedConfig) -> Self {
        Self::with_seeds(config, Box::new(RandomSeeds::default()))
    }

    pub fn with_seeds(config: FeedConfig, seeds: Box<dyn SeedSource>) -> Self {
        FeedController {
            config,
            theme: Theme::default(),
            posts: Vec::new(),
            follows: Vec::new(),
            story: StoryState::default(),
            upload: UploadState::default(),
            search: SearchState::default(),
            feed_loading: false,
            tasks: TaskRegistry::default(),
            next_heart: 0,
            next_toast: 0,
            seeds,
        }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn post(&self, post: PostId) -> Option<&PostState> {
        self.posts.get(post.0)
    }

    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    pub fn is_following(&self, button: FollowId) -> Option<bool> {
        self.follows.get(button.0).copied()
    }

    pub fn story(&self) -> &StoryState {
        &self.story
    }

    pub fn upload(&self) -> &UploadState {
        &self.upload
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn is_feed_loading(&self) -> bool {
        self.feed_loading
    }

    pub fn tasks(&self) -> &TaskRegistry {
        &self.tasks
    }

    // theme

    /// Applies the persisted theme; call once before anything else.
    pub fn init_theme(&mut self, stored: Option<&str>) -> Effects {
        self.theme = Theme::from_stored(stored);
        debug!("initial theme {}", self.theme.as_str());

        vec![Effect::ApplyTheme(self.theme)]
    }

    pub fn toggle_theme(&mut self) -> Effects {
        self.theme = self.theme.toggled();
        debug!("theme switched to {}", self.theme.as_str());

        let mut out = vec![
            Effect::ApplyTheme(self.theme),
            Effect::PersistTheme(self.theme),
            Effect::BodyTransition(true),
        ];
        self.tasks.start(
            Task::ThemeTransition,
            self.config.theme_transition_ms,
            &mut out,
        );
        out
    }

    // posts

    pub fn register_post(&mut self, snapshot: &PostSnapshot) -> PostId {
        self.posts.push(PostState::from_snapshot(snapshot));
        PostId(self.posts.len() - 1)
    }

    pub fn toggle_like(&mut self, post: PostId) -> Effects {
        let (liked, likes) = match self.posts.get_mut(post.0) {
            Some(state) => {
                if state.liked {
                    state.likes = state.likes.saturating_sub(1);
                } else {
                    state.likes = state.likes.saturating_add(1);
                }
                state.liked = !state.liked;
                (state.liked, state.likes)
            }
            None => return unknown_post(post),
        };

        let mut out = vec![
            Effect::SetLiked { post, liked },
            Effect::SetLikeCount {
                post,
                text: format_count(likes),
            },
        ];
        if liked {
            let heart = self.next_heart_id();
            out.push(Effect::FloatingHeart { heart, post });
            self.tasks.start(
                Task::RemoveHeart(heart),
                self.config.floating_heart_ms,
                &mut out,
            );
        }
        out
    }

    /// Double activation on the media only ever likes.
    pub fn double_tap_media(&mut self, post: PostId) -> Effects {
        match self.posts.get(post.0) {
            Some(state) if !state.liked && state.has_media => {}
            Some(_) => return Vec::new(),
            None => return unknown_post(post),
        }

        let mut out = self.toggle_like(post);
        let heart = self.next_heart_id();
        out.push(Effect::BigHeart { heart, post });
        self.tasks
            .start(Task::RemoveHeart(heart), self.config.big_heart_ms, &mut out);
        out
    }

    pub fn comment_input(&mut self, post: PostId, text: &str) -> Effects {
        let state = match self.posts.get_mut(post.0) {
            Some(state) => state,
            None => return unknown_post(post),
        };
        state.draft = text.to_owned();

        vec![Effect::SetCommentSubmitEnabled {
            post,
            enabled: state.can_submit(),
        }]
    }

    /// Submits `text` (the input's current value) as a new comment.
    /// Whitespace-only text is ignored.
    pub fn submit_comment(&mut self, post: PostId, text: &str) -> Effects {
        let username = self.config.comment_username.clone();
        let state = match self.posts.get_mut(post.0) {
            Some(state) => state,
            None => return unknown_post(post),
        };

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        let comment = Comment {
            username,
            text: trimmed.to_owned(),
        };
        state.comments.push(comment.clone());
        state.draft.clear();
        debug!("comment added to post {}", post.0);

        vec![
            Effect::AppendComment { post, comment },
            Effect::ClearCommentInput { post },
            Effect::SetCommentSubmitEnabled {
                post,
                enabled: false,
            },
        ]
    }

    pub fn toggle_save(&mut self, post: PostId) -> Effects {
        let saved = match self.posts.get_mut(post.0) {
            Some(state) => {
                state.saved = !state.saved;
                state.saved
            }
            None => return unknown_post(post),
        };

        let mut out = vec![Effect::SetSaved { post, saved }];
        let message = if saved { SAVED_MESSAGE } else { UNSAVED_MESSAGE };
        out.extend(self.notify(message));
        out
    }

    // follow

    pub fn register_follow(&mut self, following: bool) -> FollowId {
        self.follows.push(following);
        FollowId(self.follows.len() - 1)
    }

    pub fn toggle_follow(&mut self, button: FollowId) -> Effects {
        match self.follows.get_mut(button.0) {
            Some(following) => {
                *following = !*following;
                vec![Effect::SetFollowing {
                    button,
                    following: *following,
                }]
            }
            None => {
                warn!("unknown follow button {}", button.0);
                Vec::new()
            }
        }
    }

    // upload

    pub fn open_upload(&mut self) -> Effects {
        if self.upload.open {
            return Vec::new();
        }
        self.upload.open = true;
        vec![Effect::SetUploadModalOpen(true)]
    }

    pub fn close_upload(&mut self) -> Effects {
        if !self.upload.open {
            return Vec::new();
        }
        self.upload.open = false;
        vec![Effect::SetUploadModalOpen(false)]
    }

    /// Click anywhere on the upload modal; only the backdrop itself closes it.
    pub fn upload_backdrop_click(&mut self, on_backdrop: bool) -> Effects {
        if on_backdrop {
            self.close_upload()
        } else {
            Vec::new()
        }
    }

    pub fn upload_drag(&mut self, over: bool) -> Effects {
        vec![Effect::UploadHighlight(over)]
    }

    /// Files picked or dropped. Only images start the simulated upload, and
    /// only one upload runs at a time.
    pub fn files_chosen(&mut self, files: &[FileInfo]) -> Effects {
        let images = files.iter().filter(|file| file.is_image()).count();
        if images == 0 {
            debug!("ignoring {} non-image file(s)", files.len());
            return Vec::new();
        }
        if self.upload.uploading {
            debug!("upload already in progress, ignoring {} file(s)", images);
            return Vec::new();
        }

        self.upload.uploading = true;
        info!("uploading {} image(s)", images);

        let mut out = vec![Effect::UploadLoading];
        self.tasks
            .start(Task::UploadFinish, self.config.upload_delay_ms, &mut out);
        out
    }

    // stories

    pub fn open_story(&mut self) -> Effects {
        let mut out = Vec::new();
        self.story.open = true;
        self.story.progress = 0;
        out.push(Effect::SetStoryModalOpen(true));
        out.push(Effect::SetStoryProgress(0));
        self.tasks
            .start_repeating(Task::StoryProgress, self.config.story_tick_ms, &mut out);
        out
    }

    /// Close control, backdrop or Escape: stop the timer and reset progress.
    pub fn close_story(&mut self) -> Effects {
        let mut out = Vec::new();
        self.tasks.stop(Task::StoryProgress, &mut out);
        if self.story.open {
            self.story.open = false;
            out.push(Effect::SetStoryModalOpen(false));
        }
        self.story.progress = 0;
        out.push(Effect::SetStoryProgress(0));
        out
    }

    pub fn story_backdrop_click(&mut self, on_backdrop: bool) -> Effects {
        if on_backdrop {
            self.close_story()
        } else {
            Vec::new()
        }
    }

    fn story_tick(&mut self) -> Effects {
        if !self.tasks.is_active(Task::StoryProgress) {
            debug!("story tick after stop");
            return Vec::new();
        }

        let progress = self.story.progress.saturating_add(self.config.story_step);
        self.story.progress = progress.min(100);

        let mut out = vec![Effect::SetStoryProgress(self.story.progress)];
        if self.story.progress >= 100 {
            self.tasks.stop(Task::StoryProgress, &mut out);
            self.story.open = false;
            self.story.progress = 0;
            out.push(Effect::SetStoryProgress(0));
            out.push(Effect::SetStoryModalOpen(false));
        }
        out
    }

    // search

    pub fn search_input(&mut self, text: &str) -> Effects {
        let mut out = Vec::new();
        self.tasks.stop(Task::SearchDebounce, &mut out);
        self.search.pending = None;

        let query = text.trim();
        if !query.is_empty() {
            self.search.pending = Some(query.to_owned());
            self.tasks.start(
                Task::SearchDebounce,
                self.config.search_debounce_ms,
                &mut out,
            );
        }
        out
    }

    pub fn search_focus(&mut self, text: &str) -> Effects {
        let query = text.trim();
        if query.is_empty() {
            return Vec::new();
        }
        self.show_results(query)
    }

    /// Document click. `inside` is true when the target is the search input
    /// or lies within the results panel.
    pub fn document_click(&mut self, inside: bool) -> Effects {
        if inside {
            Vec::new()
        } else {
            self.hide_results()
        }
    }

    fn show_results(&mut self, query: &str) -> Effects {
        let mut out = self.hide_results();
        self.search.panel = Some(query.to_owned());
        out.push(Effect::ShowSearchResults {
            query: query.to_owned(),
            entries: mock_results(query),
        });
        out
    }

    fn hide_results(&mut self) -> Effects {
        match self.search.panel.take() {
            Some(_) => vec![Effect::HideSearchResults],
            None => Vec::new(),
        }
    }

    // toasts

    /// Shows a toast. Concurrent toasts stack, each on its own timers.
    pub fn notify(&mut self, message: &str) -> Effects {
        let toast = ToastId(self.next_toast);
        self.next_toast += 1;

        let mut out = vec![Effect::ShowToast {
            toast,
            message: message.to_owned(),
        }];
        self.tasks.start(
            Task::ToastExit(toast),
            self.config.toast_display_ms,
            &mut out,
        );
        out
    }

    // infinite scroll

    pub fn scrolled(&mut self, metrics: ScrollMetrics) -> Effects {
        let reached = metrics.inner_height + metrics.scroll_y
            >= metrics.body_height - self.config.scroll_threshold_px;
        if !reached || self.feed_loading {
            return Vec::new();
        }

        self.feed_loading = true;
        debug!("loading more posts");

        let mut out = vec![Effect::ShowFeedLoading];
        self.tasks
            .start(Task::FeedLoad, self.config.scroll_load_delay_ms, &mut out);
        out
    }

    fn finish_feed_load(&mut self) -> Effects {
        self.feed_loading = false;

        let mut out = vec![Effect::RemoveFeedLoading];
        let template = match self.posts.first() {
            Some(first) => first.cloned_for_feed(),
            None => {
                warn!("no post to copy for infinite scroll");
                return out;
            }
        };

        self.posts.push(template);
        out.push(Effect::AppendPost {
            post: PostId(self.posts.len() - 1),
            template: PostId(0),
            seed: self.seeds.next_seed(),
        });
        out
    }

    // keyboard

    pub fn key_down(&mut self, key: &KeyPress) -> Effects {
        let mut out = Vec::new();

        if key.key == "Escape" {
            out.extend(self.close_upload());
            out.extend(self.close_story());
            out.extend(self.hide_results());
        }

        if (key.ctrl || key.meta) && key.key == "k" {
            out.push(Effect::FocusSearch);
        }

        if key.key == "n" && !key.ctrl && !key.meta && !key.editing {
            out.extend(self.open_upload());
        }

        out
    }

    // timers

    pub fn on_timer(&mut self, task: Task) -> Effects {
        if task == Task::StoryProgress {
            return self.story_tick();
        }
        if !self.tasks.finish(task) {
            return Vec::new();
        }

        match task {
            Task::ThemeTransition => vec![Effect::BodyTransition(false)],
            Task::RemoveHeart(heart) => vec![Effect::RemoveHeart(heart)],
            Task::UploadFinish => {
                self.upload.uploading = false;
                self.upload.open = false;
                let mut out = vec![Effect::SetUploadModalOpen(false), Effect::UploadPrompt];
                out.extend(self.notify(UPLOAD_SUCCESS_MESSAGE));
                out
            }
            Task::SearchDebounce => match self.search.pending.take() {
                Some(query) => {
                    info!("Searching for: {}", query);
                    self.show_results(&query)
                }
                None => Vec::new(),
            },
            Task::ToastExit(toast) => {
                let mut out = vec![Effect::ToastLeaving(toast)];
                self.tasks.start(
                    Task::ToastRemove(toast),
                    self.config.toast_exit_ms,
                    &mut out,
                );
                out
            }
            Task::ToastRemove(toast) => vec![Effect::RemoveToast(toast)],
            Task::FeedLoad => self.finish_feed_load(),
            Task::StoryProgress => Vec::new(),
        }
    }

    /// Cancels every pending task, e.g. before the page navigates away, and
    /// puts back any page state those tasks would have restored.
    pub fn teardown(&mut self) -> Effects {
        let mut out = self.close_story();
        self.tasks.stop_all(&mut out);
        self.search.pending = None;

        if self.upload.uploading {
            self.upload.uploading = false;
            out.push(Effect::UploadPrompt);
        }
        if self.feed_loading {
            self.feed_loading = false;
            out.push(Effect::RemoveFeedLoading);
        }
        out
    }

    fn next_heart_id(&mut self) -> HeartId {
        self.next_heart += 1;
        HeartId(self.next_heart)
    }
}

fn unknown_post(post: PostId) -> Effects {
    warn!("unknown post {}", post.0);
    Vec::new()
}
