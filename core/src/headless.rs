//! Runs a [`FeedController`] without a browser.
//!
//! [`HeadlessPage`] is an in-memory stand-in for the page template that
//! applies effects the way the frontend applies them to the DOM, and
//! [`VirtualClock`] replaces `setTimeout`/`setInterval` with a clock that
//! only moves when told to.

use std::collections::{BTreeSet, HashMap};

use log::{debug, warn};

use crate::config::FeedConfig;
use crate::controller::{Effects, FeedController};
use crate::effect::Effect;
use crate::post::{
    seeded_avatar_url, seeded_media_url, seeded_username, Comment, PostId, PostSnapshot,
};
use crate::search_result::SearchEntry;
use crate::seed::SeedSource;
use crate::task::{HeartId, Task, ToastId};

struct Pending {
    due: u64,
    seq: u64,
    task: Task,
    every: Option<u32>,
}

#[derive(Default)]
pub struct VirtualClock {
    now: u64,
    seq: u64,
    pending: Vec<Pending>,
}

impl VirtualClock {
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_scheduled(&self, task: Task) -> bool {
        self.pending.iter().any(|pending| pending.task == task)
    }

    pub fn schedule(&mut self, task: Task, delay_ms: u32, every: Option<u32>) {
        if self.is_scheduled(task) {
            warn!("{:?} scheduled twice without a cancel", task);
            self.cancel(task);
        }
        self.seq += 1;
        self.pending.push(Pending {
            due: self.now + delay_ms as u64,
            seq: self.seq,
            task,
            every,
        });
    }

    pub fn cancel(&mut self, task: Task) {
        self.pending.retain(|pending| pending.task != task);
    }

    /// Pops the earliest task due at or before `until`, moving the clock to
    /// its deadline. Repeating tasks are re-armed.
    fn pop_due(&mut self, until: u64) -> Option<Task> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, pending)| pending.due <= until)
            .min_by_key(|(_, pending)| (pending.due, pending.seq))
            .map(|(index, _)| index)?;

        let fired = self.pending.remove(index);
        self.now = fired.due;

        if let Some(every) = fired.every {
            self.seq += 1;
            self.pending.push(Pending {
                due: fired.due + every.max(1) as u64,
                seq: self.seq,
                task: fired.task,
                every: fired.every,
            });
        }
        Some(fired.task)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadlessPost {
    pub username: String,
    pub avatar: String,
    pub media: String,
    pub liked: bool,
    pub likes_text: String,
    pub saved: bool,
    pub comments: Vec<Comment>,
    pub input: String,
    pub submit_enabled: bool,
}

impl HeadlessPost {
    pub fn from_snapshot(index: usize, snapshot: &PostSnapshot) -> Self {
        HeadlessPost {
            username: format!("user_{}", index),
            avatar: String::new(),
            media: String::new(),
            liked: snapshot.liked,
            likes_text: snapshot.likes_text.clone(),
            saved: snapshot.saved,
            comments: Vec::new(),
            input: String::new(),
            submit_enabled: false,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UploadArea {
    Prompt,
    Loading,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadlessToast {
    pub toast: ToastId,
    pub message: String,
    pub leaving: bool,
}

#[derive(Clone, Debug)]
pub struct HeadlessPage {
    pub storage: HashMap<String, String>,
    pub theme_attribute: Option<String>,
    pub theme_icon: String,
    pub body_transition: bool,
    pub posts: Vec<HeadlessPost>,
    pub following: Vec<bool>,
    pub hearts: BTreeSet<HeartId>,
    pub upload_open: bool,
    pub upload_highlight: bool,
    pub upload_area: UploadArea,
    pub story_open: bool,
    pub story_progress: u8,
    pub search_panels: Vec<(String, Vec<SearchEntry>)>,
    pub search_focused: bool,
    pub toasts: Vec<HeadlessToast>,
    pub feed_loading: usize,
    /// Highest number of results panels ever present at once.
    pub peak_search_panels: usize,
    /// Highest number of feed loading indicators ever present at once.
    pub peak_feed_loading: usize,
}

impl HeadlessPage {
    pub fn new(storage: HashMap<String, String>) -> Self {
        HeadlessPage {
            storage,
            theme_attribute: None,
            theme_icon: String::new(),
            body_transition: false,
            posts: Vec::new(),
            following: Vec::new(),
            hearts: BTreeSet::new(),
            upload_open: false,
            upload_highlight: false,
            upload_area: UploadArea::Prompt,
            story_open: false,
            story_progress: 0,
            search_panels: Vec::new(),
            search_focused: false,
            toasts: Vec::new(),
            feed_loading: 0,
            peak_search_panels: 0,
            peak_feed_loading: 0,
        }
    }

    fn post_mut(&mut self, post: PostId) -> Option<&mut HeadlessPost> {
        let found = self.posts.get_mut(post.0);
        if found.is_none() {
            warn!("effect for missing post {}", post.0);
        }
        found
    }

    pub fn apply(&mut self, config: &FeedConfig, effect: &Effect) {
        match effect {
            Effect::Schedule { .. } | Effect::ScheduleRepeating { .. } | Effect::Cancel(_) => {}

            Effect::ApplyTheme(theme) => {
                self.theme_attribute = Some(theme.as_str().to_owned());
                self.theme_icon = theme.icon_class().to_owned();
            }
            Effect::PersistTheme(theme) => {
                self.storage
                    .insert(config.theme_storage_key.clone(), theme.as_str().to_owned());
            }
            Effect::BodyTransition(on) => self.body_transition = *on,

            Effect::SetLiked { post, liked } => {
                if let Some(page_post) = self.post_mut(*post) {
                    page_post.liked = *liked;
                }
            }
            Effect::SetLikeCount { post, text } => {
                if let Some(page_post) = self.post_mut(*post) {
                    page_post.likes_text = text.clone();
                }
            }
            Effect::FloatingHeart { heart, .. } | Effect::BigHeart { heart, .. } => {
                self.hearts.insert(*heart);
            }
            Effect::RemoveHeart(heart) => {
                self.hearts.remove(heart);
            }

            Effect::SetCommentSubmitEnabled { post, enabled } => {
                if let Some(page_post) = self.post_mut(*post) {
                    page_post.submit_enabled = *enabled;
                }
            }
            Effect::AppendComment { post, comment } => {
                if let Some(page_post) = self.post_mut(*post) {
                    page_post.comments.push(comment.clone());
                }
            }
            Effect::ClearCommentInput { post } => {
                if let Some(page_post) = self.post_mut(*post) {
                    page_post.input.clear();
                }
            }

            Effect::SetUploadModalOpen(open) => self.upload_open = *open,
            Effect::UploadHighlight(on) => self.upload_highlight = *on,
            Effect::UploadLoading => self.upload_area = UploadArea::Loading,
            Effect::UploadPrompt => self.upload_area = UploadArea::Prompt,

            Effect::SetStoryModalOpen(open) => self.story_open = *open,
            Effect::SetStoryProgress(progress) => self.story_progress = *progress,

            Effect::ShowSearchResults { query, entries } => {
                self.search_panels.push((query.clone(), entries.clone()));
                self.peak_search_panels = self.peak_search_panels.max(self.search_panels.len());
            }
            Effect::HideSearchResults => {
                self.search_panels.pop();
            }
            Effect::FocusSearch => self.search_focused = true,

            Effect::SetFollowing { button, following } => {
                if let Some(slot) = self.following.get_mut(button.0) {
                    *slot = *following;
                }
            }
            Effect::SetSaved { post, saved } => {
                if let Some(page_post) = self.post_mut(*post) {
                    page_post.saved = *saved;
                }
            }

            Effect::ShowToast { toast, message } => self.toasts.push(HeadlessToast {
                toast: *toast,
                message: message.clone(),
                leaving: false,
            }),
            Effect::ToastLeaving(toast) => {
                for shown in self.toasts.iter_mut().filter(|shown| shown.toast == *toast) {
                    shown.leaving = true;
                }
            }
            Effect::RemoveToast(toast) => self.toasts.retain(|shown| shown.toast != *toast),

            Effect::ShowFeedLoading => {
                self.feed_loading += 1;
                self.peak_feed_loading = self.peak_feed_loading.max(self.feed_loading);
            }
            Effect::RemoveFeedLoading => self.feed_loading = self.feed_loading.saturating_sub(1),
            Effect::AppendPost {
                post,
                template,
                seed,
            } => {
                let mut copy = match self.posts.get(template.0) {
                    Some(source) => source.clone(),
                    None => {
                        warn!("template post {} missing", template.0);
                        return;
                    }
                };
                copy.username = seeded_username(seed);
                copy.avatar = seeded_avatar_url(seed);
                copy.media = seeded_media_url(seed);
                copy.input.clear();
                copy.submit_enabled = false;

                debug_assert_eq!(post.0, self.posts.len());
                self.posts.push(copy);
            }
        }
    }
}

/// A controller wired to a [`HeadlessPage`] and a [`VirtualClock`].
pub struct HeadlessApp {
    pub controller: FeedController,
    pub page: HeadlessPage,
    pub clock: VirtualClock,
    /// Every effect applied so far, in order.
    pub trace: Vec<Effect>,
    snapshots: Vec<PostSnapshot>,
    follows: Vec<bool>,
}

impl HeadlessApp {
    pub fn new(config: FeedConfig, seeds: Box<dyn SeedSource>) -> Self {
        Self::with_storage(config, seeds, HashMap::new())
    }

    pub fn with_storage(
        config: FeedConfig,
        seeds: Box<dyn SeedSource>,
        storage: HashMap<String, String>,
    ) -> Self {
        HeadlessApp {
            controller: FeedController::with_seeds(config, seeds),
            page: HeadlessPage::new(storage),
            clock: VirtualClock::default(),
            trace: Vec::new(),
            snapshots: Vec::new(),
            follows: Vec::new(),
        }
    }

    /// Page load: theme first, then posts and follow buttons in document order.
    pub fn load(&mut self, posts: &[PostSnapshot], follows: &[bool]) {
        let stored = self
            .page
            .storage
            .get(&self.controller.config().theme_storage_key)
            .cloned();
        let effects = self.controller.init_theme(stored.as_deref());
        self.apply_all(effects);

        for snapshot in posts {
            let post = self.controller.register_post(snapshot);
            self.page
                .posts
                .push(HeadlessPost::from_snapshot(post.0, snapshot));
        }
        for following in follows {
            self.controller.register_follow(*following);
            self.page.following.push(*following);
        }

        self.snapshots = posts.to_vec();
        self.follows = follows.to_vec();
    }

    /// A fresh page over the same storage and markup.
    pub fn reload(&self, seeds: Box<dyn SeedSource>) -> HeadlessApp {
        let mut app = HeadlessApp::with_storage(
            self.controller.config().clone(),
            seeds,
            self.page.storage.clone(),
        );
        app.load(&self.snapshots, &self.follows);
        app
    }

    pub fn dispatch<F>(&mut self, f: F) -> Effects
    where
        F: FnOnce(&mut FeedController) -> Effects,
    {
        let effects = f(&mut self.controller);
        self.apply_all(effects.clone());
        effects
    }

    /// Types into a post's comment input, one input event per call.
    pub fn type_comment(&mut self, post: PostId, text: &str) {
        if let Some(page_post) = self.page.posts.get_mut(post.0) {
            page_post.input = text.to_owned();
        }
        self.dispatch(|controller| controller.comment_input(post, text));
    }

    pub fn submit_comment(&mut self, post: PostId) -> Effects {
        let text = self
            .page
            .posts
            .get(post.0)
            .map(|page_post| page_post.input.clone())
            .unwrap_or_default();
        self.dispatch(|controller| controller.submit_comment(post, &text))
    }

    /// Moves the virtual clock forward, firing every task that comes due.
    pub fn advance(&mut self, ms: u64) {
        let until = self.clock.now() + ms;
        while let Some(task) = self.clock.pop_due(until) {
            debug!("t={} fire {:?}", self.clock.now(), task);
            let effects = self.controller.on_timer(task);
            self.apply_all(effects);
        }
        self.clock.now = until;
    }

    fn apply_all(&mut self, effects: Effects) {
        for effect in effects {
            match &effect {
                Effect::Schedule { task, delay_ms } => self.clock.schedule(*task, *delay_ms, None),
                Effect::ScheduleRepeating { task, every_ms } => {
                    self.clock.schedule(*task, *every_ms, Some(*every_ms))
                }
                Effect::Cancel(task) => self.clock.cancel(*task),
                _ => self.page.apply(self.controller.config(), &effect),
            }
            self.trace.push(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_fires_in_deadline_order() {
        let mut clock = VirtualClock::default();
        clock.schedule(Task::FeedLoad, 30, None);
        clock.schedule(Task::UploadFinish, 10, None);
        clock.schedule(Task::SearchDebounce, 10, None);

        assert_eq!(clock.pop_due(100), Some(Task::UploadFinish));
        assert_eq!(clock.pop_due(100), Some(Task::SearchDebounce));
        assert_eq!(clock.pop_due(100), Some(Task::FeedLoad));
        assert_eq!(clock.pop_due(100), None);
        assert_eq!(clock.now(), 30);
    }

    #[test]
    fn repeating_task_rearms() {
        let mut clock = VirtualClock::default();
        clock.schedule(Task::StoryProgress, 50, Some(50));

        assert_eq!(clock.pop_due(120), Some(Task::StoryProgress));
        assert_eq!(clock.pop_due(120), Some(Task::StoryProgress));
        assert_eq!(clock.pop_due(120), None);
        assert!(clock.is_scheduled(Task::StoryProgress));

        clock.cancel(Task::StoryProgress);
        assert_eq!(clock.pending(), 0);
    }
}
