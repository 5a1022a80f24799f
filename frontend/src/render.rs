//! Applies controller effects to the live document.

use std::rc::Rc;

use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use insta_feed_core::post::{seeded_avatar_url, seeded_media_url, seeded_username, Comment, PostId};
use insta_feed_core::search_result::SearchEntry;
use insta_feed_core::Effect;

use crate::bind;
use crate::dom::{self, BindError};
use crate::markup;
use crate::page::{Page, PostElements};
use crate::persisted;
use crate::shell::Shell;

impl Shell {
    pub fn apply(self: &Rc<Self>, effect: Effect) {
        if let Err(err) = self.try_apply(&effect) {
            warn!("could not apply {:?}: {:?}", effect, err);
        }
    }

    fn try_apply(self: &Rc<Self>, effect: &Effect) -> Result<(), BindError> {
        match effect {
            Effect::Schedule { task, delay_ms } => {
                self.timers.borrow_mut().schedule(*task, *delay_ms, false)
            }
            Effect::ScheduleRepeating { task, every_ms } => {
                self.timers.borrow_mut().schedule(*task, *every_ms, true)
            }
            Effect::Cancel(task) => self.timers.borrow_mut().cancel(*task),

            Effect::ApplyTheme(theme) => {
                let page = self.page.borrow();
                page.root.set_attribute("data-theme", theme.as_str())?;
                if let Some(icon) = page.dark_mode_toggle.query_selector("i")? {
                    icon.set_class_name(theme.icon_class());
                }
            }
            Effect::PersistTheme(theme) => {
                persisted::store_theme(self.storage.as_ref(), &self.theme_storage_key(), *theme)
            }
            Effect::BodyTransition(on) => {
                let style = self.page.borrow().body.style();
                if *on {
                    style.set_property("transition", markup::THEME_TRANSITION)?;
                } else {
                    style.remove_property("transition")?;
                }
            }

            Effect::SetLiked { post, liked } => {
                let page = self.page.borrow();
                let elements = post_elements(&page, *post)?;
                dom::set_solid_icon(&elements.like_icon, *liked)?;
                dom::set_class(&elements.like_btn, "liked", *liked)?;
            }
            Effect::SetLikeCount { post, text } => {
                let page = self.page.borrow();
                post_elements(&page, *post)?
                    .likes_count
                    .set_text_content(Some(text));
            }
            Effect::FloatingHeart { heart, post } => {
                let mut page = self.page.borrow_mut();
                let rect = post_elements(&page, *post)?
                    .like_btn
                    .get_bounding_client_rect();

                let element = styled_div(&page, markup::FLOATING_HEART_CSS)?;
                element.set_inner_html(markup::FLOATING_HEART);
                element.style().set_property("left", &format!("{}px", rect.left()))?;
                element.style().set_property("top", &format!("{}px", rect.top()))?;
                page.body.append_child(&element)?;
                page.hearts.insert(*heart, element.into());
            }
            Effect::BigHeart { heart, post } => {
                let mut page = self.page.borrow_mut();
                let container = post_elements(&page, *post)?
                    .media
                    .as_ref()
                    .and_then(|media| media.parent_element())
                    .ok_or_else(|| BindError::MissingElement(".post-image".to_owned()))?;

                let element = styled_div(&page, markup::BIG_HEART_CSS)?;
                element.set_inner_html(markup::BIG_HEART_HTML);
                container.append_child(&element)?;
                page.hearts.insert(*heart, element.into());
            }
            Effect::RemoveHeart(heart) => {
                let removed = self.page.borrow_mut().hearts.remove(heart);
                if let Some(element) = removed {
                    element.remove();
                }
            }

            Effect::SetCommentSubmitEnabled { post, enabled } => {
                let page = self.page.borrow();
                if let Some(button) = &post_elements(&page, *post)?.post_btn {
                    button.set_disabled(!*enabled);
                }
            }
            Effect::AppendComment { post, comment } => {
                let page = self.page.borrow();
                let list = post_elements(&page, *post)?
                    .comments
                    .clone()
                    .ok_or_else(|| BindError::MissingElement(".post-comments".to_owned()))?;

                let entry = comment_entry(&page, comment)?;
                list.append_child(&entry)?;

                let mut options = ScrollIntoViewOptions::new();
                options
                    .behavior(ScrollBehavior::Smooth)
                    .block(ScrollLogicalPosition::Nearest);
                entry.scroll_into_view_with_scroll_into_view_options(&options);
            }
            Effect::ClearCommentInput { post } => {
                let page = self.page.borrow();
                if let Some(input) = &post_elements(&page, *post)?.comment_input {
                    input.set_value("");
                }
            }

            Effect::SetUploadModalOpen(open) => {
                dom::set_class(&self.page.borrow().upload_modal, "active", *open)?
            }
            Effect::UploadHighlight(on) => {
                let style = self.page.borrow().upload_area.style();
                if *on {
                    style.set_property("border-color", markup::UPLOAD_HIGHLIGHT_BORDER)?;
                    style.set_property("background-color", markup::UPLOAD_HIGHLIGHT_BACKGROUND)?;
                } else {
                    style.remove_property("border-color")?;
                    style.remove_property("background-color")?;
                }
            }
            Effect::UploadLoading => self
                .page
                .borrow()
                .upload_area
                .set_inner_html(markup::UPLOAD_LOADING_HTML),
            Effect::UploadPrompt => {
                self.page
                    .borrow()
                    .upload_area
                    .set_inner_html(markup::UPLOAD_PROMPT_HTML);
                // the old select button went away with the loading markup
                bind::bind_select_button(self)?;
            }

            Effect::SetStoryModalOpen(open) => {
                dom::set_class(&self.page.borrow().stories_modal, "active", *open)?
            }
            Effect::SetStoryProgress(progress) => {
                self.page
                    .borrow()
                    .progress_bar
                    .style()
                    .set_property("width", &format!("{}%", progress))?;
            }

            Effect::ShowSearchResults { entries, .. } => {
                let mut page = self.page.borrow_mut();
                if let Some(stale) = page.search_panel.take() {
                    stale.remove();
                }

                let panel = page.document.create_element("div")?;
                panel.set_class_name("search-results");
                for entry in entries {
                    panel.append_child(&search_item(&page, entry)?.into())?;
                }
                page.search_bar.append_child(&panel)?;
                inject_style_once(&page, markup::SEARCH_STYLES_ID, markup::SEARCH_STYLES)?;
                page.search_panel = Some(panel);
            }
            Effect::HideSearchResults => {
                let removed = self.page.borrow_mut().search_panel.take();
                if let Some(panel) = removed {
                    panel.remove();
                }
            }
            Effect::FocusSearch => {
                // focus() dispatches the focus listener synchronously
                let input = self.page.borrow().search_input.clone();
                input.focus()?;
            }

            Effect::SetFollowing { button, following } => {
                let page = self.page.borrow();
                let element = page
                    .follow_buttons
                    .get(button.0)
                    .ok_or_else(|| BindError::MissingElement(".follow-btn".to_owned()))?;
                dom::set_class(element, "following", *following)?;
                element.set_text_content(Some(if *following { "Following" } else { "Follow" }));
            }
            Effect::SetSaved { post, saved } => {
                let page = self.page.borrow();
                if let Some(icon) = &post_elements(&page, *post)?.save_icon {
                    dom::set_solid_icon(icon, *saved)?;
                }
            }

            Effect::ShowToast { toast, message } => {
                let mut page = self.page.borrow_mut();
                let element = styled_div(&page, markup::TOAST_CSS)?;
                element.set_class_name("notification");
                element.set_text_content(Some(message));
                page.body.append_child(&element)?;
                page.toasts.insert(*toast, element);
            }
            Effect::ToastLeaving(toast) => {
                if let Some(element) = self.page.borrow().toasts.get(toast) {
                    element
                        .style()
                        .set_property("animation", markup::TOAST_EXIT_ANIMATION)?;
                }
            }
            Effect::RemoveToast(toast) => {
                let removed = self.page.borrow_mut().toasts.remove(toast);
                if let Some(element) = removed {
                    element.remove();
                }
            }

            Effect::ShowFeedLoading => {
                let mut page = self.page.borrow_mut();
                let element = styled_div(&page, markup::FEED_LOADING_CSS)?;
                element.set_class_name("loading-indicator");
                element.set_inner_html(markup::FEED_LOADING_HTML);
                page.feed.append_child(&element)?;
                if let Some(stale) = page.feed_loading.replace(element.into()) {
                    stale.remove();
                }
            }
            Effect::RemoveFeedLoading => {
                let removed = self.page.borrow_mut().feed_loading.take();
                if let Some(element) = removed {
                    element.remove();
                }
            }
            Effect::AppendPost {
                post,
                template,
                seed,
            } => {
                self.append_post(*post, *template, seed)?;
                bind::bind_post(self, *post)?;
            }
        }

        Ok(())
    }

    fn append_post(&self, post: PostId, template: PostId, seed: &str) -> Result<(), BindError> {
        let mut page = self.page.borrow_mut();

        let copy: Element = post_elements(&page, template)?
            .root
            .clone_node_with_deep(true)?
            .dyn_into()
            .map_err(|_| BindError::WrongElementType(".post".to_owned()))?;

        if let Some(avatar) = copy.query_selector(".user-avatar")? {
            avatar.set_attribute("src", &seeded_avatar_url(seed))?;
        }
        if let Some(media) = copy.query_selector(".post-image img")? {
            media.set_attribute("src", &seeded_media_url(seed))?;
        }
        if let Some(username) = copy.query_selector(".username")? {
            username.set_text_content(Some(&seeded_username(seed)));
        }

        let elements = PostElements::locate(copy)?;
        if let Some(input) = &elements.comment_input {
            input.set_value("");
        }
        if let Some(button) = &elements.post_btn {
            button.set_disabled(true);
        }

        page.feed.append_child(&elements.root)?;
        if page.posts.len() != post.0 {
            warn!("post {} appended at index {}", post.0, page.posts.len());
        }
        page.posts.push(elements);

        Ok(())
    }
}

fn post_elements(page: &Page, post: PostId) -> Result<&PostElements, BindError> {
    page.posts
        .get(post.0)
        .ok_or_else(|| BindError::MissingElement(format!(".post #{}", post.0)))
}

fn styled_div(page: &Page, css: &str) -> Result<HtmlElement, BindError> {
    let element: HtmlElement = dom::cast(page.document.create_element("div")?, "div")?;
    element.style().set_css_text(css);
    Ok(element)
}

fn span(page: &Page, class: &str, text: &str) -> Result<Element, BindError> {
    let element = page.document.create_element("span")?;
    element.set_class_name(class);
    element.set_text_content(Some(text));
    Ok(element)
}

fn comment_entry(page: &Page, comment: &Comment) -> Result<Element, BindError> {
    let entry = page.document.create_element("div")?;
    entry.set_class_name("comment fade-in");
    entry.append_child(&span(page, "username", &comment.username)?.into())?;
    entry.append_child(&span(page, "comment-text", &comment.text)?.into())?;
    Ok(entry)
}

fn search_item(page: &Page, entry: &SearchEntry) -> Result<Element, BindError> {
    let item = page.document.create_element("div")?;
    item.set_class_name("search-result-item");

    let avatar = page.document.create_element("img")?;
    avatar.set_attribute("src", &entry.avatar)?;
    avatar.set_attribute("alt", "User")?;
    item.append_child(&avatar)?;

    let names = page.document.create_element("div")?;
    let username = page.document.create_element("div")?;
    username.set_class_name("search-username");
    username.set_text_content(Some(&entry.username));
    let full_name = page.document.create_element("div")?;
    full_name.set_class_name("search-fullname");
    full_name.set_text_content(Some(&entry.full_name));
    names.append_child(&username)?;
    names.append_child(&full_name)?;
    item.append_child(&names)?;

    Ok(item)
}

pub fn inject_style_once(page: &Page, id: &str, css: &str) -> Result<(), BindError> {
    if page.document.get_element_by_id(id).is_some() {
        return Ok(());
    }

    let style = page.document.create_element("style")?;
    style.set_id(id);
    style.set_text_content(Some(css));
    match &page.head {
        Some(head) => head.append_child(&style)?,
        None => page.body.append_child(&style)?,
    };
    Ok(())
}
