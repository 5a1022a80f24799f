use std::collections::HashMap;

use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlImageElement, HtmlInputElement,
};

use insta_feed_core::post::PostSnapshot;
use insta_feed_core::task::{HeartId, ToastId};

use crate::dom::{self, BindError};

/// The hooks of one `.post` card.
#[derive(Clone)]
pub struct PostElements {
    pub root: Element,
    pub like_btn: HtmlElement,
    pub like_icon: Element,
    pub likes_count: Element,
    pub media: Option<HtmlImageElement>,
    pub comment_input: Option<HtmlInputElement>,
    pub post_btn: Option<HtmlButtonElement>,
    pub comments: Option<Element>,
    pub save_btn: Option<Element>,
    pub save_icon: Option<Element>,
}

impl PostElements {
    pub fn locate(root: Element) -> Result<Self, BindError> {
        let like_btn: HtmlElement = dom::require_in_as(&root, ".like-btn")?;
        let like_icon = dom::require_in(&like_btn, "i")?;
        let likes_count = dom::require_in(&root, ".likes-count")?;

        let media = match dom::optional_in(&root, ".post-image img")? {
            Some(img) => Some(dom::cast(img, ".post-image img")?),
            None => None,
        };
        let comment_input = match dom::optional_in(&root, ".add-comment input")? {
            Some(input) => Some(dom::cast(input, ".add-comment input")?),
            None => None,
        };
        let post_btn = match dom::optional_in(&root, ".post-btn")? {
            Some(button) => Some(dom::cast(button, ".post-btn")?),
            None => None,
        };
        let comments = dom::optional_in(&root, ".post-comments")?;
        let save_btn = dom::optional_in(&root, ".save-btn")?;
        let save_icon = match &save_btn {
            Some(button) => dom::optional_in(button, "i")?,
            None => None,
        };

        Ok(PostElements {
            root,
            like_btn,
            like_icon,
            likes_count,
            media,
            comment_input,
            post_btn,
            comments,
            save_btn,
            save_icon,
        })
    }

    pub fn snapshot(&self) -> PostSnapshot {
        PostSnapshot {
            likes_text: self.likes_count.text_content().unwrap_or_default(),
            liked: self.like_icon.class_list().contains("fas"),
            saved: self
                .save_icon
                .as_ref()
                .map(|icon| icon.class_list().contains("fas"))
                .unwrap_or(false),
            has_media: self.media.is_some(),
        }
    }
}

/// Every page-template hook plus the elements created at runtime.
pub struct Page {
    pub document: Document,
    pub root: Element,
    pub body: HtmlElement,
    pub head: Option<Element>,
    pub upload_btn: Element,
    pub upload_modal: Element,
    pub close_modal: Element,
    pub file_input: HtmlInputElement,
    pub upload_area: HtmlElement,
    pub dark_mode_toggle: Element,
    pub stories_modal: Element,
    pub close_stories: Element,
    pub progress_bar: HtmlElement,
    pub search_input: HtmlInputElement,
    pub search_bar: Element,
    pub feed: Element,
    pub heart_btn: Option<Element>,

    pub posts: Vec<PostElements>,
    pub follow_buttons: Vec<Element>,
    pub hearts: HashMap<HeartId, Element>,
    pub toasts: HashMap<ToastId, HtmlElement>,
    pub search_panel: Option<Element>,
    pub feed_loading: Option<Element>,
}

impl Page {
    pub fn locate(document: Document) -> Result<Self, BindError> {
        let root = document
            .document_element()
            .ok_or_else(|| BindError::MissingElement("html".to_owned()))?;
        let body = document
            .body()
            .ok_or_else(|| BindError::MissingElement("body".to_owned()))?;
        let head = document.head().map(Into::into);

        let search_input: HtmlInputElement = dom::require_as(&document, "#searchInput")?;
        let search_bar = search_input
            .closest(".search-bar")?
            .ok_or_else(|| BindError::MissingElement(".search-bar".to_owned()))?;

        Ok(Page {
            upload_btn: dom::require(&document, "#uploadBtn")?,
            upload_modal: dom::require(&document, "#uploadModal")?,
            close_modal: dom::require(&document, ".close-modal")?,
            file_input: dom::require_as(&document, "#fileInput")?,
            upload_area: dom::require_as(&document, ".upload-area")?,
            dark_mode_toggle: dom::require(&document, "#darkModeToggle")?,
            stories_modal: dom::require(&document, "#storiesModal")?,
            close_stories: dom::require(&document, ".close-stories")?,
            progress_bar: dom::require_as(&document, ".progress-bar")?,
            feed: dom::require(&document, ".feed")?,
            heart_btn: document.query_selector("#heartBtn")?,
            search_input,
            search_bar,
            root,
            body,
            head,
            document,
            posts: Vec::new(),
            follow_buttons: Vec::new(),
            hearts: HashMap::new(),
            toasts: HashMap::new(),
            search_panel: None,
            feed_loading: None,
        })
    }
}
