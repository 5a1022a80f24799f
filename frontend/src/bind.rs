//! Listener wiring, one function per feature.
//!
//! Binders only translate DOM events into controller calls; all state
//! changes come back as effects through [`Shell::dispatch`].

use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Element, Event, FileList, HtmlElement, KeyboardEvent, Node};

use insta_feed_core::controller::{FileInfo, KeyPress, ScrollMetrics};
use insta_feed_core::post::PostId;

use crate::dom::{self, BindError};
use crate::page::PostElements;
use crate::persisted;
use crate::shell::Shell;

pub fn bind_theme(shell: &Rc<Shell>) -> Result<(), BindError> {
    let key = shell.theme_storage_key();
    let stored = persisted::load_theme(shell.storage.as_ref(), &key);
    shell.dispatch(|controller| controller.init_theme(stored.as_deref()));

    let toggle = shell.page.borrow().dark_mode_toggle.clone();
    let shell = shell.clone();
    dom::listen(&toggle, "click", move |_event| {
        shell.dispatch(|controller| controller.toggle_theme());
    })
}

/// Registers every `.post` present at load.
pub fn bind_posts(shell: &Rc<Shell>) -> Result<(), BindError> {
    let document = shell.page.borrow().document.clone();

    for root in dom::all(&document, ".post")? {
        let elements = PostElements::locate(root)?;
        let post = shell
            .controller
            .borrow_mut()
            .register_post(&elements.snapshot());
        shell.page.borrow_mut().posts.push(elements);
        bind_post(shell, post)?;
    }
    Ok(())
}

/// Binds the like, comment and save controls of a single post.
pub fn bind_post(shell: &Rc<Shell>, post: PostId) -> Result<(), BindError> {
    let elements = shell
        .page
        .borrow()
        .posts
        .get(post.0)
        .cloned()
        .ok_or_else(|| BindError::MissingElement(format!(".post #{}", post.0)))?;

    let on_like = shell.clone();
    dom::listen(&elements.like_btn, "click", move |_event| {
        on_like.dispatch(|controller| controller.toggle_like(post));
    })?;

    if let Some(media) = &elements.media {
        let on_double = shell.clone();
        dom::listen(media, "dblclick", move |_event| {
            on_double.dispatch(|controller| controller.double_tap_media(post));
        })?;
    }

    if let Some(input) = &elements.comment_input {
        let on_input = shell.clone();
        let typed = input.clone();
        dom::listen(input, "input", move |_event| {
            let text = typed.value();
            on_input.dispatch(|controller| controller.comment_input(post, &text));
        })?;

        let on_enter = shell.clone();
        let typed = input.clone();
        dom::listen(input, "keypress", move |event| {
            let enter = event
                .dyn_ref::<KeyboardEvent>()
                .map(|key| key.key() == "Enter")
                .unwrap_or(false);
            if enter {
                let text = typed.value();
                on_enter.dispatch(|controller| controller.submit_comment(post, &text));
            }
        })?;

        if let Some(button) = &elements.post_btn {
            let on_submit = shell.clone();
            let typed = input.clone();
            dom::listen(button, "click", move |_event| {
                let text = typed.value();
                on_submit.dispatch(|controller| controller.submit_comment(post, &text));
            })?;
        }
    }

    if let Some(button) = &elements.save_btn {
        let on_save = shell.clone();
        dom::listen(button, "click", move |_event| {
            on_save.dispatch(|controller| controller.toggle_save(post));
        })?;
    }

    debug!("bound post {}", post.0);
    Ok(())
}

pub fn bind_upload(shell: &Rc<Shell>) -> Result<(), BindError> {
    let (upload_btn, close_modal, modal, file_input, area) = {
        let page = shell.page.borrow();
        (
            page.upload_btn.clone(),
            page.close_modal.clone(),
            page.upload_modal.clone(),
            page.file_input.clone(),
            page.upload_area.clone(),
        )
    };

    let on_open = shell.clone();
    dom::listen(&upload_btn, "click", move |_event| {
        on_open.dispatch(|controller| controller.open_upload());
    })?;

    let on_close = shell.clone();
    dom::listen(&close_modal, "click", move |_event| {
        on_close.dispatch(|controller| controller.close_upload());
    })?;

    let on_backdrop = shell.clone();
    let backdrop = modal.clone();
    dom::listen(&modal, "click", move |event| {
        let hit = dom::is_event_on(&event, &backdrop);
        on_backdrop.dispatch(|controller| controller.upload_backdrop_click(hit));
    })?;

    bind_select_button(shell)?;

    let on_change = shell.clone();
    let picker = file_input.clone();
    dom::listen(&file_input, "change", move |_event| {
        let files = file_infos(picker.files());
        on_change.dispatch(|controller| controller.files_chosen(&files));
    })?;

    let on_over = shell.clone();
    dom::listen(&area, "dragover", move |event| {
        event.prevent_default();
        on_over.dispatch(|controller| controller.upload_drag(true));
    })?;

    let on_leave = shell.clone();
    dom::listen(&area, "dragleave", move |event| {
        event.prevent_default();
        on_leave.dispatch(|controller| controller.upload_drag(false));
    })?;

    let on_drop = shell.clone();
    dom::listen(&area, "drop", move |event| {
        event.prevent_default();
        let files = event
            .dyn_ref::<DragEvent>()
            .and_then(|drag| drag.data_transfer())
            .map(|transfer| file_infos(transfer.files()))
            .unwrap_or_default();
        on_drop.dispatch(|controller| {
            let mut effects = controller.files_chosen(&files);
            effects.extend(controller.upload_drag(false));
            effects
        });
    })
}

/// The visible button that opens the hidden file picker. Called again
/// whenever the upload prompt markup is restored.
pub fn bind_select_button(shell: &Rc<Shell>) -> Result<(), BindError> {
    let (area, file_input) = {
        let page = shell.page.borrow();
        (page.upload_area.clone(), page.file_input.clone())
    };

    match dom::optional_in(&area, ".select-btn")? {
        Some(button) => dom::listen(&button, "click", move |_event| file_input.click()),
        None => {
            warn!("upload prompt has no select button");
            Ok(())
        }
    }
}

fn file_infos(files: Option<FileList>) -> Vec<FileInfo> {
    let files = match files {
        Some(files) => files,
        None => return Vec::new(),
    };

    (0..files.length())
        .filter_map(|index| files.get(index))
        .map(|file| FileInfo {
            name: file.name(),
            mime: file.type_(),
        })
        .collect()
}

pub fn bind_stories(shell: &Rc<Shell>) -> Result<(), BindError> {
    let (document, modal, close) = {
        let page = shell.page.borrow();
        (
            page.document.clone(),
            page.stories_modal.clone(),
            page.close_stories.clone(),
        )
    };

    for story in dom::all(&document, ".story")? {
        let on_open = shell.clone();
        dom::listen(&story, "click", move |_event| {
            on_open.dispatch(|controller| controller.open_story());
        })?;
    }

    let on_close = shell.clone();
    dom::listen(&close, "click", move |_event| {
        on_close.dispatch(|controller| controller.close_story());
    })?;

    let on_backdrop = shell.clone();
    let backdrop = modal.clone();
    dom::listen(&modal, "click", move |event| {
        let hit = dom::is_event_on(&event, &backdrop);
        on_backdrop.dispatch(|controller| controller.story_backdrop_click(hit));
    })
}

pub fn bind_search(shell: &Rc<Shell>) -> Result<(), BindError> {
    let (document, input) = {
        let page = shell.page.borrow();
        (page.document.clone(), page.search_input.clone())
    };

    let on_input = shell.clone();
    let typed = input.clone();
    dom::listen(&input, "input", move |_event| {
        let text = typed.value();
        on_input.dispatch(|controller| controller.search_input(&text));
    })?;

    let on_focus = shell.clone();
    let typed = input.clone();
    dom::listen(&input, "focus", move |_event| {
        let text = typed.value();
        on_focus.dispatch(|controller| controller.search_focus(&text));
    })?;

    let on_click = shell.clone();
    dom::listen(&document, "click", move |event| {
        let inside = is_inside_search(&event, &input);
        on_click.dispatch(|controller| controller.document_click(inside));
    })
}

fn is_inside_search(event: &Event, input: &HtmlElement) -> bool {
    let target = match event.target() {
        Some(target) => target,
        None => return false,
    };

    let in_input = target
        .dyn_ref::<Node>()
        .map(|node| input.contains(Some(node)))
        .unwrap_or(false);
    let in_panel = target
        .dyn_ref::<Element>()
        .and_then(|element| element.closest(".search-results").ok().flatten())
        .is_some();

    in_input || in_panel
}

pub fn bind_follow_buttons(shell: &Rc<Shell>) -> Result<(), BindError> {
    let document = shell.page.borrow().document.clone();

    for button in dom::all(&document, ".follow-btn")? {
        let following = button.class_list().contains("following");
        let id = shell.controller.borrow_mut().register_follow(following);
        shell.page.borrow_mut().follow_buttons.push(button.clone());

        let on_click = shell.clone();
        dom::listen(&button, "click", move |_event| {
            on_click.dispatch(|controller| controller.toggle_follow(id));
        })?;
    }
    Ok(())
}

pub fn bind_keyboard(shell: &Rc<Shell>) -> Result<(), BindError> {
    let document = shell.page.borrow().document.clone();

    let on_key = shell.clone();
    let focus_owner = document.clone();
    dom::listen(&document, "keydown", move |event| {
        let key = match event.dyn_ref::<KeyboardEvent>() {
            Some(key) => key,
            None => return,
        };

        let editing = focus_owner
            .active_element()
            .map(|element| {
                let tag = element.tag_name();
                tag == "INPUT" || tag == "TEXTAREA"
            })
            .unwrap_or(false);
        let press = KeyPress {
            key: key.key(),
            ctrl: key.ctrl_key(),
            meta: key.meta_key(),
            editing,
        };

        // keep the browser's own Ctrl/Cmd+K binding out of the way
        if (press.ctrl || press.meta) && press.key == "k" {
            event.prevent_default();
        }
        on_key.dispatch(|controller| controller.key_down(&press));
    })
}

pub fn bind_scroll(shell: &Rc<Shell>) -> Result<(), BindError> {
    let window = dom::window()?;

    let on_scroll = shell.clone();
    let viewport = window.clone();
    dom::listen(&window, "scroll", move |_event| {
        let body_height = on_scroll.page.borrow().body.offset_height() as f64;
        let metrics = ScrollMetrics {
            inner_height: viewport
                .inner_height()
                .ok()
                .and_then(|height| height.as_f64())
                .unwrap_or(0.0),
            scroll_y: viewport.scroll_y().unwrap_or(0.0),
            body_height,
        };
        on_scroll.dispatch(|controller| controller.scrolled(metrics));
    })
}
