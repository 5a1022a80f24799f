extern crate console_error_panic_hook;
extern crate insta_feed_core;
extern crate log;
extern crate wasm_bindgen;
extern crate web_sys;

pub mod bind;
pub mod dom;
pub mod logger;
pub mod markup;
pub mod page;
pub mod persisted;
pub mod render;
pub mod shell;
pub mod timers;

use std::cell::RefCell;
use std::rc::Rc;

use log::info;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use insta_feed_core::FeedConfig;

use crate::dom::BindError;
use crate::shell::Shell;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    pub fn console_log(contents: &str);
}

thread_local! {
    static MOUNTED: RefCell<Option<Rc<Shell>>> = RefCell::new(None);
}

#[wasm_bindgen]
pub fn bootstrap() -> Result<(), JsValue> {
    bootstrap_with(FeedConfig::default())
}

/// Like [`bootstrap`], with a JSON object overriding the default timings.
#[wasm_bindgen]
pub fn bootstrap_with_config(json: &str) -> Result<(), JsValue> {
    let config =
        FeedConfig::from_json(json).map_err(|err| BindError::Config(format!("{:?}", err)))?;
    bootstrap_with(config)
}

/// Cancels every pending timer of the mounted page.
#[wasm_bindgen]
pub fn teardown() {
    MOUNTED.with(|mounted| {
        if let Some(shell) = mounted.borrow_mut().take() {
            shell.dispatch(|controller| controller.teardown());
        }
    });
}

fn bootstrap_with(config: FeedConfig) -> Result<(), JsValue> {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    logger::init(&config.log_level);

    let shell = mount(config)?;
    MOUNTED.with(|mounted| *mounted.borrow_mut() = Some(shell));

    info!("🚀 InstaClone initialized successfully!");
    Ok(())
}

/// Wires every feature onto the current document. The theme is applied
/// first so nothing renders in the wrong colors.
pub fn mount(config: FeedConfig) -> Result<Rc<Shell>, BindError> {
    let shell = Shell::new(config)?;

    bind::bind_theme(&shell)?;
    bind::bind_posts(&shell)?;
    bind::bind_upload(&shell)?;
    bind::bind_stories(&shell)?;
    bind::bind_search(&shell)?;
    bind::bind_follow_buttons(&shell)?;
    bind::bind_keyboard(&shell)?;
    bind::bind_scroll(&shell)?;
    decorate(&shell)?;

    Ok(shell)
}

/// Page-wide touches with no interaction state behind them.
fn decorate(shell: &Rc<Shell>) -> Result<(), BindError> {
    let page = shell.page.borrow();

    if let Some(heart_btn) = &page.heart_btn {
        let badge = page.document.create_element("div")?;
        badge.set_class_name("notification-badge");
        heart_btn.append_child(&badge)?;
    }

    for image in dom::all(&page.document, "img")? {
        image.set_attribute("loading", "lazy")?;
    }

    if let Some(root) = page.root.dyn_ref::<HtmlElement>() {
        root.style().set_property("scroll-behavior", "smooth")?;
    }

    render::inject_style_once(&page, markup::ANIMATION_STYLES_ID, markup::ANIMATION_STYLES)
}
