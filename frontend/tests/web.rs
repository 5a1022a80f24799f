extern crate insta_feed_frontend;
extern crate wasm_bindgen_test;

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlInputElement, KeyboardEvent, KeyboardEventInit,
};

use insta_feed_core::controller::{FileInfo, ScrollMetrics};
use insta_feed_core::post::{seeded_avatar_url, seeded_media_url};
use insta_feed_core::{FeedConfig, Task};
use insta_feed_frontend::dom::BindError;
use insta_feed_frontend::{mount, persisted};

wasm_bindgen_test_configure!(run_in_browser);

const FIXTURE: &str = r#"
<nav>
  <div class="search-bar"><input id="searchInput" type="text"></div>
  <button id="uploadBtn">New</button>
  <button id="darkModeToggle"><i class="fas fa-moon"></i></button>
  <button id="heartBtn"></button>
</nav>
<div class="stories"><div class="story">a</div><div class="story">b</div></div>
<main class="feed">
  <article class="post">
    <header><img class="user-avatar" src="a.jpg"><span class="username">first_user</span></header>
    <div class="post-image"><img src="p.jpg"></div>
    <button class="like-btn"><i class="far fa-heart"></i></button>
    <button class="save-btn"><i class="far fa-bookmark"></i></button>
    <span class="likes-count">1,234</span>
    <div class="post-comments"></div>
    <div class="add-comment"><input type="text"><button class="post-btn" disabled>Post</button></div>
  </article>
</main>
<aside><button class="follow-btn">Follow</button></aside>
<div id="uploadModal" class="modal">
  <div class="modal-content">
    <span class="close-modal">x</span>
    <div class="upload-area">
      <p>Drag photos and videos here</p>
      <button class="select-btn">Select from computer</button>
    </div>
    <input type="file" id="fileInput" hidden>
  </div>
</div>
<div id="storiesModal" class="modal">
  <span class="close-stories">x</span>
  <div class="progress"><div class="progress-bar"></div></div>
</div>
"#;

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn fixture() -> Document {
    let document = document();
    document.body().unwrap().set_inner_html(FIXTURE);
    document
}

fn el(document: &Document, selector: &str) -> Element {
    document.query_selector(selector).unwrap().unwrap()
}

fn click(document: &Document, selector: &str) {
    el(document, selector).dyn_into::<HtmlElement>().unwrap().click();
}

fn post_at(document: &Document, index: u32) -> Element {
    document
        .query_selector_all(".feed .post")
        .unwrap()
        .get(index)
        .unwrap()
        .dyn_into()
        .unwrap()
}

fn within(parent: &Element, selector: &str) -> Element {
    parent.query_selector(selector).unwrap().unwrap()
}

fn count(document: &Document, selector: &str) -> u32 {
    document.query_selector_all(selector).unwrap().length()
}

fn press(document: &Document, key: &str) {
    let mut init = KeyboardEventInit::new();
    init.key(key);
    let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
    document.dispatch_event(&event).unwrap();
}

#[wasm_bindgen_test]
fn like_button_round_trip() {
    let document = fixture();
    mount(FeedConfig::default()).unwrap();

    click(&document, ".like-btn");
    assert_eq!(el(&document, ".likes-count").text_content().unwrap(), "1,235");
    assert!(el(&document, ".like-btn i").class_list().contains("fas"));
    assert!(el(&document, ".like-btn").class_list().contains("liked"));

    click(&document, ".like-btn");
    assert_eq!(el(&document, ".likes-count").text_content().unwrap(), "1,234");
    assert!(el(&document, ".like-btn i").class_list().contains("far"));
}

#[wasm_bindgen_test]
fn comment_is_appended_as_text() {
    let document = fixture();
    mount(FeedConfig::default()).unwrap();

    let input: HtmlInputElement = el(&document, ".add-comment input").dyn_into().unwrap();
    input.set_value("  <b>nice</b>  ");
    input.dispatch_event(&Event::new("input").unwrap()).unwrap();
    assert!(!el(&document, ".post-btn").has_attribute("disabled"));

    click(&document, ".post-btn");

    let comments = document.query_selector_all(".post-comments .comment").unwrap();
    assert_eq!(comments.length(), 1);
    assert_eq!(
        el(&document, ".comment .comment-text").text_content().unwrap(),
        "<b>nice</b>"
    );
    assert_eq!(
        el(&document, ".comment .username").text_content().unwrap(),
        "your_username"
    );
    assert_eq!(input.value(), "");
    assert!(el(&document, ".post-btn").has_attribute("disabled"));
}

#[wasm_bindgen_test]
fn theme_toggle_persists() {
    let document = fixture();
    let storage = persisted::get_local_storage().unwrap();
    storage.remove_item("theme").unwrap();
    mount(FeedConfig::default()).unwrap();

    let root = document.document_element().unwrap();
    assert_eq!(root.get_attribute("data-theme").as_deref(), Some("light"));

    click(&document, "#darkModeToggle");
    assert_eq!(root.get_attribute("data-theme").as_deref(), Some("dark"));
    assert_eq!(storage.get_item("theme").unwrap().as_deref(), Some("dark"));
    assert_eq!(el(&document, "#darkModeToggle i").class_name(), "fas fa-sun");

    fixture();
    mount(FeedConfig::default()).unwrap();
    assert_eq!(root.get_attribute("data-theme").as_deref(), Some("dark"));

    storage.remove_item("theme").unwrap();
}

#[wasm_bindgen_test]
fn follow_and_save_toggle() {
    let document = fixture();
    mount(FeedConfig::default()).unwrap();

    click(&document, ".follow-btn");
    assert_eq!(el(&document, ".follow-btn").text_content().unwrap(), "Following");
    click(&document, ".follow-btn");
    assert_eq!(el(&document, ".follow-btn").text_content().unwrap(), "Follow");

    click(&document, ".save-btn");
    assert!(el(&document, ".save-btn i").class_list().contains("fas"));
    assert_eq!(
        el(&document, ".notification").text_content().unwrap(),
        "Post saved to collection! 📌"
    );
}

#[wasm_bindgen_test]
fn upload_modal_opens_and_closes() {
    let document = fixture();
    mount(FeedConfig::default()).unwrap();
    let modal = el(&document, "#uploadModal");

    click(&document, "#uploadBtn");
    assert!(modal.class_list().contains("active"));

    click(&document, ".upload-area p");
    assert!(modal.class_list().contains("active"));

    click(&document, "#uploadModal");
    assert!(!modal.class_list().contains("active"));
}

#[wasm_bindgen_test]
fn escape_closes_story_and_resets_progress() {
    let document = fixture();
    mount(FeedConfig::default()).unwrap();
    let modal = el(&document, "#storiesModal");

    click(&document, ".story");
    assert!(modal.class_list().contains("active"));

    press(&document, "Escape");
    assert!(!modal.class_list().contains("active"));
    let bar: HtmlElement = el(&document, ".progress-bar").dyn_into().unwrap();
    assert_eq!(bar.style().get_property_value("width").unwrap(), "0%");
}

#[wasm_bindgen_test]
fn decorations_are_applied() {
    let document = fixture();
    mount(FeedConfig::default()).unwrap();

    assert!(document.query_selector("#heartBtn .notification-badge").unwrap().is_some());
    assert_eq!(
        el(&document, ".post-image img").get_attribute("loading").as_deref(),
        Some("lazy")
    );
    assert!(document.get_element_by_id("feed-animation-styles").is_some());
}

#[wasm_bindgen_test]
fn missing_hooks_fail_mount() {
    document().body().unwrap().set_inner_html("<main class=\"feed\"></main>");

    match mount(FeedConfig::default()) {
        Err(BindError::MissingElement(selector)) => assert_eq!(selector, "#searchInput"),
        Err(other) => panic!("unexpected error {:?}", other),
        Ok(_) => panic!("mounted without hooks"),
    }
}

#[wasm_bindgen_test]
fn scrolled_in_post_is_bound_on_its_own() {
    let document = fixture();
    let shell = mount(FeedConfig::default()).unwrap();

    let near_bottom = ScrollMetrics {
        inner_height: 800.0,
        scroll_y: 2300.0,
        body_height: 4000.0,
    };
    shell.dispatch(|c| c.scrolled(near_bottom));
    shell.dispatch(|c| c.scrolled(near_bottom));
    assert_eq!(count(&document, ".loading-indicator"), 1);

    shell.dispatch(|c| c.on_timer(Task::FeedLoad));
    assert_eq!(count(&document, ".loading-indicator"), 0);
    assert_eq!(count(&document, ".feed .post"), 2);

    let first = post_at(&document, 0);
    let copy = post_at(&document, 1);
    let username = within(&copy, ".username").text_content().unwrap();
    let seed = username.strip_prefix("user_").unwrap();
    assert!(!seed.is_empty());
    assert_eq!(
        within(&copy, ".user-avatar").get_attribute("src").unwrap(),
        seeded_avatar_url(seed)
    );
    assert_eq!(
        within(&copy, ".post-image img").get_attribute("src").unwrap(),
        seeded_media_url(seed)
    );
    assert_eq!(within(&first, ".username").text_content().unwrap(), "first_user");

    within(&copy, ".like-btn").dyn_into::<HtmlElement>().unwrap().click();
    assert_eq!(within(&copy, ".likes-count").text_content().unwrap(), "1,235");
    assert_eq!(within(&first, ".likes-count").text_content().unwrap(), "1,234");

    within(&first, ".like-btn").dyn_into::<HtmlElement>().unwrap().click();
    assert_eq!(within(&first, ".likes-count").text_content().unwrap(), "1,235");
    assert_eq!(within(&copy, ".likes-count").text_content().unwrap(), "1,235");
}

#[wasm_bindgen_test]
fn search_keeps_a_single_panel() {
    let document = fixture();
    let shell = mount(FeedConfig::default()).unwrap();

    shell.dispatch(|c| c.search_input("cat"));
    shell.dispatch(|c| c.on_timer(Task::SearchDebounce));
    shell.dispatch(|c| c.search_input("dog"));
    shell.dispatch(|c| c.on_timer(Task::SearchDebounce));

    assert_eq!(count(&document, ".search-results"), 1);
    assert_eq!(count(&document, "#search-styles"), 1);
    assert_eq!(
        el(&document, ".search-results .search-username").text_content().unwrap(),
        "user_dog"
    );
}

#[wasm_bindgen_test]
fn finished_upload_restores_the_prompt() {
    let document = fixture();
    let shell = mount(FeedConfig::default()).unwrap();

    click(&document, "#uploadBtn");
    shell.dispatch(|c| c.files_chosen(&[FileInfo::new("cat.png", "image/png")]));
    assert_eq!(count(&document, ".upload-area .select-btn"), 0);

    shell.dispatch(|c| c.on_timer(Task::UploadFinish));
    assert!(!el(&document, "#uploadModal").class_list().contains("active"));
    assert_eq!(count(&document, ".upload-area .select-btn"), 1);
    assert_eq!(
        el(&document, ".notification").text_content().unwrap(),
        "Post uploaded successfully! 🎉"
    );
}
