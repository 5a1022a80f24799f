//! Element lookup and listener helpers shared by the binders.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, Window};

#[derive(Debug)]
pub enum BindError {
    NoWindow,
    NoDocument,
    MissingElement(String),
    WrongElementType(String),
    Config(String),
    Js(String),
}

impl From<JsValue> for BindError {
    fn from(value: JsValue) -> Self {
        BindError::Js(format!("{:?}", value))
    }
}

impl From<BindError> for JsValue {
    fn from(err: BindError) -> Self {
        JsValue::from_str(&format!("{:?}", err))
    }
}

pub fn window() -> Result<Window, BindError> {
    web_sys::window().ok_or(BindError::NoWindow)
}

pub fn document() -> Result<Document, BindError> {
    window()?.document().ok_or(BindError::NoDocument)
}

pub fn require(document: &Document, selector: &str) -> Result<Element, BindError> {
    document
        .query_selector(selector)?
        .ok_or_else(|| BindError::MissingElement(selector.to_owned()))
}

pub fn require_in(parent: &Element, selector: &str) -> Result<Element, BindError> {
    parent
        .query_selector(selector)?
        .ok_or_else(|| BindError::MissingElement(selector.to_owned()))
}

pub fn optional_in(parent: &Element, selector: &str) -> Result<Option<Element>, BindError> {
    Ok(parent.query_selector(selector)?)
}

pub fn cast<T: JsCast>(element: Element, selector: &str) -> Result<T, BindError> {
    element
        .dyn_into::<T>()
        .map_err(|_| BindError::WrongElementType(selector.to_owned()))
}

pub fn require_as<T: JsCast>(document: &Document, selector: &str) -> Result<T, BindError> {
    cast(require(document, selector)?, selector)
}

pub fn require_in_as<T: JsCast>(parent: &Element, selector: &str) -> Result<T, BindError> {
    cast(require_in(parent, selector)?, selector)
}

pub fn all(document: &Document, selector: &str) -> Result<Vec<Element>, BindError> {
    let list = document.query_selector_all(selector)?;

    Ok((0..list.length())
        .filter_map(|index| list.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Attaches `handler` for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event_type: &str, handler: F) -> Result<(), BindError>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    closure.forget();

    Ok(())
}

pub fn set_class(element: &Element, class: &str, on: bool) -> Result<(), BindError> {
    let classes = element.class_list();
    if on {
        classes.add_1(class)?;
    } else {
        classes.remove_1(class)?;
    }
    Ok(())
}

/// Font Awesome solid (`fas`) vs regular (`far`) icon weight.
pub fn set_solid_icon(icon: &Element, solid: bool) -> Result<(), BindError> {
    set_class(icon, "fas", solid)?;
    set_class(icon, "far", !solid)
}

pub fn is_event_on(event: &Event, element: &Element) -> bool {
    let element: &EventTarget = element.as_ref();
    event.target().as_ref() == Some(element)
}
