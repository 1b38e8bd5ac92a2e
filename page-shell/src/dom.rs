use log::debug;
use sentiment_core::{KeyValueStore, StorageError};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlInputElement, HtmlTextAreaElement, Storage, Window};

pub(crate) fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub(crate) fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub(crate) fn query_all(selector: &str) -> Result<Vec<Element>, JsValue> {
    let list = document()?.query_selector_all(selector)?;
    let mut out = Vec::with_capacity(list.length() as usize);
    for i in 0..list.length() {
        if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            out.push(el);
        }
    }
    Ok(out)
}

/// Look up `#id` as `T`; absent or mismatched elements yield None.
pub(crate) fn by_id<T: JsCast>(id: &str) -> Option<T> {
    let element = document().ok()?.get_element_by_id(id);
    match element.map(|el| el.dyn_into::<T>()) {
        Some(Ok(el)) => Some(el),
        Some(Err(_)) => {
            debug!("#{id} has an unexpected element type");
            None
        }
        None => {
            debug!("#{id} not on this page");
            None
        }
    }
}

/// Attach a listener for the lifetime of the page.
pub(crate) fn listen<E, F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let mut handler = handler;
    let closure = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |event: Event| {
        handler(event.unchecked_into::<E>());
    }));
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// `.value` of an `<input>` or `<textarea>`.
pub(crate) fn field_value(el: &Element) -> Option<String> {
    if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        Some(area.value())
    } else {
        el.dyn_ref::<HtmlInputElement>().map(HtmlInputElement::value)
    }
}

pub(crate) fn set_field_value(el: &Element, value: &str) {
    if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(value);
    } else if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    }
}

// ---------- Persistence: localStorage ---------------------------------------

/// `window.localStorage` behind the shared store trait. Private browsing and
/// disabled storage surface as `StorageError::Unavailable`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage(&self) -> Result<Storage, StorageError> {
        let window = web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".into()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(js_message(&e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage unavailable".into()))
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(js_message(&e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write(js_message(&e)))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Write(js_message(&e)))
    }
}

pub(crate) fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}
