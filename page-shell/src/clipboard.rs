use js_sys::{Function, Promise, Reflect};
use log::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlDocument, HtmlTextAreaElement};

use crate::dom::{document, js_message, window};

/// Copy through the async Clipboard API, falling back to a hidden textarea
/// and `execCommand("copy")` where that API is missing or refused.
pub(crate) async fn copy_text(text: &str) -> Result<(), JsValue> {
    match write_with_clipboard_api(text).await {
        Ok(()) => Ok(()),
        Err(err) => {
            debug!("clipboard API unavailable ({}), using fallback", js_message(&err));
            copy_with_textarea(text)
        }
    }
}

async fn write_with_clipboard_api(text: &str) -> Result<(), JsValue> {
    let navigator = window()?.navigator();
    // Looked up dynamically: insecure contexts have no `navigator.clipboard`.
    let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard"))?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err(JsValue::from_str("navigator.clipboard missing"));
    }
    let write = Reflect::get(&clipboard, &JsValue::from_str("writeText"))?.dyn_into::<Function>()?;
    let promise = write
        .call1(&clipboard, &JsValue::from_str(text))?
        .dyn_into::<Promise>()?;
    JsFuture::from(promise).await?;
    Ok(())
}

fn copy_with_textarea(text: &str) -> Result<(), JsValue> {
    let doc = document()?;
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    let area = doc
        .create_element("textarea")?
        .dyn_into::<HtmlTextAreaElement>()?;
    area.set_value(text);
    area.set_attribute("readonly", "")?;
    area.style().set_property("position", "fixed")?;
    area.style().set_property("opacity", "0")?;
    body.append_child(&area)?;
    area.select();

    let copied = doc
        .dyn_into::<HtmlDocument>()
        .map_err(|_| JsValue::from_str("not an HTML document"))
        .and_then(|html| html.exec_command("copy"));
    area.remove();

    match copied {
        Ok(true) => Ok(()),
        Ok(false) => Err(JsValue::from_str("copy command was rejected")),
        Err(err) => Err(err),
    }
}
