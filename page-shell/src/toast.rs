use gloo_timers::callback::Timeout;
use log::debug;
use sentiment_core::ToastKind;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, MouseEvent};

use crate::dom::{document, listen};

/// Floating notification in the top-right corner, removed after
/// `duration_ms` or when its close button is clicked.
pub(crate) fn show(message: &str, kind: ToastKind, duration_ms: u32) -> Result<(), JsValue> {
    let doc = document()?;
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;

    let toast = doc.create_element("div")?.dyn_into::<HtmlElement>()?;
    toast.set_class_name(&kind.container_class());
    toast.style().set_property("z-index", "9999")?;
    toast.set_attribute("role", "alert")?;

    let header = doc.create_element("div")?;
    header.set_class_name("toast-header glass-card");

    let icon = doc.create_element("i")?;
    icon.set_class_name(&kind.icon_class());
    header.append_child(&icon)?;

    let title = doc.create_element("strong")?;
    title.set_class_name("me-auto");
    title.set_text_content(Some(&kind.title()));
    header.append_child(&title)?;

    let close = doc.create_element("button")?;
    close.set_attribute("type", "button")?;
    close.set_class_name("btn-close");
    close.set_attribute("aria-label", "Close")?;
    header.append_child(&close)?;

    let content = doc.create_element("div")?;
    content.set_class_name("toast-body glass-card");
    content.set_text_content(Some(message));

    toast.append_child(&header)?;
    toast.append_child(&content)?;
    body.append_child(&toast)?;

    {
        let toast = toast.clone();
        listen(&close, "click", move |_: MouseEvent| dismiss(&toast))?;
    }

    Timeout::new(duration_ms, move || dismiss(&toast)).forget();
    debug!("{} toast shown", kind.as_str());
    Ok(())
}

fn dismiss(toast: &Element) {
    if toast.parent_node().is_some() {
        toast.remove();
    }
}
