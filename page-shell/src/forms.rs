use log::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, Event, HtmlButtonElement, HtmlElement, HtmlInputElement, HtmlTextAreaElement,
    MouseEvent, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::dom::{document, listen, query_all};
use crate::markup::{textarea_height, LOADING_CLASS, SPINNER_LABEL};

const ORIGINAL_TEXT_KEY: &str = "originalText";

pub(crate) fn install() -> Result<(), JsValue> {
    for form in query_all("form")? {
        let owner = form.clone();
        listen(&form, "submit", move |_: Event| {
            let button = owner
                .query_selector("button[type=\"submit\"], input[type=\"submit\"]")
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());
            if let Some(button) = button {
                if let Err(err) = set_loading(&button, true) {
                    debug!("loading state not applied: {err:?}");
                }
            }
        })?;
    }

    for button in query_all("[data-ajax]")? {
        let Ok(button) = button.dyn_into::<HtmlElement>() else {
            continue;
        };
        let target = button.clone();
        listen(&button, "click", move |_: MouseEvent| {
            if let Err(err) = set_loading(&target, true) {
                debug!("loading state not applied: {err:?}");
            }
        })?;
    }

    for area in query_all("textarea")? {
        let Ok(area) = area.dyn_into::<HtmlTextAreaElement>() else {
            continue;
        };
        fit_textarea(&area);
        let target = area.clone();
        listen(&area, "input", move |_: Event| fit_textarea(&target))?;
    }

    for anchor in query_all("a[href^=\"#\"]")? {
        let link = anchor.clone();
        listen(&anchor, "click", move |event: MouseEvent| {
            if let Some(target) = anchor_target(&link) {
                event.prevent_default();
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            }
        })?;
    }
    Ok(())
}

/// Disable a button and show a spinner, or put its original label back.
pub(crate) fn set_loading(button: &HtmlElement, loading: bool) -> Result<(), JsValue> {
    let dataset = button.dataset();
    if loading {
        set_disabled(button, true);
        if !button.class_list().contains(LOADING_CLASS) {
            dataset.set(ORIGINAL_TEXT_KEY, &button.inner_html())?;
        }
        button.set_inner_html(SPINNER_LABEL);
        button.class_list().add_1(LOADING_CLASS)?;
    } else {
        set_disabled(button, false);
        if let Some(original) = dataset.get(ORIGINAL_TEXT_KEY) {
            button.set_inner_html(&original);
        }
        button.class_list().remove_1(LOADING_CLASS)?;
    }
    Ok(())
}

fn set_disabled(el: &HtmlElement, disabled: bool) {
    if let Some(button) = el.dyn_ref::<HtmlButtonElement>() {
        button.set_disabled(disabled);
    } else if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.set_disabled(disabled);
    } else if disabled {
        let _ = el.set_attribute("disabled", "");
    } else {
        let _ = el.remove_attribute("disabled");
    }
}

fn fit_textarea(area: &HtmlTextAreaElement) {
    let style = area.style();
    let _ = style.set_property("height", "auto");
    let _ = style.set_property("height", &textarea_height(area.scroll_height()));
}

fn anchor_target(link: &Element) -> Option<Element> {
    let href = link.get_attribute("href")?;
    if href.len() <= 1 {
        return None;
    }
    // Not every fragment is a valid selector.
    document().ok()?.query_selector(&href).ok().flatten()
}
