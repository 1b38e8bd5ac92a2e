use gloo_timers::callback::Timeout;
use log::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    DragEvent, Element, Event, EventInit, EventTarget, File, HtmlElement, HtmlInputElement,
    MouseEvent, Node,
};

use crate::dom::{document, listen, query_all};
use crate::markup::{FileSummary, DRAG_OVER_CLASS, UPLOAD_PULSE_ANIMATION, UPLOAD_PULSE_MS};

/// Wire every upload area on the page. Areas without a file input are skipped.
pub(crate) fn install(selector: &str) -> Result<usize, JsValue> {
    let mut bound = 0;
    for area in query_all(selector)? {
        let Some(input) = area
            .query_selector("input[type=\"file\"]")?
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            debug!("upload area without a file input");
            continue;
        };
        bind_area(area, input)?;
        bound += 1;
    }
    if bound > 0 {
        // A file dropped beside the zone must not navigate away.
        let body = document()?
            .body()
            .ok_or_else(|| JsValue::from_str("no body"))?;
        for name in ["dragover", "drop"] {
            listen(&body, name, |event: DragEvent| event.prevent_default())?;
        }
    }
    Ok(bound)
}

fn bind_area(area: Element, input: HtmlInputElement) -> Result<(), JsValue> {
    {
        let input = input.clone();
        listen(&area, "click", move |event: MouseEvent| {
            // The input lives inside the area; its own click bubbles back here.
            let own: &EventTarget = input.as_ref();
            if event.target().as_ref() == Some(own) {
                return;
            }
            input.click();
        })?;
    }
    {
        let zone = area.clone();
        listen(&area, "dragover", move |event: DragEvent| {
            event.prevent_default();
            let _ = zone.class_list().add_1(DRAG_OVER_CLASS);
        })?;
    }
    {
        let zone = area.clone();
        listen(&area, "dragleave", move |event: DragEvent| {
            event.prevent_default();
            let entered = event
                .related_target()
                .and_then(|t| t.dyn_into::<Node>().ok());
            if !zone.contains(entered.as_ref()) {
                let _ = zone.class_list().remove_1(DRAG_OVER_CLASS);
            }
        })?;
    }
    {
        let zone = area.clone();
        let input = input.clone();
        listen(&area, "drop", move |event: DragEvent| {
            event.prevent_default();
            event.stop_propagation();
            let _ = zone.class_list().remove_1(DRAG_OVER_CLASS);
            let Some(files) = event.data_transfer().and_then(|dt| dt.files()) else {
                return;
            };
            if files.length() == 0 {
                return;
            }
            input.set_files(Some(&files));
            if let Err(err) = notify_change(&input) {
                debug!("change dispatch after drop failed: {err:?}");
            }
        })?;
    }
    {
        let zone = area.clone();
        let field = input.clone();
        listen(&input, "change", move |_: Event| {
            let first = field.files().and_then(|files| files.get(0));
            if let Some(file) = first {
                if let Err(err) = show_file(&zone, &file) {
                    debug!("upload display not updated: {err:?}");
                }
            }
        })?;
    }
    Ok(())
}

fn notify_change(input: &HtmlInputElement) -> Result<(), JsValue> {
    let init = EventInit::new();
    init.set_bubbles(true);
    let event = Event::new_with_event_init_dict("change", &init)?;
    input.dispatch_event(&event)?;
    Ok(())
}

fn show_file(area: &Element, file: &File) -> Result<(), JsValue> {
    let Some(content) = area.query_selector(".upload-content")? else {
        return Ok(());
    };
    let summary = FileSummary::new(&file.name(), file.size() as u64);
    let doc = document()?;

    let row = doc.create_element("div")?;
    row.set_class_name("d-flex align-items-center justify-content-center");
    let icon = doc.create_element("i")?;
    icon.set_class_name("fas fa-file-alt fa-2x text-primary me-3");
    let text = doc.create_element("div")?;
    let name = doc.create_element("div")?;
    name.set_class_name("fw-bold");
    name.set_text_content(Some(&summary.name));
    let size = doc.create_element("small")?;
    size.set_class_name("text-muted");
    size.set_text_content(Some(&summary.size));
    text.append_child(&name)?;
    text.append_child(&size)?;
    row.append_child(&icon)?;
    row.append_child(&text)?;

    content.set_inner_html("");
    content.append_child(&row)?;

    if let Some(area) = area.dyn_ref::<HtmlElement>() {
        area.style().set_property("animation", UPLOAD_PULSE_ANIMATION)?;
        let area = area.clone();
        Timeout::new(UPLOAD_PULSE_MS, move || {
            let _ = area.style().remove_property("animation");
        })
        .forget();
    }
    Ok(())
}
