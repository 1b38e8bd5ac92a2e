use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{debug, info};
use sentiment_core::{AutoSave, PageConfig};
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event};

use crate::dom::{by_id, field_value, listen, set_field_value, LocalStorage};

/// Restore and keep saving the draft in the configured text field.
pub(crate) fn install(config: &PageConfig) -> Result<(), JsValue> {
    let Some(field) = by_id::<Element>(&config.autosave_input_id) else {
        return Ok(());
    };
    let saver = Rc::new(RefCell::new(AutoSave::new(
        LocalStorage,
        config.autosave_storage_key.as_str(),
        config.autosave_debounce_ms,
    )));

    let current = field_value(&field).unwrap_or_default();
    if let Some(text) = saver.borrow().restore(&current) {
        set_field_value(&field, &text);
        field.dispatch_event(&Event::new("input")?)?;
        info!("restored auto-saved draft ({} chars)", text.chars().count());
    }

    let timer: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
    {
        let saver = saver.clone();
        let timer = timer.clone();
        let input = field.clone();
        listen(&field, "input", move |_: Event| {
            let value = field_value(&input).unwrap_or_default();
            let wait = {
                let mut saver = saver.borrow_mut();
                saver.on_input(value);
                saver.debounce_ms()
            };
            let saver = saver.clone();
            // Replacing the handle cancels the previous countdown.
            *timer.borrow_mut() = Some(Timeout::new(wait, move || {
                saver.borrow_mut().flush();
            }));
        })?;
    }

    if let Some(form) = field.closest("form")? {
        listen(&form, "submit", move |_: Event| {
            timer.borrow_mut().take();
            saver.borrow_mut().on_submit();
            debug!("auto-saved draft cleared on submit");
        })?;
    }
    Ok(())
}
