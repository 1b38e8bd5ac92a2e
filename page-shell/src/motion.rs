use js_sys::Array;
use log::debug;
use sentiment_core::anim::CounterAnimation;
use sentiment_core::format::{format_thousands, parse_counter_text};
use sentiment_core::PageConfig;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::dom::{query_all, window};
use crate::markup::{hidden_reveal_style, COUNTED_CLASS, FADE_IN_CLASS, SLIDE_IN_ANIMATION};

const REVEAL_THRESHOLD: f64 = 0.1;
const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
const COUNTER_THRESHOLD: f64 = 0.5;

pub(crate) fn install(config: &PageConfig) -> Result<(), JsValue> {
    let slide_targets = query_all(&config.reveal_selector)?;
    if !slide_targets.is_empty() {
        let slide = observe_once(REVEAL_THRESHOLD, Some(REVEAL_ROOT_MARGIN), |el| {
            if let Some(el) = el.dyn_ref::<HtmlElement>() {
                let _ = el.style().set_property("animation", SLIDE_IN_ANIMATION);
            }
            true
        })?;
        for el in &slide_targets {
            if let Some(html) = el.dyn_ref::<HtmlElement>() {
                for (property, value) in hidden_reveal_style() {
                    html.style().set_property(property, value)?;
                }
            }
            slide.observe(el);
        }
    }

    let fade_targets = query_all(&config.fade_selector)?;
    if !fade_targets.is_empty() {
        let fade = observe_once(REVEAL_THRESHOLD, Some(REVEAL_ROOT_MARGIN), |el| {
            let _ = el.class_list().add_1(FADE_IN_CLASS);
            true
        })?;
        for el in &fade_targets {
            fade.observe(el);
        }
    }

    let counters = query_all(&config.counter_selector)?;
    if !counters.is_empty() {
        let duration = config.counter_duration_ms as f64;
        let counting = observe_once(COUNTER_THRESHOLD, None, move |el| {
            if el.class_list().contains(COUNTED_CLASS) {
                return true;
            }
            let text = el.text_content().unwrap_or_default();
            let Some(target) = parse_counter_text(&text) else {
                debug!("counter text {text:?} is not a number");
                return true;
            };
            let _ = el.class_list().add_1(COUNTED_CLASS);
            if let Err(err) = count_up(el.clone(), 0, target, duration) {
                debug!("counter animation skipped: {err:?}");
                el.set_text_content(Some(&format_thousands(target)));
            }
            true
        })?;
        for el in &counters {
            counting.observe(el);
        }
    }
    Ok(())
}

/// Observer that runs `on_visible` when a target scrolls into view and stops
/// watching it once the callback returns true.
fn observe_once<F>(threshold: f64, root_margin: Option<&str>, mut on_visible: F) -> Result<IntersectionObserver, JsValue>
where
    F: FnMut(&Element) -> bool + 'static,
{
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::wrap(Box::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                if on_visible(&target) {
                    observer.unobserve(&target);
                }
            }
        },
    ));
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        init.set_root_margin(margin);
    }
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();
    Ok(observer)
}

/// Step `element`'s text from `from` to `to` on animation frames.
pub(crate) fn count_up(element: Element, from: i64, to: i64, duration_ms: f64) -> Result<(), JsValue> {
    request_step(element, CounterAnimation::new(from, to, duration_ms))
}

fn request_step(element: Element, mut counter: CounterAnimation) -> Result<(), JsValue> {
    let step = Closure::once_into_js(move |timestamp: f64| {
        let frame = counter.frame(timestamp);
        element.set_text_content(Some(&format_thousands(frame.value)));
        if !frame.done {
            if let Err(err) = request_step(element, counter) {
                debug!("counter stopped early: {err:?}");
            }
        }
    });
    window()?.request_animation_frame(step.unchecked_ref())?;
    Ok(())
}

/// Start value for `animate_number`: whatever the element shows now.
pub(crate) fn current_count(element: &Element) -> i64 {
    element
        .text_content()
        .as_deref()
        .and_then(parse_counter_text)
        .unwrap_or(0)
}
