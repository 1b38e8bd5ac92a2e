//! Binds the theme controller to the document: attribute, meta colour, the
//! toggle control and the `themechange` event older page scripts listen for.

use std::cell::{Cell, RefCell};

use gloo_timers::callback::Timeout;
use log::{debug, info, warn};
use sentiment_core::{PageConfig, Theme, ThemeBus, ThemeController};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CustomEvent, CustomEventInit, Document, Element, HtmlElement, KeyboardEvent, MediaQueryList,
    MediaQueryListEvent, MouseEvent,
};

use crate::dom::{document, listen, window, LocalStorage};
use crate::markup::{
    RIPPLE_KEYFRAMES, RIPPLE_MS, RIPPLE_STYLE, RIPPLE_STYLE_ID, SPIN_DELAY_MS, SPIN_SETTLE_MS,
};

pub const THEME_EVENT: &str = "themechange";
const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

thread_local! {
    static CONTROLLER: RefCell<Option<ThemeController<LocalStorage>>> = const { RefCell::new(None) };
    // Readable while a theme change is being broadcast.
    static ACTIVE: Cell<Theme> = const { Cell::new(Theme::Light) };
}

fn with_controller<R>(f: impl FnOnce(&mut ThemeController<LocalStorage>) -> R) -> Result<R, JsValue> {
    CONTROLLER.with(|slot| {
        let mut slot = slot
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("theme change already in progress"))?;
        let controller = slot
            .as_mut()
            .ok_or_else(|| JsValue::from_str("theme controller not started"))?;
        Ok(f(controller))
    })
}

pub(crate) fn active() -> Theme {
    ACTIVE.with(Cell::get)
}

pub(crate) fn install(config: &PageConfig) -> Result<(), JsValue> {
    let media = window()?.match_media(DARK_QUERY).ok().flatten();
    let prefers_dark = media.as_ref().is_some_and(MediaQueryList::matches);

    let bus = ThemeBus::new();
    bus.subscribe(|theme: &Theme| ACTIVE.with(|a| a.set(*theme)));
    {
        let icon_id = config.theme_icon_id.clone();
        let toggle_id = config.theme_toggle_id.clone();
        bus.subscribe(move |theme: &Theme| {
            if let Err(err) = apply_to_document(*theme, &icon_id, &toggle_id) {
                warn!("failed to apply theme to document: {err:?}");
            }
        });
    }
    bus.subscribe(|theme: &Theme| chart_frontend::apply_theme(*theme));
    bus.subscribe(|theme: &Theme| {
        if let Err(err) = dispatch_theme_event(*theme) {
            warn!("{THEME_EVENT} dispatch failed: {err:?}");
        }
    });

    let controller = ThemeController::new(
        LocalStorage,
        config.theme_storage_key.as_str(),
        prefers_dark,
        bus,
    );
    controller.announce();
    info!("theme {} active", controller.theme().as_str());
    CONTROLLER.with(|slot| *slot.borrow_mut() = Some(controller));

    bind_toggle(&config.theme_toggle_id)?;
    bind_shortcut(&config.theme_toggle_id)?;
    if let Some(media) = media {
        listen(&media, "change", |event: MediaQueryListEvent| {
            match with_controller(|c| c.system_preference_changed(event.matches())) {
                Ok(true) => debug!("followed system colour scheme change"),
                Ok(false) => {}
                Err(err) => warn!("system theme change ignored: {err:?}"),
            }
        })?;
    }
    Ok(())
}

pub(crate) fn set(theme: Theme) -> Result<(), JsValue> {
    with_controller(|c| c.set_theme(theme))
}

/// Flip the theme and play the toggle feedback if the control exists.
pub(crate) fn toggle(toggle_id: &str) -> Result<Theme, JsValue> {
    let theme = with_controller(ThemeController::toggle_theme)?;
    if let Some(toggle) = document()?
        .get_element_by_id(toggle_id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    {
        play_toggle_animation(&toggle);
    }
    Ok(theme)
}

/// Swap `dark-theme` / `light-theme` on one element.
pub(crate) fn apply_class(element: &Element, theme: Theme) -> Result<(), JsValue> {
    let classes = element.class_list();
    classes.remove_2(Theme::Dark.element_class(), Theme::Light.element_class())?;
    classes.add_1(theme.element_class())
}

fn apply_to_document(theme: Theme, icon_id: &str, toggle_id: &str) -> Result<(), JsValue> {
    let doc = document()?;
    if let Some(root) = doc.document_element() {
        root.set_attribute("data-theme", theme.as_str())?;
    }
    update_meta_color(&doc, theme)?;
    if let Some(icon) = doc.get_element_by_id(icon_id) {
        icon.set_class_name(theme.icon_class());
    }
    if let Some(toggle) = doc.get_element_by_id(toggle_id) {
        toggle.set_attribute("aria-label", theme.toggle_label())?;
    }
    Ok(())
}

fn update_meta_color(doc: &Document, theme: Theme) -> Result<(), JsValue> {
    if let Some(meta) = doc.query_selector("meta[name=\"theme-color\"]")? {
        return meta.set_attribute("content", theme.meta_color());
    }
    let meta = doc.create_element("meta")?;
    meta.set_attribute("name", "theme-color")?;
    meta.set_attribute("content", theme.meta_color())?;
    if let Some(head) = doc.head() {
        head.append_child(&meta)?;
    }
    Ok(())
}

fn dispatch_theme_event(theme: Theme) -> Result<(), JsValue> {
    let detail = js_sys::Object::new();
    js_sys::Reflect::set(&detail, &"theme".into(), &theme.as_str().into())?;
    let init = CustomEventInit::new();
    init.set_detail(&detail);
    let event = CustomEvent::new_with_event_init_dict(THEME_EVENT, &init)?;
    window()?.dispatch_event(&event)?;
    Ok(())
}

fn bind_toggle(toggle_id: &str) -> Result<(), JsValue> {
    let Some(toggle) = document()?
        .get_element_by_id(toggle_id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        debug!("no #{toggle_id}; theme toggle not bound");
        return Ok(());
    };
    if !toggle.has_attribute("role") {
        toggle.set_attribute("role", "button")?;
    }
    if !toggle.has_attribute("tabindex") {
        toggle.set_attribute("tabindex", "0")?;
    }

    {
        let id = toggle_id.to_string();
        listen(&toggle, "click", move |event: MouseEvent| {
            event.prevent_default();
            if let Err(err) = self::toggle(&id) {
                warn!("theme toggle failed: {err:?}");
            }
        })?;
    }
    {
        let id = toggle_id.to_string();
        listen(&toggle, "keydown", move |event: KeyboardEvent| {
            if matches!(event.key().as_str(), "Enter" | " ") {
                event.prevent_default();
                if let Err(err) = self::toggle(&id) {
                    warn!("theme toggle failed: {err:?}");
                }
            }
        })?;
    }
    Ok(())
}

/// Ctrl/Cmd + Shift + T.
fn bind_shortcut(toggle_id: &str) -> Result<(), JsValue> {
    let toggle_id = toggle_id.to_string();
    listen(&document()?, "keydown", move |event: KeyboardEvent| {
        let modifier = event.ctrl_key() || event.meta_key();
        if modifier && event.shift_key() && event.key().eq_ignore_ascii_case("t") {
            event.prevent_default();
            if let Err(err) = self::toggle(&toggle_id) {
                warn!("theme shortcut failed: {err:?}");
            }
        }
    })
}

fn play_toggle_animation(toggle: &HtmlElement) {
    let style = toggle.style();
    let _ = style.set_property("transform", "rotate(360deg)");
    let _ = style.set_property("transition", "transform 0.3s ease");
    let el = toggle.clone();
    Timeout::new(SPIN_DELAY_MS, move || {
        let _ = el.style().set_property("transform", "rotate(0deg)");
        Timeout::new(SPIN_SETTLE_MS, move || {
            let _ = el.style().remove_property("transition");
        })
        .forget();
    })
    .forget();

    if let Err(err) = ripple(toggle) {
        debug!("ripple skipped: {err:?}");
    }
}

fn ripple(toggle: &HtmlElement) -> Result<(), JsValue> {
    let doc = document()?;
    if doc.get_element_by_id(RIPPLE_STYLE_ID).is_none() {
        let style = doc.create_element("style")?;
        style.set_id(RIPPLE_STYLE_ID);
        style.set_text_content(Some(RIPPLE_KEYFRAMES));
        if let Some(head) = doc.head() {
            head.append_child(&style)?;
        }
    }
    let span = doc.create_element("span")?;
    span.set_class_name("theme-ripple");
    span.set_attribute("style", RIPPLE_STYLE)?;
    toggle.style().set_property("position", "relative")?;
    toggle.append_child(&span)?;
    Timeout::new(RIPPLE_MS, move || span.remove()).forget();
    Ok(())
}
