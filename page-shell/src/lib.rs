//! Page bootstrap for the sentiment dashboard: theme, uploads, toasts,
//! auto-save, scroll effects and the helpers page scripts call directly.

pub mod markup;

#[cfg(target_arch = "wasm32")]
mod autosave;
#[cfg(target_arch = "wasm32")]
mod clipboard;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod forms;
#[cfg(target_arch = "wasm32")]
mod motion;
#[cfg(target_arch = "wasm32")]
mod theme;
#[cfg(target_arch = "wasm32")]
mod toast;
#[cfg(target_arch = "wasm32")]
mod upload;

use sentiment_core::{ConfigError, PageConfig};

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;

#[cfg(target_arch = "wasm32")]
use log::{info, warn};
#[cfg(target_arch = "wasm32")]
use sentiment_core::{Theme, ToastKind};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use web_sys::{Element, HtmlElement};

pub const CONFIG_ELEMENT_ID: &str = "page-config";

/// Config from the page's JSON block; absent or blank means defaults.
pub fn parse_config(raw: Option<&str>) -> Result<PageConfig, ConfigError> {
    match raw.map(str::trim) {
        Some(json) if !json.is_empty() => PageConfig::from_json(json),
        _ => Ok(PageConfig::default()),
    }
}

#[cfg(target_arch = "wasm32")]
thread_local! {
    static CONFIG: RefCell<PageConfig> = RefCell::new(PageConfig::default());
}

#[cfg(target_arch = "wasm32")]
fn config() -> PageConfig {
    CONFIG.with(|c| c.borrow().clone())
}

#[cfg(target_arch = "wasm32")]
fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    // A second start() on the same page keeps the first logger.
    let _ = console_log::init_with_level(level);
}

#[cfg(target_arch = "wasm32")]
fn config_from_page() -> Option<String> {
    dom::by_id::<Element>(CONFIG_ELEMENT_ID).and_then(|el| el.text_content())
}

/// Wire the page using the `#page-config` block if there is one.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn start() -> Result<(), JsValue> {
    let raw = config_from_page();
    let (config, problem) = match parse_config(raw.as_deref()) {
        Ok(config) => (config, None),
        Err(err) => (PageConfig::default(), Some(err)),
    };
    init_logging(config.log_level().unwrap_or(log::Level::Info));
    if let Some(err) = problem {
        warn!("ignoring #{CONFIG_ELEMENT_ID}: {err}");
    }
    boot(config)
}

/// Wire the page with an explicit JSON config; invalid config is an error.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn start_with_config(json: &str) -> Result<(), JsValue> {
    let config = parse_config(Some(json)).map_err(|e| JsValue::from_str(&e.to_string()))?;
    init_logging(config.log_level().unwrap_or(log::Level::Info));
    boot(config)
}

#[cfg(target_arch = "wasm32")]
fn boot(config: PageConfig) -> Result<(), JsValue> {
    CONFIG.with(|c| *c.borrow_mut() = config.clone());

    chart_frontend::with_charts(|charts| charts.set_animation_ms(config.chart_animation_ms as f64));
    chart_frontend::install_window_hooks()?;
    theme::install(&config)?;

    let uploads = upload::install(&config.upload_area_selector)?;
    autosave::install(&config)?;
    forms::install()?;
    if let Err(err) = motion::install(&config) {
        // Old browsers without IntersectionObserver still get a usable page.
        warn!("scroll animations disabled: {err:?}");
    }
    info!("page ready ({uploads} upload area(s))");
    Ok(())
}

// ---------- JS API -----------------------------------------------------------

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn toggle_theme() -> Result<String, JsValue> {
    let theme = theme::toggle(&config().theme_toggle_id)?;
    Ok(theme.as_str().to_string())
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn set_theme(name: &str) -> Result<(), JsValue> {
    let theme = name
        .parse::<Theme>()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    theme::set(theme)
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn current_theme() -> String {
    theme::active().as_str().to_string()
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn is_dark_theme() -> bool {
    theme::active().is_dark()
}

/// Pick between two values according to the active theme.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn theme_color(light: String, dark: String) -> String {
    theme::active().pick(light, dark)
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn apply_theme_class(element: &Element) -> Result<(), JsValue> {
    theme::apply_class(element, theme::active())
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn show_toast(message: &str, kind: Option<String>) -> Result<(), JsValue> {
    let kind = kind.as_deref().map(ToastKind::parse).unwrap_or_default();
    toast::show(message, kind, config().toast_duration_ms)
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub async fn copy_to_clipboard(text: String) -> Result<(), JsValue> {
    let duration = config().toast_duration_ms;
    match clipboard::copy_text(&text).await {
        Ok(()) => toast::show(markup::COPY_OK_MESSAGE, ToastKind::Success, duration),
        Err(err) => {
            warn!("copy failed: {}", dom::js_message(&err));
            toast::show(markup::COPY_FAILED_MESSAGE, ToastKind::Error, duration)
        }
    }
}

/// Count an element's text from its current number to `target`.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn animate_number(element: Element, target: f64, duration_ms: Option<f64>) -> Result<(), JsValue> {
    let from = motion::current_count(&element);
    let target = if target.is_finite() { target.round() as i64 } else { from };
    motion::count_up(element, from, target, duration_ms.unwrap_or(1000.0))
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn set_loading_state(button: &HtmlElement, loading: bool) -> Result<(), JsValue> {
    forms::set_loading(button, loading)
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn format_file_size(bytes: f64) -> String {
    sentiment_core::format::format_file_size(bytes.max(0.0) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_config_uses_defaults() {
        assert_eq!(parse_config(None).unwrap(), PageConfig::default());
        assert_eq!(parse_config(Some("  \n")).unwrap(), PageConfig::default());
    }

    #[test]
    fn partial_config_overrides_fields() {
        let config = parse_config(Some(r#"{"autosave_input_id": "draft", "log_level": "debug"}"#)).unwrap();
        assert_eq!(config.autosave_input_id, "draft");
        assert_eq!(config.theme_storage_key, "theme");
        assert_eq!(config.log_level().unwrap(), log::Level::Debug);
    }

    #[test]
    fn broken_config_is_reported() {
        assert!(matches!(parse_config(Some("{not json")), Err(ConfigError::Parse(_))));
        assert!(matches!(
            parse_config(Some(r#"{"theme_storage_key": "x", "autosave_storage_key": "x"}"#)),
            Err(ConfigError::Invalid(_))
        ));
    }
}
