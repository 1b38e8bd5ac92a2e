//! Canvas charts for the sentiment dashboard.
//!
//! Layout lives in `sentiment_core::chart`; this crate owns the canvases,
//! the animation loop and the one-chart-per-canvas manager, and exposes the
//! page-facing entry points.

mod canvas;
mod handle;

use std::cell::{Cell, RefCell};

use log::{debug, info, warn};
use serde_json::Value;
use sentiment_core::chart::{
    ChartData, ChartPalette, ConfidenceInput, DistributionInput, GaugeInput, TrendInput,
};
use sentiment_core::sentiment::sentiment_color;
use sentiment_core::{ChartRegistry, Theme};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlCanvasElement};

pub use handle::ChartHandle;

pub const DEFAULT_EXPORT_NAME: &str = "chart.png";
const DEFAULT_ANIMATION_MS: f64 = 1000.0;

/// Live charts keyed by canvas id, plus the colours new draws use.
pub struct ChartManager {
    charts: ChartRegistry<ChartHandle>,
    palette: ChartPalette,
    animation_ms: f64,
}

impl Default for ChartManager {
    fn default() -> Self {
        Self {
            charts: ChartRegistry::new(),
            palette: ChartPalette::default(),
            animation_ms: DEFAULT_ANIMATION_MS,
        }
    }
}

impl ChartManager {
    /// Build `data` on `canvas_id`, replacing whatever chart was there.
    /// A page without that canvas is not an error.
    pub fn render(&mut self, canvas_id: &str, data: ChartData) -> Result<(), JsValue> {
        let Some(canvas) = find_canvas(canvas_id) else {
            debug!("no canvas #{canvas_id} on this page, skipping {:?} chart", data.kind());
            return Ok(());
        };
        let palette = self.palette;
        let animation_ms = self.animation_ms;
        self.charts
            .replace_with(canvas_id, || ChartHandle::create(canvas, data, palette, animation_ms))?;
        Ok(())
    }

    /// Build `data` on the canvas the page reserves for its kind.
    pub fn render_on_page(&mut self, data: ChartData) -> Result<(), JsValue> {
        let kind = data.kind();
        let canvas_id = kind
            .fixed_canvas_id()
            .ok_or_else(|| JsValue::from_str(&format!("{kind:?} charts need a canvas id")))?;
        self.render(canvas_id, data)
    }

    pub fn apply_theme(&mut self, theme: Theme) {
        self.palette = ChartPalette::for_theme(theme);
        for (_, chart) in self.charts.iter_mut() {
            chart.restyle(self.palette);
        }
    }

    pub fn set_animation_ms(&mut self, ms: f64) {
        self.animation_ms = ms.max(0.0);
    }

    /// Returns false when no chart lives on `canvas_id`.
    pub fn update(&mut self, canvas_id: &str, values: &[f64]) -> Result<bool, JsValue> {
        match self.charts.get(canvas_id) {
            Some(chart) => {
                chart.update_primary(values)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn resize_all(&mut self) {
        for (_, chart) in self.charts.iter_mut() {
            chart.resize();
        }
    }

    pub fn export(&self, canvas_id: &str, filename: &str) -> Result<bool, JsValue> {
        match self.charts.get(canvas_id) {
            Some(chart) => {
                chart.export_png(filename)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn destroy(&mut self, canvas_id: &str) -> bool {
        self.charts.remove(canvas_id)
    }

    pub fn destroy_all(&mut self) {
        if !self.charts.is_empty() {
            debug!("destroying {} chart(s)", self.charts.len());
        }
        self.charts.clear();
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

thread_local! {
    static CHARTS: RefCell<ChartManager> = RefCell::new(ChartManager::default());
    static HOOKS_INSTALLED: Cell<bool> = const { Cell::new(false) };
}

/// Run `f` against the page's chart manager.
pub fn with_charts<R>(f: impl FnOnce(&mut ChartManager) -> R) -> R {
    CHARTS.with(|charts| f(&mut charts.borrow_mut()))
}

fn find_canvas(canvas_id: &str) -> Option<HtmlCanvasElement> {
    let element = web_sys::window()?
        .document()?
        .get_element_by_id(canvas_id)?;
    match element.dyn_into::<HtmlCanvasElement>() {
        Ok(canvas) => Some(canvas),
        Err(_) => {
            warn!("#{canvas_id} is not a canvas");
            None
        }
    }
}

/// Parse a chart payload; blank input and `null` read as the empty payload.
fn parse_payload<T>(json: &str) -> Result<T, JsValue>
where
    T: serde::de::DeserializeOwned + Default,
{
    if json.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str::<Option<T>>(json)
        .map(Option::unwrap_or_default)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Accepts a bare array of numbers or `{"data": [...]}`.
fn parse_values(json: &str) -> Result<Vec<f64>, JsValue> {
    let value: Value = serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let list = match &value {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(items)) => items,
            _ => return Err(JsValue::from_str("expected {\"data\": [numbers]}")),
        },
        _ => return Err(JsValue::from_str("expected an array of numbers")),
    };
    Ok(list.iter().map(|v| v.as_f64().unwrap_or(0.0)).collect())
}

/// Recolour every live chart and all future ones.
pub fn apply_theme(theme: Theme) {
    with_charts(|charts| charts.apply_theme(theme));
}

/// Window-level listeners: refit on resize, tear everything down on pagehide.
/// Safe to call more than once.
pub fn install_window_hooks() -> Result<(), JsValue> {
    if HOOKS_INSTALLED.with(Cell::get) {
        return Ok(());
    }
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

    let resize_cb = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_: Event| {
        with_charts(ChartManager::resize_all);
    }));
    window.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())?;
    resize_cb.forget();

    let pagehide_cb = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_: Event| {
        with_charts(ChartManager::destroy_all);
    }));
    window.add_event_listener_with_callback("pagehide", pagehide_cb.as_ref().unchecked_ref())?;
    pagehide_cb.forget();

    HOOKS_INSTALLED.with(|flag| flag.set(true));
    info!("chart window hooks installed");
    Ok(())
}

// ---------- JS API -----------------------------------------------------------

/// `{positive, neutral, negative}` counts onto `#distributionChart`.
#[wasm_bindgen]
pub fn render_distribution_chart(json: &str) -> Result<(), JsValue> {
    let input: DistributionInput = parse_payload(json)?;
    with_charts(|charts| charts.render_on_page(ChartData::Distribution(input)))
}

/// `{labels, positive, neutral, negative}` onto `#trendChart`.
#[wasm_bindgen]
pub fn render_trend_chart(json: &str) -> Result<(), JsValue> {
    let input: TrendInput = parse_payload(json)?;
    with_charts(|charts| charts.render_on_page(ChartData::Trend(input)))
}

/// Five bucket counts (or `null`) onto `#confidenceChart`.
#[wasm_bindgen]
pub fn render_confidence_chart(json: &str) -> Result<(), JsValue> {
    let input: ConfidenceInput = parse_payload(json)?;
    with_charts(|charts| charts.render_on_page(ChartData::Confidence(input)))
}

#[wasm_bindgen]
pub fn create_sentiment_gauge(canvas_id: &str, value: f64, sentiment: &str) -> Result<(), JsValue> {
    let input = GaugeInput::new(value, sentiment);
    with_charts(|charts| charts.render(canvas_id, ChartData::Gauge(input)))
}

/// Confidence ring on `#sentimentGauge`; `confidence` is in [0, 1].
#[wasm_bindgen]
pub fn update_sentiment_gauge(confidence: f64, sentiment: &str) -> Result<(), JsValue> {
    let input = GaugeInput::new(confidence, sentiment);
    with_charts(|charts| charts.render_on_page(ChartData::Ring(input)))
}

/// Replace the first dataset of a live chart and replay its animation.
#[wasm_bindgen]
pub fn update_chart_data(canvas_id: &str, json: &str) -> Result<bool, JsValue> {
    let values = parse_values(json)?;
    with_charts(|charts| charts.update(canvas_id, &values))
}

#[wasm_bindgen]
pub fn resize_charts() {
    with_charts(ChartManager::resize_all);
}

#[wasm_bindgen]
pub fn export_chart(canvas_id: &str, filename: Option<String>) -> Result<bool, JsValue> {
    let filename = filename
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_EXPORT_NAME.to_string());
    with_charts(|charts| charts.export(canvas_id, &filename))
}

#[wasm_bindgen]
pub fn destroy_chart(canvas_id: &str) -> bool {
    with_charts(|charts| charts.destroy(canvas_id))
}

#[wasm_bindgen]
pub fn destroy_charts() {
    with_charts(ChartManager::destroy_all);
}

#[wasm_bindgen]
pub fn live_chart_count() -> usize {
    with_charts(|charts| charts.len())
}

/// Recolour charts without going through the page theme controller.
#[wasm_bindgen]
pub fn set_chart_theme(theme: &str) -> Result<(), JsValue> {
    let theme = theme
        .parse::<Theme>()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    apply_theme(theme);
    Ok(())
}

/// CSS colour for a sentiment label; unknown labels are gray.
#[wasm_bindgen]
pub fn sentiment_color_css(label: &str) -> String {
    sentiment_color(label).css()
}
