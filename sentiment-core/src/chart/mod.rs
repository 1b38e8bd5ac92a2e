//! Chart payloads and their layout into drawable scenes.
//!
//! Everything here is pure: a chart is a payload plus a [`Frame`] (canvas
//! size, palette, animation progress, pointer) turned into a [`Scene`] that
//! a [`RendererBackend`] replays. The wasm side owns canvases and timing.

pub mod axis;
pub mod confidence;
pub mod distribution;
pub mod gauge;
pub mod legend;
pub mod payload;
pub mod ring;
pub mod scene;
pub mod tooltip;
pub mod trend;

pub use payload::{ConfidenceInput, DistributionInput, GaugeInput, TrendInput, CONFIDENCE_BUCKETS};
pub use scene::{RendererBackend, Scene, Shape};

use crate::theme::Theme;

pub const DISTRIBUTION_CANVAS: &str = "distributionChart";
pub const TREND_CANVAS: &str = "trendChart";
pub const CONFIDENCE_CANVAS: &str = "confidenceChart";
pub const RING_CANVAS: &str = "sentimentGauge";

pub const FONT_FAMILY: &str = "Inter, -apple-system, BlinkMacSystemFont, \"Segoe UI\", sans-serif";

/// Theme-dependent defaults applied to every chart draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartPalette {
    pub text: &'static str,
    pub border: &'static str,
}

impl ChartPalette {
    pub fn for_theme(theme: Theme) -> Self {
        Self {
            text: theme.pick("#374151", "#e5e7eb"),
            border: theme.pick("rgba(229, 231, 235, 0.5)", "rgba(75, 85, 99, 0.3)"),
        }
    }

    pub fn font(&self, size: u32, bold: bool) -> String {
        if bold {
            format!("bold {size}px {FONT_FAMILY}")
        } else {
            format!("{size}px {FONT_FAMILY}")
        }
    }
}

impl Default for ChartPalette {
    fn default() -> Self {
        Self::for_theme(Theme::Light)
    }
}

/// Per-draw inputs shared by all chart kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub palette: ChartPalette,
    /// Eased entry-animation progress in [0, 1].
    pub progress: f64,
    pub pointer: Option<(f64, f64)>,
}

impl Frame {
    pub fn still(width: f64, height: f64, palette: ChartPalette) -> Self {
        Self {
            width,
            height,
            palette,
            progress: 1.0,
            pointer: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Distribution,
    Trend,
    Confidence,
    Gauge,
    /// Full-circle confidence ring on the result page.
    Ring,
}

impl ChartKind {
    /// Canvas the page reserves for this kind; gauges name their own.
    pub fn fixed_canvas_id(self) -> Option<&'static str> {
        match self {
            ChartKind::Distribution => Some(DISTRIBUTION_CANVAS),
            ChartKind::Trend => Some(TREND_CANVAS),
            ChartKind::Confidence => Some(CONFIDENCE_CANVAS),
            ChartKind::Ring => Some(RING_CANVAS),
            ChartKind::Gauge => None,
        }
    }
}

/// Payload of a live chart.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    Distribution(DistributionInput),
    Trend(TrendInput),
    Confidence(ConfidenceInput),
    Gauge(GaugeInput),
    Ring(GaugeInput),
}

impl ChartData {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartData::Distribution(_) => ChartKind::Distribution,
            ChartData::Trend(_) => ChartKind::Trend,
            ChartData::Confidence(_) => ChartKind::Confidence,
            ChartData::Gauge(_) => ChartKind::Gauge,
            ChartData::Ring(_) => ChartKind::Ring,
        }
    }

    pub fn scene(&self, frame: &Frame) -> Scene {
        match self {
            ChartData::Distribution(d) => distribution::scene(d, frame),
            ChartData::Trend(t) => trend::scene(t, frame),
            ChartData::Confidence(c) => confidence::scene(c, frame),
            ChartData::Gauge(g) => gauge::scene(g, frame),
            ChartData::Ring(r) => ring::scene(r, frame),
        }
    }

    /// Whether pointer movement changes the picture.
    pub fn is_interactive(&self) -> bool {
        !matches!(self, ChartData::Gauge(_) | ChartData::Ring(_))
    }

    /// Swap the first dataset's values: the three counts, the positive trend
    /// line, the five buckets, or `[value * 100, ...]` for a gauge.
    pub fn replace_primary(&mut self, values: &[f64]) {
        match self {
            ChartData::Distribution(d) => d.set_counts(values),
            ChartData::Trend(t) => t.positive = values.to_vec(),
            ChartData::Confidence(c) => *c = ConfidenceInput::from_values(values),
            ChartData::Gauge(g) | ChartData::Ring(g) => {
                if let Some(first) = values.first() {
                    g.value = first / 100.0;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_follows_theme() {
        assert_eq!(ChartPalette::for_theme(Theme::Dark).text, "#e5e7eb");
        assert_eq!(ChartPalette::for_theme(Theme::Light).text, "#374151");
        assert_eq!(
            ChartPalette::for_theme(Theme::Dark).border,
            "rgba(75, 85, 99, 0.3)"
        );
    }

    #[test]
    fn replace_primary_updates_first_dataset() {
        let mut data = ChartData::Distribution(DistributionInput::new(1.0, 1.0, 1.0));
        data.replace_primary(&[5.0, 0.0]);
        assert_eq!(
            data,
            ChartData::Distribution(DistributionInput::new(5.0, 0.0, 0.0))
        );

        let mut gauge = ChartData::Gauge(GaugeInput::new(0.2, "positive"));
        gauge.replace_primary(&[75.0, 25.0]);
        assert_eq!(gauge, ChartData::Gauge(GaugeInput::new(0.75, "positive")));
        assert!(!gauge.is_interactive());
    }

    #[test]
    fn fixed_canvas_ids() {
        assert_eq!(ChartKind::Trend.fixed_canvas_id(), Some("trendChart"));
        assert_eq!(ChartKind::Ring.fixed_canvas_id(), Some("sentimentGauge"));
        assert_eq!(ChartKind::Gauge.fixed_canvas_id(), None);
        let ring = ChartData::Ring(GaugeInput::new(0.5, "positive"));
        assert_eq!(ring.kind(), ChartKind::Ring);
        assert!(!ring.is_interactive());
    }
}
