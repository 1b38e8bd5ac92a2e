use std::f64::consts::PI;

use super::payload::GaugeInput;
use super::scene::{ArcShape, Scene, Shape, TextAlign, TextBaseline, TextShape};
use super::Frame;
use crate::sentiment::Rgba;

const CUTOUT: f64 = 0.8;
const PADDING: f64 = 4.0;
const TRACK: Rgba = Rgba::new(229, 231, 235, 0.3);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeGeometry {
    pub cx: f64,
    /// Centre of the ring, on the bottom edge of the chart area.
    pub cy: f64,
    pub inner: f64,
    pub outer: f64,
}

pub fn geometry(width: f64, height: f64) -> GaugeGeometry {
    let bottom = (height - PADDING).max(0.0);
    let outer = (width / 2.0 - PADDING).min(height - 2.0 * PADDING).max(0.0);
    GaugeGeometry {
        cx: width / 2.0,
        cy: bottom,
        inner: outer * CUTOUT,
        outer,
    }
}

/// Half ring from 9 o'clock over the top to 3 o'clock, value first, then the
/// track, with the rounded percentage drawn over it.
pub fn scene(input: &GaugeInput, frame: &Frame) -> Scene {
    let mut scene = Scene::new(frame.width, frame.height);
    let geo = geometry(frame.width, frame.height);
    let value = input.value();
    let color = input.color();

    let value_end = PI + PI * value * frame.progress;
    let track_end = PI + PI * frame.progress;
    if value_end > PI {
        scene.push(Shape::Arc(ArcShape {
            cx: geo.cx,
            cy: geo.cy,
            inner: geo.inner,
            outer: geo.outer,
            start: PI,
            end: value_end,
            fill: color.css(),
            stroke: None,
        }));
    }
    if track_end > value_end {
        scene.push(Shape::Arc(ArcShape {
            cx: geo.cx,
            cy: geo.cy,
            inner: geo.inner,
            outer: geo.outer,
            start: value_end,
            end: track_end,
            fill: TRACK.css(),
            stroke: None,
        }));
    }

    scene.push(Shape::Text(TextShape {
        x: geo.cx,
        y: geo.cy - 10.0,
        text: input.percent_label(),
        color: color.css(),
        font: "bold 14px Inter".into(),
        align: TextAlign::Center,
        baseline: TextBaseline::Middle,
        rotation: 0.0,
    }));
    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartPalette;

    fn still() -> Frame {
        Frame::still(200.0, 120.0, ChartPalette::default())
    }

    #[test]
    fn value_and_track_split_the_half_ring() {
        let scene = scene(&GaugeInput::new(0.25, "negative"), &still());
        let arcs: Vec<_> = scene.arcs().collect();
        assert_eq!(arcs.len(), 2);
        assert_eq!(arcs[0].start, PI);
        assert!((arcs[0].end - 1.25 * PI).abs() < 1e-9);
        assert!((arcs[1].end - 2.0 * PI).abs() < 1e-9);
        assert_eq!(arcs[0].fill, "rgba(239, 68, 68, 1)");
        assert_eq!(arcs[1].fill, "rgba(229, 231, 235, 0.3)");
    }

    #[test]
    fn overlay_text_is_rounded_percentage_in_sentiment_color() {
        let scene = scene(&GaugeInput::new(0.666, "positive"), &still());
        let text = scene.texts().next().cloned();
        let text = text.expect("overlay text");
        assert_eq!(text.text, "67%");
        assert_eq!(text.color, "rgba(16, 185, 129, 1)");
        let geo = geometry(200.0, 120.0);
        assert_eq!(text.y, geo.cy - 10.0);
    }

    #[test]
    fn extremes_draw_a_single_segment() {
        assert_eq!(scene(&GaugeInput::new(0.0, "neutral"), &still()).arcs().count(), 1);
        assert_eq!(scene(&GaugeInput::new(1.0, "neutral"), &still()).arcs().count(), 1);
    }
}
