use std::f64::consts::{FRAC_PI_2, PI};

use super::payload::GaugeInput;
use super::scene::{ArcShape, CircleShape, Scene, Shape, TextAlign, TextBaseline, TextShape};
use super::Frame;

const RADIUS: f64 = 40.0;
const LINE_WIDTH: f64 = 8.0;
const TRACK: &str = "#e5e7eb";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub cx: f64,
    pub cy: f64,
    /// Radius of the stroke's centre line.
    pub radius: f64,
}

/// Centred ring of radius 40, shrunk to fit small canvases.
pub fn geometry(width: f64, height: f64) -> RingGeometry {
    let room = (width.min(height) / 2.0 - LINE_WIDTH / 2.0).max(0.0);
    RingGeometry {
        cx: width / 2.0,
        cy: height / 2.0,
        radius: RADIUS.min(room),
    }
}

fn point_at(geo: &RingGeometry, angle: f64) -> (f64, f64) {
    (geo.cx + geo.radius * angle.cos(), geo.cy + geo.radius * angle.sin())
}

/// Full-circle confidence ring: gray track, value arc clockwise from
/// 12 o'clock with round caps, percentage in the middle.
pub fn scene(input: &GaugeInput, frame: &Frame) -> Scene {
    let mut scene = Scene::new(frame.width, frame.height);
    let geo = geometry(frame.width, frame.height);
    let color = input.color().css();
    let half = LINE_WIDTH / 2.0;
    let inner = (geo.radius - half).max(0.0);
    let outer = geo.radius + half;

    scene.push(Shape::Arc(ArcShape {
        cx: geo.cx,
        cy: geo.cy,
        inner,
        outer,
        start: -FRAC_PI_2,
        end: 3.0 * FRAC_PI_2,
        fill: TRACK.into(),
        stroke: None,
    }));

    let start = -FRAC_PI_2;
    let end = start + 2.0 * PI * input.value() * frame.progress;
    if end > start {
        scene.push(Shape::Arc(ArcShape {
            cx: geo.cx,
            cy: geo.cy,
            inner,
            outer,
            start,
            end,
            fill: color.clone(),
            stroke: None,
        }));
        for angle in [start, end] {
            let (cx, cy) = point_at(&geo, angle);
            scene.push(Shape::Circle(CircleShape {
                cx,
                cy,
                r: half,
                fill: color.clone(),
                stroke: None,
            }));
        }
    }

    scene.push(Shape::Text(TextShape {
        x: geo.cx,
        y: geo.cy,
        text: input.percent_label(),
        color,
        font: "bold 12px Inter".into(),
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
        Frame::still(120.0, 120.0, ChartPalette::default())
    }

    #[test]
    fn track_is_a_full_circle_under_the_value_arc() {
        let scene = scene(&GaugeInput::new(0.25, "positive"), &still());
        let arcs: Vec<_> = scene.arcs().collect();
        assert_eq!(arcs.len(), 2);
        assert_eq!(arcs[0].fill, "#e5e7eb");
        assert!((arcs[0].end - arcs[0].start - 2.0 * PI).abs() < 1e-9);
        assert_eq!((arcs[0].inner, arcs[0].outer), (36.0, 44.0));

        assert_eq!(arcs[1].fill, "rgba(16, 185, 129, 1)");
        assert_eq!(arcs[1].start, -FRAC_PI_2);
        assert!(arcs[1].end.abs() < 1e-9);
    }

    #[test]
    fn value_arc_has_round_caps() {
        let scene = scene(&GaugeInput::new(0.25, "negative"), &still());
        let caps: Vec<_> = scene
            .shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Circle(c) => Some(c),
                _ => None,
            })
            .collect();
        assert_eq!(caps.len(), 2);
        // 12 o'clock, then 3 o'clock a quarter turn later
        assert!((caps[0].cx - 60.0).abs() < 1e-9 && (caps[0].cy - 20.0).abs() < 1e-9);
        assert!((caps[1].cx - 100.0).abs() < 1e-9 && (caps[1].cy - 60.0).abs() < 1e-9);
        assert!(caps.iter().all(|c| c.r == 4.0 && c.fill == "rgba(239, 68, 68, 1)"));
    }

    #[test]
    fn centre_label_is_bold_twelve_pixels() {
        let scene = scene(&GaugeInput::new(0.92, "neutral"), &still());
        let text = scene.texts().next().cloned().expect("centre label");
        assert_eq!(text.text, "92%");
        assert_eq!(text.font, "bold 12px Inter");
        assert_eq!((text.x, text.y), (60.0, 60.0));
        assert_eq!(text.color, "rgba(107, 114, 128, 1)");
    }

    #[test]
    fn zero_confidence_draws_only_the_track() {
        let scene = scene(&GaugeInput::new(0.0, "positive"), &still());
        assert_eq!(scene.arcs().count(), 1);
        assert_eq!(scene.texts().next().map(|t| t.text.as_str()), Some("0%"));
    }

    #[test]
    fn small_canvas_shrinks_the_ring() {
        assert_eq!(geometry(40.0, 60.0).radius, 16.0);
        assert_eq!(geometry(200.0, 200.0).radius, 40.0);
    }
}
