use std::f64::consts::{FRAC_PI_2, TAU};

use super::legend::legend;
use super::payload::DistributionInput;
use super::scene::{ArcShape, Scene, Shape, Stroke};
use super::tooltip::{Tooltip, TooltipLine};
use super::Frame;
use crate::format::format_percentage;
use crate::sentiment::Sentiment;

const LEGEND_HEIGHT: f64 = 40.0;
const HOVER_OFFSET: f64 = 10.0;
const CUTOUT: f64 = 0.6;
/// First slice starts at 12 o'clock.
const START_ANGLE: f64 = -FRAC_PI_2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DonutGeometry {
    pub cx: f64,
    pub cy: f64,
    pub inner: f64,
    pub outer: f64,
}

/// Ring placement above the bottom legend, leaving room for the hover pop-out.
pub fn geometry(width: f64, height: f64) -> DonutGeometry {
    let area_h = (height - LEGEND_HEIGHT).max(0.0);
    let outer = (width.min(area_h) / 2.0 - HOVER_OFFSET).max(0.0);
    DonutGeometry {
        cx: width / 2.0,
        cy: area_h / 2.0,
        inner: outer * CUTOUT,
        outer,
    }
}

/// `"Positive: 3 (42.9%)"`.
pub fn tooltip_label(input: &DistributionInput, index: usize) -> String {
    let counts = input.counts();
    let sentiment = Sentiment::ALL[index];
    format!(
        "{}: {} ({}%)",
        sentiment.label(),
        counts[index],
        format_percentage(counts[index], input.total())
    )
}

/// Slice under the pointer, by `Sentiment::ALL` index.
pub fn hit_test(input: &DistributionInput, width: f64, height: f64, x: f64, y: f64) -> Option<usize> {
    let total = input.total();
    if total <= 0.0 {
        return None;
    }
    let geo = geometry(width, height);
    let (dx, dy) = (x - geo.cx, y - geo.cy);
    let r = dx.hypot(dy);
    if r < geo.inner || r > geo.outer + HOVER_OFFSET {
        return None;
    }
    let angle = (dy.atan2(dx) - START_ANGLE).rem_euclid(TAU);
    let mut acc = 0.0;
    for (i, count) in input.counts().iter().enumerate() {
        let sweep = count / total * TAU;
        if *count > 0.0 && angle < acc + sweep {
            return Some(i);
        }
        acc += sweep;
    }
    None
}

pub fn scene(input: &DistributionInput, frame: &Frame) -> Scene {
    let mut scene = Scene::new(frame.width, frame.height);
    let geo = geometry(frame.width, frame.height);
    let counts = input.counts();
    let total = input.total();
    let hovered = frame
        .pointer
        .and_then(|(x, y)| hit_test(input, frame.width, frame.height, x, y));

    if total > 0.0 {
        let scale = frame.progress;
        let mut angle = START_ANGLE;
        for (i, sentiment) in Sentiment::ALL.iter().enumerate() {
            let sweep = counts[i] / total * TAU * frame.progress;
            if sweep <= 0.0 {
                continue;
            }
            let pop = if hovered == Some(i) { HOVER_OFFSET } else { 0.0 };
            let color = sentiment.color();
            scene.push(Shape::Arc(ArcShape {
                cx: geo.cx,
                cy: geo.cy,
                inner: geo.inner * scale,
                outer: geo.outer * scale + pop,
                start: angle,
                end: angle + sweep,
                fill: color.with_alpha(0.8).css(),
                stroke: Some(Stroke::new(color.css(), 2.0)),
            }));
            angle += sweep;
        }
    }

    let entries: Vec<(&str, _)> = Sentiment::ALL
        .iter()
        .map(|s| (s.label(), s.color()))
        .collect();
    scene.extend(legend(
        &entries,
        frame.height - LEGEND_HEIGHT / 2.0,
        frame.width,
        &frame.palette,
    ));

    if let (Some(i), Some(pointer)) = (hovered, frame.pointer) {
        let tip = Tooltip {
            title: None,
            lines: vec![TooltipLine::with_swatch(
                tooltip_label(input, i),
                Sentiment::ALL[i].color(),
            )],
        };
        scene.extend(tip.shapes(pointer, frame.width, frame.height));
    }
    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::scene::testing::RecordingBackend;
    use crate::chart::ChartPalette;

    fn frame(pointer: Option<(f64, f64)>) -> Frame {
        Frame {
            pointer,
            ..Frame::still(400.0, 340.0, ChartPalette::default())
        }
    }

    #[test]
    fn all_zero_counts_render_zero_percent() {
        let input = DistributionInput::default();
        for i in 0..3 {
            let label = tooltip_label(&input, i);
            assert!(label.ends_with("(0%)"), "{label}");
            assert!(!label.contains("NaN"));
        }
        let scene = scene(&input, &frame(Some((200.0, 150.0))));
        assert_eq!(scene.arcs().count(), 0);
        // legend still drawn
        assert_eq!(scene.texts().count(), 3);
    }

    #[test]
    fn slices_cover_full_circle_in_proportion() {
        let input = DistributionInput::new(2.0, 1.0, 1.0);
        let scene = scene(&input, &frame(None));
        let arcs: Vec<_> = scene.arcs().collect();
        assert_eq!(arcs.len(), 3);
        assert!((arcs[0].end - arcs[0].start - std::f64::consts::PI).abs() < 1e-9);
        assert!((arcs[2].end - START_ANGLE - TAU).abs() < 1e-9);
        assert_eq!(arcs[0].fill, "rgba(16, 185, 129, 0.8)");
        assert_eq!(arcs[2].fill, "rgba(239, 68, 68, 0.8)");
    }

    #[test]
    fn hovering_a_slice_pops_it_out_with_tooltip() {
        let input = DistributionInput::new(1.0, 0.0, 1.0);
        let geo = geometry(400.0, 340.0);
        let ring_mid = (geo.inner + geo.outer) / 2.0;
        // right of centre lies in the first (positive) half
        let pointer = (geo.cx + ring_mid, geo.cy);
        assert_eq!(hit_test(&input, 400.0, 340.0, pointer.0, pointer.1), Some(0));
        // left of centre is the negative half; the empty neutral slice is skipped
        assert_eq!(
            hit_test(&input, 400.0, 340.0, geo.cx - ring_mid, geo.cy),
            Some(2)
        );
        // the hole is not a slice
        assert_eq!(hit_test(&input, 400.0, 340.0, geo.cx, geo.cy), None);

        let scene = scene(&input, &frame(Some(pointer)));
        let arcs: Vec<_> = scene.arcs().collect();
        assert_eq!(arcs[0].outer, geo.outer + HOVER_OFFSET);
        assert!(scene.texts().any(|t| t.text == "Positive: 1 (50.0%)"));
    }

    #[test]
    fn entry_animation_sweeps_partially() {
        let input = DistributionInput::new(1.0, 1.0, 0.0);
        let mut f = frame(None);
        f.progress = 0.5;
        let scene = scene(&input, &f);
        let swept: f64 = scene.arcs().map(|a| a.end - a.start).sum();
        assert!((swept - std::f64::consts::PI).abs() < 1e-9);

        let mut backend = RecordingBackend::default();
        scene.render(&mut backend);
        assert_eq!(backend.frames, 1);
    }
}
