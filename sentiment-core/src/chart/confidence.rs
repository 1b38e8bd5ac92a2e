use super::axis::{axes, nice_scale, AxisSpec, PlotArea};
use super::payload::{ConfidenceInput, CONFIDENCE_BUCKETS};
use super::scene::{RectShape, Scene, Shape, Stroke};
use super::tooltip::{Tooltip, TooltipLine};
use super::Frame;
use crate::sentiment::{Rgba, AMBER, BLUE, GREEN, LIME, RED};

/// Low confidence reads red, high reads green.
const BUCKET_COLORS: [Rgba; 5] = [RED, AMBER, BLUE, GREEN, LIME];
/// bar share of its category band (0.9 bar x 0.8 category)
const BAR_FRACTION: f64 = 0.72;
const BAR_RADIUS: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub center_x: f64,
    pub width: f64,
    pub top: f64,
    pub bottom: f64,
}

pub fn layout(input: &ConfidenceInput, width: f64, height: f64) -> (PlotArea, f64, f64, Vec<Bar>) {
    let area = PlotArea::for_canvas(width, height, 0.0);
    let buckets = input.buckets();
    let max = buckets.iter().copied().fold(0.0, f64::max);
    let (y_max, y_step) = nice_scale(max, 5);
    let band = area.width() / buckets.len() as f64;
    let bars = buckets
        .iter()
        .enumerate()
        .map(|(i, v)| Bar {
            center_x: area.left + band * (i as f64 + 0.5),
            width: band * BAR_FRACTION,
            top: area.y_for(*v, y_max),
            bottom: area.bottom,
        })
        .collect();
    (area, y_max, y_step, bars)
}

/// Bucket whose bar is under the pointer.
pub fn hit_test(input: &ConfidenceInput, width: f64, height: f64, x: f64, y: f64) -> Option<usize> {
    let (_, _, _, bars) = layout(input, width, height);
    bars.iter().position(|b| {
        (x - b.center_x).abs() <= b.width / 2.0 && y >= b.top && y <= b.bottom && b.bottom > b.top
    })
}

pub fn tooltip(input: &ConfidenceInput, index: usize) -> Tooltip {
    Tooltip {
        title: Some(format!("Confidence Range: {}", CONFIDENCE_BUCKETS[index])),
        lines: vec![TooltipLine::plain(format!(
            "Analyses: {}",
            input.buckets()[index]
        ))],
    }
}

pub fn scene(input: &ConfidenceInput, frame: &Frame) -> Scene {
    let mut scene = Scene::new(frame.width, frame.height);
    let (area, y_max, y_step, bars) = layout(input, frame.width, frame.height);
    let categories: Vec<(f64, String)> = bars
        .iter()
        .zip(CONFIDENCE_BUCKETS)
        .map(|(b, label)| (b.center_x, label.to_string()))
        .collect();

    scene.extend(axes(
        &area,
        &AxisSpec {
            categories: &categories,
            x_title: "Confidence Range",
            y_title: "Number of Analyses",
            y_max,
            y_step,
            x_grid: false,
        },
        &frame.palette,
    ));

    for (bar, color) in bars.iter().zip(BUCKET_COLORS) {
        let h = (bar.bottom - bar.top) * frame.progress;
        if h <= 0.0 {
            continue;
        }
        scene.push(Shape::Rect(RectShape {
            x: bar.center_x - bar.width / 2.0,
            y: bar.bottom - h,
            w: bar.width,
            h,
            radius: BAR_RADIUS.min(bar.width / 2.0).min(h / 2.0),
            fill: color.with_alpha(0.8).css(),
            stroke: Some(Stroke::new(color.css(), 2.0)),
        }));
    }

    if let Some((x, y)) = frame.pointer {
        if let Some(i) = hit_test(input, frame.width, frame.height, x, y) {
            scene.extend(tooltip(input, i).shapes((x, y), frame.width, frame.height));
        }
    }
    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartPalette;

    #[test]
    fn one_bar_per_non_empty_bucket() {
        let input = ConfidenceInput::from_values(&[1.0, 0.0, 3.0, 8.0, 2.0]);
        let scene = scene(&input, &Frame::still(500.0, 300.0, ChartPalette::default()));
        let bars: Vec<_> = scene.rects().collect();
        assert_eq!(bars.len(), 4);
        assert_eq!(bars[0].fill, "rgba(239, 68, 68, 0.8)");
        assert_eq!(bars[3].fill, "rgba(34, 197, 94, 0.8)");
        assert!(scene.texts().any(|t| t.text == "0.8-1.0"));
        assert!(scene.texts().any(|t| t.text == "Number of Analyses"));
    }

    #[test]
    fn enormous_counts_still_lay_out() {
        let input: ConfidenceInput = serde_json::from_str("[1.7e308, 0, 0, 0, 0]").unwrap();
        let scene = scene(&input, &Frame::still(500.0, 300.0, ChartPalette::default()));
        let bars: Vec<_> = scene.rects().collect();
        assert_eq!(bars.len(), 1);
        assert!(bars[0].h.is_finite() && bars[0].h > 0.0);
    }

    #[test]
    fn hovering_a_bar_shows_range_and_count() {
        let input = ConfidenceInput::from_values(&[0.0, 0.0, 0.0, 4.0, 0.0]);
        let (_, _, _, bars) = layout(&input, 500.0, 300.0);
        let target = bars[3];
        let pointer = (target.center_x, target.bottom - 2.0);
        assert_eq!(hit_test(&input, 500.0, 300.0, pointer.0, pointer.1), Some(3));
        // empty bucket has no bar to hover
        assert_eq!(
            hit_test(&input, 500.0, 300.0, bars[0].center_x, bars[0].bottom - 2.0),
            None
        );

        let frame = Frame {
            pointer: Some(pointer),
            ..Frame::still(500.0, 300.0, ChartPalette::default())
        };
        let scene = scene(&input, &frame);
        assert!(scene.texts().any(|t| t.text == "Confidence Range: 0.6-0.8"));
        assert!(scene.texts().any(|t| t.text == "Analyses: 4"));
    }

    #[test]
    fn bars_grow_during_entry_animation() {
        let input = ConfidenceInput::from_values(&[2.0, 2.0, 2.0, 2.0, 2.0]);
        let full = scene(&input, &Frame::still(500.0, 300.0, ChartPalette::default()));
        let half = scene(
            &input,
            &Frame {
                progress: 0.5,
                ..Frame::still(500.0, 300.0, ChartPalette::default())
            },
        );
        let full_h = full.rects().next().map(|r| r.h).unwrap_or_default();
        let half_h = half.rects().next().map(|r| r.h).unwrap_or_default();
        assert!((full_h - 2.0 * half_h).abs() < 1e-9);
    }
}
