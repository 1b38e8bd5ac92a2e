use super::scene::{CircleShape, Shape, Stroke, TextAlign, TextBaseline, TextShape};
use super::ChartPalette;
use crate::sentiment::Rgba;

const DOT_RADIUS: f64 = 5.0;
const GAP: f64 = 6.0;
const ITEM_PADDING: f64 = 20.0;
const CHAR_WIDTH: f64 = 7.5;

/// Centered single-row legend with point-style markers.
pub fn legend(entries: &[(&str, Rgba)], center_y: f64, width: f64, palette: &ChartPalette) -> Vec<Shape> {
    let item_widths: Vec<f64> = entries
        .iter()
        .map(|(label, _)| DOT_RADIUS * 2.0 + GAP + label.chars().count() as f64 * CHAR_WIDTH)
        .collect();
    let total: f64 =
        item_widths.iter().sum::<f64>() + ITEM_PADDING * entries.len().saturating_sub(1) as f64;
    let mut x = ((width - total) / 2.0).max(0.0);
    let font = palette.font(12, true);

    let mut shapes = Vec::with_capacity(entries.len() * 2);
    for ((label, color), w) in entries.iter().zip(item_widths) {
        shapes.push(Shape::Circle(CircleShape {
            cx: x + DOT_RADIUS,
            cy: center_y,
            r: DOT_RADIUS,
            fill: color.with_alpha(0.8).css(),
            stroke: Some(Stroke::new(color.css(), 1.0)),
        }));
        shapes.push(Shape::Text(TextShape {
            x: x + DOT_RADIUS * 2.0 + GAP,
            y: center_y,
            text: (*label).to_string(),
            color: palette.text.to_string(),
            font: font.clone(),
            align: TextAlign::Left,
            baseline: TextBaseline::Middle,
            rotation: 0.0,
        }));
        x += w + ITEM_PADDING;
    }
    shapes
}
