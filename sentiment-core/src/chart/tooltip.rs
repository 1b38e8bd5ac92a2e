use super::scene::{RectShape, Shape, Stroke, TextAlign, TextBaseline, TextShape};
use crate::sentiment::Rgba;

const CHAR_WIDTH: f64 = 7.0;
const LINE_HEIGHT: f64 = 16.0;
const PADDING: f64 = 8.0;
const SWATCH: f64 = 10.0;
const FONT: &str = "12px Inter, sans-serif";
const TITLE_FONT: &str = "bold 12px Inter, sans-serif";

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipLine {
    pub text: String,
    pub swatch: Option<Rgba>,
}

impl TooltipLine {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            swatch: None,
        }
    }

    pub fn with_swatch(text: impl Into<String>, color: Rgba) -> Self {
        Self {
            text: text.into(),
            swatch: Some(color),
        }
    }
}

/// Hover box content; laid out next to the pointer and kept on canvas.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tooltip {
    pub title: Option<String>,
    pub lines: Vec<TooltipLine>,
}

impl Tooltip {
    pub fn shapes(&self, anchor: (f64, f64), width: f64, height: f64) -> Vec<Shape> {
        let has_swatch = self.lines.iter().any(|l| l.swatch.is_some());
        let swatch_w = if has_swatch { SWATCH + 6.0 } else { 0.0 };
        let widest = self
            .title
            .iter()
            .map(|t| t.chars().count() as f64 * CHAR_WIDTH)
            .chain(
                self.lines
                    .iter()
                    .map(|l| l.text.chars().count() as f64 * CHAR_WIDTH + swatch_w),
            )
            .fold(0.0, f64::max);
        let rows = self.lines.len() + usize::from(self.title.is_some());
        let box_w = widest + PADDING * 2.0;
        let box_h = rows as f64 * LINE_HEIGHT + PADDING * 2.0;

        let mut x = anchor.0 + 12.0;
        if x + box_w > width {
            x = anchor.0 - 12.0 - box_w;
        }
        let x = x.max(0.0);
        let y = (anchor.1 - box_h / 2.0).clamp(0.0, (height - box_h).max(0.0));

        let mut shapes = vec![Shape::Rect(RectShape {
            x,
            y,
            w: box_w,
            h: box_h,
            radius: 8.0,
            fill: "rgba(0, 0, 0, 0.8)".into(),
            stroke: Some(Stroke::new("rgba(255, 255, 255, 0.2)", 1.0)),
        })];

        let mut row_y = y + PADDING + LINE_HEIGHT / 2.0;
        if let Some(title) = &self.title {
            shapes.push(Shape::Text(TextShape {
                x: x + PADDING,
                y: row_y,
                text: title.clone(),
                color: "#fff".into(),
                font: TITLE_FONT.into(),
                align: TextAlign::Left,
                baseline: TextBaseline::Middle,
                rotation: 0.0,
            }));
            row_y += LINE_HEIGHT;
        }
        for line in &self.lines {
            let mut text_x = x + PADDING;
            if let Some(color) = line.swatch {
                shapes.push(Shape::Rect(RectShape {
                    x: text_x,
                    y: row_y - SWATCH / 2.0,
                    w: SWATCH,
                    h: SWATCH,
                    radius: 0.0,
                    fill: color.css(),
                    stroke: Some(Stroke::new("#fff", 1.0)),
                }));
            }
            text_x += swatch_w;
            shapes.push(Shape::Text(TextShape {
                x: text_x,
                y: row_y,
                text: line.text.clone(),
                color: "#fff".into(),
                font: FONT.into(),
                align: TextAlign::Left,
                baseline: TextBaseline::Middle,
                rotation: 0.0,
            }));
            row_y += LINE_HEIGHT;
        }
        shapes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tooltip_flips_left_near_right_edge_and_stays_on_canvas() {
        let tip = Tooltip {
            title: Some("Mon".into()),
            lines: vec![TooltipLine::plain("Positive: 3")],
        };
        let shapes = tip.shapes((390.0, 5.0), 400.0, 300.0);
        let Shape::Rect(bg) = &shapes[0] else {
            panic!("background first");
        };
        assert!(bg.x + bg.w <= 400.0);
        assert!(bg.y >= 0.0);
        assert_eq!(shapes.len(), 3);
    }
}
