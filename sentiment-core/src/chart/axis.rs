use super::scene::{Shape, Stroke, TextAlign, TextBaseline, TextShape};
use super::ChartPalette;

/// Fixed faint grid colour, independent of theme.
pub const GRID_LINE: &str = "rgba(0, 0, 0, 0.05)";

/// Upper bound on horizontal grid lines, whatever the step says.
const MAX_TICK_STEPS: usize = 20;

/// Inner rectangle of a cartesian chart, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotArea {
    /// Leaves room for tick labels and axis titles on the left and bottom.
    pub fn for_canvas(width: f64, height: f64, top_reserved: f64) -> Self {
        let left = 56.0_f64.min(width / 2.0);
        let right = (width - 16.0).max(left);
        let top = (top_reserved + 12.0).min(height / 2.0);
        let bottom = (height - 48.0).max(top);
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    /// Pixel row of `value` on a zero-based axis topping out at `y_max`.
    pub fn y_for(&self, value: f64, y_max: f64) -> f64 {
        if y_max <= 0.0 {
            return self.bottom;
        }
        self.bottom - (value / y_max).clamp(0.0, 1.0) * self.height()
    }
}

/// Round `max` up to a 1/2/5 x 10^k step grid with at most `max_ticks` steps.
/// Returns (axis top, step). An empty axis spans 0..1.
pub fn nice_scale(max: f64, max_ticks: usize) -> (f64, f64) {
    if !(max > 0.0) || !max.is_finite() {
        return (1.0, 0.2);
    }
    let raw = max / max_ticks.max(1) as f64;
    let magnitude = 10f64.powi(raw.log10().floor() as i32);
    let norm = raw / magnitude;
    let nice = if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    };
    let step = nice * magnitude;
    let top = (max / step).ceil() * step;
    if !top.is_finite() || !step.is_finite() {
        // Values near f64::MAX: no rounding headroom left, use the data max.
        return (max, max / max_ticks.max(1) as f64);
    }
    (top, step)
}

/// Number of steps from zero to `y_max`, capped at `MAX_TICK_STEPS`.
/// `None` when the axis has no usable step.
fn tick_steps(y_max: f64, y_step: f64) -> Option<usize> {
    if !(y_step > 0.0) || !y_max.is_finite() || y_max < 0.0 {
        return None;
    }
    let steps = (y_max / y_step + 1e-9).floor();
    Some(if steps.is_finite() { (steps as usize).min(MAX_TICK_STEPS) } else { MAX_TICK_STEPS })
}

pub fn tick_label(value: f64) -> String {
    let rounded = (value * 1e6).round() / 1e6;
    if rounded.is_finite() {
        format!("{rounded}")
    } else {
        format!("{value:e}")
    }
}

pub struct AxisSpec<'a> {
    /// (x pixel, label) for each category.
    pub categories: &'a [(f64, String)],
    pub x_title: &'a str,
    pub y_title: &'a str,
    pub y_max: f64,
    pub y_step: f64,
    pub x_grid: bool,
}

fn text(x: f64, y: f64, s: &str, color: &str, font: String, align: TextAlign, baseline: TextBaseline) -> Shape {
    Shape::Text(TextShape {
        x,
        y,
        text: s.to_string(),
        color: color.to_string(),
        font,
        align,
        baseline,
        rotation: 0.0,
    })
}

/// Grid, axis lines, tick labels and titles.
pub fn axes(area: &PlotArea, spec: &AxisSpec<'_>, palette: &ChartPalette) -> Vec<Shape> {
    let mut shapes = Vec::new();
    let tick_font = palette.font(12, false);
    let title_font = palette.font(12, true);

    let mut grid = Vec::new();
    let steps = tick_steps(spec.y_max, spec.y_step).map_or(0, |n| n + 1);
    for i in 0..steps {
        let value = spec.y_step * i as f64;
        let y = area.y_for(value, spec.y_max);
        grid.push((area.left, y, area.right, y));
        shapes.push(text(
            area.left - 8.0,
            y,
            &tick_label(value),
            palette.text,
            tick_font.clone(),
            TextAlign::Right,
            TextBaseline::Middle,
        ));
    }
    if spec.x_grid {
        for (x, _) in spec.categories {
            grid.push((*x, area.top, *x, area.bottom));
        }
    }
    shapes.insert(
        0,
        Shape::Segments {
            segments: grid,
            stroke: Stroke::new(GRID_LINE, 1.0),
        },
    );

    shapes.push(Shape::Segments {
        segments: vec![
            (area.left, area.top, area.left, area.bottom),
            (area.left, area.bottom, area.right, area.bottom),
        ],
        stroke: Stroke::new(palette.border, 1.0),
    });

    for (x, label) in spec.categories {
        shapes.push(text(
            *x,
            area.bottom + 8.0,
            label,
            palette.text,
            tick_font.clone(),
            TextAlign::Center,
            TextBaseline::Top,
        ));
    }

    shapes.push(text(
        (area.left + area.right) / 2.0,
        area.bottom + 28.0,
        spec.x_title,
        palette.text,
        title_font.clone(),
        TextAlign::Center,
        TextBaseline::Top,
    ));
    shapes.push(Shape::Text(TextShape {
        x: 14.0,
        y: (area.top + area.bottom) / 2.0,
        text: spec.y_title.to_string(),
        color: palette.text.to_string(),
        font: title_font,
        align: TextAlign::Center,
        baseline: TextBaseline::Middle,
        rotation: -std::f64::consts::FRAC_PI_2,
    }));
    shapes
}

/// Bezier-smoothed path through `points` (tension as in a cardinal spline),
/// sampled into `steps` pieces per segment and kept inside `area` vertically.
pub fn smooth(points: &[(f64, f64)], tension: f64, steps: usize, area: &PlotArea) -> Vec<(f64, f64)> {
    if points.len() < 3 || tension <= 0.0 || steps < 2 {
        return points.to_vec();
    }
    let k = tension / 2.0;
    let mut out = Vec::with_capacity((points.len() - 1) * steps + 1);
    out.push(points[0]);
    for i in 0..points.len() - 1 {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(points.len() - 1)];
        let c1 = (p1.0 + (p2.0 - p0.0) * k, p1.1 + (p2.1 - p0.1) * k);
        let c2 = (p2.0 - (p3.0 - p1.0) * k, p2.1 - (p3.1 - p1.1) * k);
        for s in 1..=steps {
            let t = s as f64 / steps as f64;
            let u = 1.0 - t;
            let x = u * u * u * p1.0 + 3.0 * u * u * t * c1.0 + 3.0 * u * t * t * c2.0 + t * t * t * p2.0;
            let y = u * u * u * p1.1 + 3.0 * u * u * t * c1.1 + 3.0 * u * t * t * c2.1 + t * t * t * p2.1;
            out.push((x, y.clamp(area.top, area.bottom)));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_scale_rounds_up_to_friendly_steps() {
        assert_eq!(nice_scale(0.0, 5), (1.0, 0.2));
        assert_eq!(nice_scale(f64::NAN, 5), (1.0, 0.2));
        assert_eq!(nice_scale(3.0, 5), (3.0, 1.0));
        assert_eq!(nice_scale(47.0, 5), (50.0, 10.0));
        let (top, step) = nice_scale(120.0, 5);
        assert_eq!(step, 50.0);
        assert_eq!(top, 150.0);
    }

    #[test]
    fn huge_values_keep_a_finite_axis() {
        let (top, step) = nice_scale(1.7e308, 5);
        assert!(top.is_finite() && step.is_finite());
        assert!(top >= 1.7e308);
        assert_eq!(tick_steps(top, step), Some(5));
        assert_eq!(tick_steps(1.0, 1e-300), Some(MAX_TICK_STEPS));
        assert_eq!(tick_steps(f64::INFINITY, 1.0), None);
        assert_eq!(tick_steps(10.0, 0.0), None);
    }

    #[test]
    fn grid_lines_are_capped() {
        let area = PlotArea::for_canvas(400.0, 300.0, 0.0);
        let spec = AxisSpec {
            categories: &[],
            x_title: "x",
            y_title: "y",
            y_max: 1e6,
            y_step: 1.0,
            x_grid: false,
        };
        let shapes = axes(&area, &spec, &ChartPalette::default());
        let Shape::Segments { segments, .. } = &shapes[0] else {
            panic!("grid first");
        };
        assert_eq!(segments.len(), MAX_TICK_STEPS + 1);
    }

    #[test]
    fn tick_labels_hide_float_noise() {
        assert_eq!(tick_label(0.1 + 0.2), "0.3");
        assert_eq!(tick_label(10.0), "10");
    }

    #[test]
    fn smoothing_passes_through_data_points() {
        let area = PlotArea {
            left: 0.0,
            top: 0.0,
            right: 100.0,
            bottom: 100.0,
        };
        let pts = [(0.0, 50.0), (50.0, 10.0), (100.0, 60.0)];
        let path = smooth(&pts, 0.4, 8, &area);
        assert_eq!(path.len(), 17);
        assert_eq!(path[0], pts[0]);
        assert!((path[8].0 - 50.0).abs() < 1e-9 && (path[8].1 - 10.0).abs() < 1e-9);
        assert!((path[16].0 - 100.0).abs() < 1e-9);
        assert!(path.iter().all(|(_, y)| (0.0..=100.0).contains(y)));
    }

    #[test]
    fn y_mapping_is_zero_based() {
        let area = PlotArea::for_canvas(400.0, 300.0, 0.0);
        assert_eq!(area.y_for(0.0, 10.0), area.bottom);
        assert_eq!(area.y_for(10.0, 10.0), area.top);
        assert_eq!(area.y_for(5.0, 0.0), area.bottom);
    }
}
