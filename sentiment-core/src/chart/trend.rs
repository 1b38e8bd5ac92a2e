use super::axis::{axes, nice_scale, smooth, AxisSpec, PlotArea};
use super::legend::legend;
use super::payload::TrendInput;
use super::scene::{CircleShape, Scene, Shape, Stroke};
use super::tooltip::{Tooltip, TooltipLine};
use super::Frame;
use crate::sentiment::Sentiment;

const LEGEND_HEIGHT: f64 = 40.0;
const TENSION: f64 = 0.4;
const SMOOTH_STEPS: usize = 8;
const POINT_RADIUS: f64 = 4.0;
const POINT_HOVER_RADIUS: f64 = 6.0;
const LINE_WIDTH: f64 = 3.0;

pub fn plot_area(width: f64, height: f64) -> PlotArea {
    PlotArea::for_canvas(width, height, LEGEND_HEIGHT)
}

/// Evenly spaced period positions, first and last on the plot edges.
pub fn x_positions(count: usize, area: &PlotArea) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![(area.left + area.right) / 2.0],
        n => {
            let step = area.width() / (n - 1) as f64;
            (0..n).map(|i| area.left + step * i as f64).collect()
        }
    }
}

/// Period nearest the pointer anywhere inside the plot (index mode, no intersect).
pub fn hovered_index(input: &TrendInput, frame: &Frame) -> Option<usize> {
    let (x, y) = frame.pointer?;
    let area = plot_area(frame.width, frame.height);
    if !area.contains(x, y) {
        return None;
    }
    x_positions(input.labels.len(), &area)
        .iter()
        .enumerate()
        .min_by(|a, b| (a.1 - x).abs().total_cmp(&(b.1 - x).abs()))
        .map(|(i, _)| i)
}

pub fn tooltip(input: &TrendInput, index: usize) -> Tooltip {
    let lines = Sentiment::ALL
        .iter()
        .filter_map(|s| {
            input
                .series(*s)
                .get(index)
                .map(|v| TooltipLine::with_swatch(format!("{}: {}", s.label(), v), s.color()))
        })
        .collect();
    Tooltip {
        title: input.labels.get(index).cloned(),
        lines,
    }
}

pub fn scene(input: &TrendInput, frame: &Frame) -> Scene {
    let mut scene = Scene::new(frame.width, frame.height);
    let area = plot_area(frame.width, frame.height);
    let (y_max, y_step) = nice_scale(input.max_value(), 5);
    let xs = x_positions(input.labels.len(), &area);
    let categories: Vec<(f64, String)> = xs.iter().copied().zip(input.labels.iter().cloned()).collect();

    scene.extend(axes(
        &area,
        &AxisSpec {
            categories: &categories,
            x_title: "Time Period",
            y_title: "Count",
            y_max,
            y_step,
            x_grid: true,
        },
        &frame.palette,
    ));

    let hovered = hovered_index(input, frame);
    let mut fills = Vec::new();
    let mut lines = Vec::new();
    let mut points = Vec::new();
    for sentiment in Sentiment::ALL {
        let color = sentiment.color();
        // entry animation grows lines up from the baseline
        let pts: Vec<(f64, f64)> = input
            .series(sentiment)
            .iter()
            .zip(&xs)
            .map(|(v, x)| {
                let target = area.y_for(*v, y_max);
                (*x, area.bottom - (area.bottom - target) * frame.progress)
            })
            .collect();
        if pts.is_empty() {
            continue;
        }

        let path = smooth(&pts, TENSION, SMOOTH_STEPS, &area);
        if path.len() >= 2 {
            let mut polygon = path.clone();
            polygon.push((path[path.len() - 1].0, area.bottom));
            polygon.push((path[0].0, area.bottom));
            fills.push(Shape::Polygon {
                points: polygon,
                fill: color.with_alpha(0.1).css(),
            });
            lines.push(Shape::Polyline {
                points: path,
                stroke: Stroke::new(color.css(), LINE_WIDTH),
            });
        }
        for (i, (x, y)) in pts.iter().enumerate() {
            points.push(Shape::Circle(CircleShape {
                cx: *x,
                cy: *y,
                r: if hovered == Some(i) {
                    POINT_HOVER_RADIUS
                } else {
                    POINT_RADIUS
                },
                fill: color.css(),
                stroke: Some(Stroke::new("#fff", 2.0)),
            }));
        }
    }
    scene.extend(fills);
    scene.extend(lines);
    scene.extend(points);

    let entries: Vec<(&str, _)> = Sentiment::ALL
        .iter()
        .map(|s| (s.label(), s.color()))
        .collect();
    scene.extend(legend(
        &entries,
        LEGEND_HEIGHT / 2.0,
        frame.width,
        &frame.palette,
    ));

    if let (Some(i), Some(pointer)) = (hovered, frame.pointer) {
        scene.extend(tooltip(input, i).shapes(pointer, frame.width, frame.height));
    }
    scene
}
