#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
    Bottom,
}

impl TextBaseline {
    pub fn as_str(self) -> &'static str {
        match self {
            TextBaseline::Top => "top",
            TextBaseline::Middle => "middle",
            TextBaseline::Bottom => "bottom",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
        }
    }
}

/// Ring segment. Angles in radians, clockwise from 3 o'clock (canvas convention).
#[derive(Debug, Clone, PartialEq)]
pub struct ArcShape {
    pub cx: f64,
    pub cy: f64,
    pub inner: f64,
    pub outer: f64,
    pub start: f64,
    pub end: f64,
    pub fill: String,
    pub stroke: Option<Stroke>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectShape {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub radius: f64,
    pub fill: String,
    pub stroke: Option<Stroke>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleShape {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: String,
    pub stroke: Option<Stroke>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextShape {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub color: String,
    pub font: String,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    /// Radians around (x, y); axis titles use -PI/2.
    pub rotation: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Arc(ArcShape),
    Polyline {
        points: Vec<(f64, f64)>,
        stroke: Stroke,
    },
    Polygon {
        points: Vec<(f64, f64)>,
        fill: String,
    },
    Rect(RectShape),
    Circle(CircleShape),
    Segments {
        segments: Vec<(f64, f64, f64, f64)>,
        stroke: Stroke,
    },
    Text(TextShape),
}

/// Drawing surface a scene is replayed onto.
pub trait RendererBackend {
    fn begin_frame(&mut self, width: f64, height: f64);
    fn fill_arc(&mut self, arc: &ArcShape);
    fn draw_polyline(&mut self, points: &[(f64, f64)], stroke: &Stroke);
    fn fill_polygon(&mut self, points: &[(f64, f64)], fill: &str);
    fn fill_rect(&mut self, rect: &RectShape);
    fn fill_circle(&mut self, circle: &CircleShape);
    fn draw_segments(&mut self, segments: &[(f64, f64, f64, f64)], stroke: &Stroke);
    fn draw_text(&mut self, text: &TextShape);
}

/// One frame of a chart, in paint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub shapes: Vec<Shape>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            shapes: Vec::new(),
        }
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn extend(&mut self, shapes: impl IntoIterator<Item = Shape>) {
        self.shapes.extend(shapes);
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextShape> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Text(t) => Some(t),
            _ => None,
        })
    }

    pub fn arcs(&self) -> impl Iterator<Item = &ArcShape> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Arc(a) => Some(a),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectShape> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Rect(r) => Some(r),
            _ => None,
        })
    }

    pub fn render<B: RendererBackend + ?Sized>(&self, backend: &mut B) {
        backend.begin_frame(self.width, self.height);
        for shape in &self.shapes {
            match shape {
                Shape::Arc(arc) => backend.fill_arc(arc),
                Shape::Polyline { points, stroke } => backend.draw_polyline(points, stroke),
                Shape::Polygon { points, fill } => backend.fill_polygon(points, fill),
                Shape::Rect(rect) => backend.fill_rect(rect),
                Shape::Circle(circle) => backend.fill_circle(circle),
                Shape::Segments { segments, stroke } => backend.draw_segments(segments, stroke),
                Shape::Text(text) => backend.draw_text(text),
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Backend that logs what it was asked to draw.
    #[derive(Default)]
    pub struct RecordingBackend {
        pub frames: usize,
        pub calls: Vec<String>,
    }

    impl RendererBackend for RecordingBackend {
        fn begin_frame(&mut self, width: f64, height: f64) {
            self.frames += 1;
            self.calls.push(format!("frame {width}x{height}"));
        }

        fn fill_arc(&mut self, arc: &ArcShape) {
            self.calls.push(format!("arc {}", arc.fill));
        }

        fn draw_polyline(&mut self, points: &[(f64, f64)], stroke: &Stroke) {
            self.calls
                .push(format!("polyline {} pts {}", points.len(), stroke.color));
        }

        fn fill_polygon(&mut self, points: &[(f64, f64)], fill: &str) {
            self.calls.push(format!("polygon {} pts {fill}", points.len()));
        }

        fn fill_rect(&mut self, rect: &RectShape) {
            self.calls.push(format!("rect {}", rect.fill));
        }

        fn fill_circle(&mut self, circle: &CircleShape) {
            self.calls.push(format!("circle {}", circle.fill));
        }

        fn draw_segments(&mut self, segments: &[(f64, f64, f64, f64)], stroke: &Stroke) {
            self.calls
                .push(format!("segments {} {}", segments.len(), stroke.color));
        }

        fn draw_text(&mut self, text: &TextShape) {
            self.calls.push(format!("text {}", text.text));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingBackend;
    use super::*;

    #[test]
    fn render_replays_shapes_in_order() {
        let mut scene = Scene::new(200.0, 100.0);
        scene.push(Shape::Polygon {
            points: vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)],
            fill: "red".into(),
        });
        scene.push(Shape::Text(TextShape {
            x: 1.0,
            y: 1.0,
            text: "42%".into(),
            color: "#000".into(),
            font: "bold 14px Inter".into(),
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
            rotation: 0.0,
        }));
        let mut backend = RecordingBackend::default();
        scene.render(&mut backend);
        assert_eq!(
            backend.calls,
            vec!["frame 200x100", "polygon 3 pts red", "text 42%"]
        );
        assert_eq!(scene.texts().count(), 1);
    }
}
