use std::f64::consts::PI;

use sentiment_core::chart::scene::{ArcShape, CircleShape, RectShape, Stroke, TextShape};
use sentiment_core::chart::RendererBackend;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Replays scenes onto a 2D canvas context at the device pixel ratio.
pub(crate) struct CanvasBackend {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pixel_ratio: f64,
}

impl CanvasBackend {
    pub(crate) fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        let pixel_ratio = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .filter(|r| *r > 0.0)
            .unwrap_or(1.0);
        Self {
            canvas,
            ctx,
            pixel_ratio,
        }
    }

    pub(crate) fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Wipe the bitmap without touching its size.
    pub(crate) fn clear(&self) {
        let _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn apply_stroke(&self, stroke: &Stroke) {
        self.ctx.set_stroke_style_str(&stroke.color);
        self.ctx.set_line_width(stroke.width);
        self.ctx.stroke();
    }

    fn rounded_rect_path(&self, rect: &RectShape) {
        let ctx = &self.ctx;
        let (x, y, w, h) = (rect.x, rect.y, rect.w, rect.h);
        let r = rect.radius.min(w / 2.0).min(h / 2.0).max(0.0);
        ctx.begin_path();
        if r <= 0.0 {
            ctx.rect(x, y, w, h);
            return;
        }
        ctx.move_to(x + r, y);
        ctx.line_to(x + w - r, y);
        ctx.quadratic_curve_to(x + w, y, x + w, y + r);
        ctx.line_to(x + w, y + h - r);
        ctx.quadratic_curve_to(x + w, y + h, x + w - r, y + h);
        ctx.line_to(x + r, y + h);
        ctx.quadratic_curve_to(x, y + h, x, y + h - r);
        ctx.line_to(x, y + r);
        ctx.quadratic_curve_to(x, y, x + r, y);
        ctx.close_path();
    }
}

impl RendererBackend for CanvasBackend {
    fn begin_frame(&mut self, width: f64, height: f64) {
        let w = (width * self.pixel_ratio).round().max(1.0) as u32;
        let h = (height * self.pixel_ratio).round().max(1.0) as u32;
        if self.canvas.width() != w {
            self.canvas.set_width(w);
        }
        if self.canvas.height() != h {
            self.canvas.set_height(h);
        }
        self.clear();
        let _ = self
            .ctx
            .set_transform(self.pixel_ratio, 0.0, 0.0, self.pixel_ratio, 0.0, 0.0);
    }

    fn fill_arc(&mut self, arc: &ArcShape) {
        if arc.end <= arc.start || arc.outer <= 0.0 {
            return;
        }
        let ctx = &self.ctx;
        ctx.begin_path();
        let _ = ctx.arc(arc.cx, arc.cy, arc.outer, arc.start, arc.end);
        if arc.inner > 0.0 {
            let _ = ctx.arc_with_anticlockwise(arc.cx, arc.cy, arc.inner, arc.end, arc.start, true);
        } else {
            ctx.line_to(arc.cx, arc.cy);
        }
        ctx.close_path();
        ctx.set_fill_style_str(&arc.fill);
        ctx.fill();
        if let Some(stroke) = &arc.stroke {
            self.apply_stroke(stroke);
        }
    }

    fn draw_polyline(&mut self, points: &[(f64, f64)], stroke: &Stroke) {
        if points.len() < 2 {
            return;
        }
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(points[0].0, points[0].1);
        for p in points.iter().skip(1) {
            ctx.line_to(p.0, p.1);
        }
        ctx.set_line_join("round");
        self.apply_stroke(stroke);
    }

    fn fill_polygon(&mut self, points: &[(f64, f64)], fill: &str) {
        if points.len() < 3 {
            return;
        }
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(points[0].0, points[0].1);
        for p in points.iter().skip(1) {
            ctx.line_to(p.0, p.1);
        }
        ctx.close_path();
        ctx.set_fill_style_str(fill);
        ctx.fill();
    }

    fn fill_rect(&mut self, rect: &RectShape) {
        if rect.w <= 0.0 || rect.h <= 0.0 {
            return;
        }
        self.rounded_rect_path(rect);
        self.ctx.set_fill_style_str(&rect.fill);
        self.ctx.fill();
        if let Some(stroke) = &rect.stroke {
            self.apply_stroke(stroke);
        }
    }

    fn fill_circle(&mut self, circle: &CircleShape) {
        let ctx = &self.ctx;
        ctx.begin_path();
        let _ = ctx.arc(circle.cx, circle.cy, circle.r, 0.0, 2.0 * PI);
        ctx.set_fill_style_str(&circle.fill);
        ctx.fill();
        if let Some(stroke) = &circle.stroke {
            self.apply_stroke(stroke);
        }
    }

    fn draw_segments(&mut self, segments: &[(f64, f64, f64, f64)], stroke: &Stroke) {
        if segments.is_empty() {
            return;
        }
        let ctx = &self.ctx;
        ctx.begin_path();
        for (x1, y1, x2, y2) in segments {
            ctx.move_to(*x1, *y1);
            ctx.line_to(*x2, *y2);
        }
        self.apply_stroke(stroke);
    }

    fn draw_text(&mut self, text: &TextShape) {
        let ctx = &self.ctx;
        ctx.save();
        let _ = ctx.translate(text.x, text.y);
        if text.rotation != 0.0 {
            let _ = ctx.rotate(text.rotation);
        }
        ctx.set_font(&text.font);
        ctx.set_text_align(text.align.as_str());
        ctx.set_text_baseline(text.baseline.as_str());
        ctx.set_fill_style_str(&text.color);
        let _ = ctx.fill_text(&text.text, 0.0, 0.0);
        ctx.restore();
    }
}
