use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use sentiment_core::anim::Animation;
use sentiment_core::chart::{ChartData, ChartPalette, Frame};
use sentiment_core::ChartInstance;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement, MouseEvent};

use crate::canvas::CanvasBackend;

/// Milliseconds on the same clock requestAnimationFrame reports.
pub(crate) fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

struct LiveChart {
    backend: CanvasBackend,
    data: ChartData,
    palette: ChartPalette,
    animation: Animation,
    animation_ms: f64,
    width: f64,
    height: f64,
    pointer: Option<(f64, f64)>,
    destroyed: bool,
    frame_requested: bool,
}

impl LiveChart {
    fn draw(&mut self, now: f64) {
        if self.destroyed {
            return;
        }
        let frame = Frame {
            width: self.width,
            height: self.height,
            palette: self.palette,
            progress: self.animation.eased(now),
            pointer: self.pointer.filter(|_| self.data.is_interactive()),
        };
        self.data.scene(&frame).render(&mut self.backend);
    }

    /// Size the chart to its container, the way a responsive chart without a
    /// fixed aspect ratio does.
    fn fit(&mut self) {
        let canvas = self.backend.canvas();
        let (mut width, mut height) = canvas
            .parent_element()
            .map(|p| (p.client_width() as f64, p.client_height() as f64))
            .unwrap_or((0.0, 0.0));
        if width <= 0.0 || height <= 0.0 {
            let rect = canvas.get_bounding_client_rect();
            width = rect.width();
            height = rect.height();
        }
        if width <= 0.0 || height <= 0.0 {
            width = canvas.width() as f64;
            height = canvas.height() as f64;
        }
        self.width = width.max(1.0);
        self.height = height.max(1.0);

        let style = canvas.style();
        let _ = style.set_property("width", &format!("{}px", self.width));
        let _ = style.set_property("height", &format!("{}px", self.height));
    }
}

fn request_frame(inner: Rc<RefCell<LiveChart>>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let callback = Closure::once_into_js(move |timestamp: f64| on_frame(inner, timestamp));
    window.request_animation_frame(callback.unchecked_ref())?;
    Ok(())
}

fn on_frame(inner: Rc<RefCell<LiveChart>>, timestamp: f64) {
    let more = {
        let mut chart = inner.borrow_mut();
        chart.frame_requested = false;
        if chart.destroyed {
            return;
        }
        chart.draw(timestamp);
        !chart.animation.is_done(timestamp)
    };
    if more {
        inner.borrow_mut().frame_requested = true;
        if let Err(err) = request_frame(inner.clone()) {
            warn!("animation frame request failed: {err:?}");
            inner.borrow_mut().frame_requested = false;
        }
    }
}

type PointerListener = (&'static str, Closure<dyn FnMut(MouseEvent)>);

/// One live chart bound to a canvas.
pub struct ChartHandle {
    inner: Rc<RefCell<LiveChart>>,
    listeners: Vec<PointerListener>,
}

impl ChartHandle {
    pub(crate) fn create(
        canvas: HtmlCanvasElement,
        data: ChartData,
        palette: ChartPalette,
        animation_ms: f64,
    ) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let inner = Rc::new(RefCell::new(LiveChart {
            backend: CanvasBackend::new(canvas, ctx),
            data,
            palette,
            animation: Animation::new(animation_ms),
            animation_ms,
            width: 1.0,
            height: 1.0,
            pointer: None,
            destroyed: false,
            frame_requested: false,
        }));
        inner.borrow_mut().fit();

        let mut handle = Self {
            inner,
            listeners: Vec::new(),
        };
        if handle.inner.borrow().data.is_interactive() {
            handle.attach_pointer_events()?;
        }
        handle.animate()?;
        Ok(handle)
    }

    fn attach_pointer_events(&mut self) -> Result<(), JsValue> {
        let canvas = self.inner.borrow().backend.canvas().clone();

        // mousemove
        {
            let inner = self.inner.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let x = event.client_x() as f64 - rect.left();
                let y = event.client_y() as f64 - rect.top();
                let mut chart = inner.borrow_mut();
                chart.pointer = Some((x, y));
                chart.draw(now_ms());
            }));
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            self.listeners.push(("mousemove", closure));
        }

        // mouseleave
        {
            let inner = self.inner.clone();
            let closure = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |_: MouseEvent| {
                let mut chart = inner.borrow_mut();
                chart.pointer = None;
                chart.draw(now_ms());
            }));
            canvas.add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref())?;
            self.listeners.push(("mouseleave", closure));
        }

        Ok(())
    }

    /// Replay the entry animation from the start.
    pub(crate) fn animate(&self) -> Result<(), JsValue> {
        {
            let mut chart = self.inner.borrow_mut();
            chart.animation = Animation::new(chart.animation_ms);
            if chart.frame_requested {
                return Ok(());
            }
            chart.frame_requested = true;
        }
        request_frame(self.inner.clone()).inspect_err(|_| {
            self.inner.borrow_mut().frame_requested = false;
        })
    }

    /// Switch colours and repaint at the final state.
    pub(crate) fn restyle(&self, palette: ChartPalette) {
        let mut chart = self.inner.borrow_mut();
        chart.palette = palette;
        chart.animation = Animation::finished();
        chart.draw(now_ms());
    }

    pub(crate) fn update_primary(&self, values: &[f64]) -> Result<(), JsValue> {
        self.inner.borrow_mut().data.replace_primary(values);
        self.animate()
    }

    pub(crate) fn resize(&self) {
        let mut chart = self.inner.borrow_mut();
        chart.fit();
        chart.draw(now_ms());
    }

    /// Trigger a PNG download of the current bitmap.
    pub(crate) fn export_png(&self, filename: &str) -> Result<(), JsValue> {
        let url = self
            .inner
            .borrow()
            .backend
            .canvas()
            .to_data_url_with_type("image/png")?;
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let link = document
            .create_element("a")?
            .dyn_into::<HtmlAnchorElement>()?;
        link.set_download(filename);
        link.set_href(&url);
        link.click();
        Ok(())
    }
}

impl ChartInstance for ChartHandle {
    fn destroy(&mut self) {
        let mut chart = self.inner.borrow_mut();
        if chart.destroyed {
            return;
        }
        chart.destroyed = true;
        let canvas = chart.backend.canvas().clone();
        for (event, closure) in self.listeners.drain(..) {
            if let Err(err) =
                canvas.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            {
                debug!("could not detach {event} from #{}: {err:?}", canvas.id());
            }
        }
        chart.backend.clear();
    }
}
