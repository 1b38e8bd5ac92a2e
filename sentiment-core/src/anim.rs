/// easeInOutQuart over `t` in [0, 1].
pub fn ease_in_out_quart(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        8.0 * t * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
    }
}

/// Time-based progress of a one-shot animation, started on the first frame it sees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    duration_ms: f64,
    started_at: Option<f64>,
}

impl Animation {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms: duration_ms.max(0.0),
            started_at: None,
        }
    }

    /// Already at its end state; used for non-animated redraws.
    pub fn finished() -> Self {
        Self {
            duration_ms: 0.0,
            started_at: Some(f64::NEG_INFINITY),
        }
    }

    /// Linear progress in [0, 1].
    pub fn linear(&mut self, now_ms: f64) -> f64 {
        let start = *self.started_at.get_or_insert(now_ms);
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - start) / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn eased(&mut self, now_ms: f64) -> f64 {
        ease_in_out_quart(self.linear(now_ms))
    }

    pub fn is_done(&self, now_ms: f64) -> bool {
        match self.started_at {
            Some(start) => self.duration_ms <= 0.0 || now_ms - start >= self.duration_ms,
            None => self.duration_ms <= 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterFrame {
    pub value: i64,
    pub done: bool,
}

/// Integer count-up driven by animation-frame timestamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterAnimation {
    from: i64,
    to: i64,
    timeline: Animation,
}

impl CounterAnimation {
    pub fn new(from: i64, to: i64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            timeline: Animation::new(duration_ms),
        }
    }

    pub fn frame(&mut self, now_ms: f64) -> CounterFrame {
        let progress = self.timeline.linear(now_ms);
        if progress >= 1.0 {
            return CounterFrame {
                value: self.to,
                done: true,
            };
        }
        let span = (self.to - self.from) as f64;
        CounterFrame {
            value: (progress * span + self.from as f64).floor() as i64,
            done: false,
        }
    }
}
