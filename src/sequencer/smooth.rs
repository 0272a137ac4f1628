use crate::foundation::{core::Millis, error::FolioResult};

/// Default glide time for one wheel gesture.
pub const DEFAULT_DURATION: Millis = Millis(1200);

/// Exponential ease-out used for the glide, capped at 1.
pub fn glide(t: f64) -> f64 {
    (1.001 - 2f64.powf(-10.0 * t)).min(1.0)
}

/// Inertial scrolling: the rendered offset glides toward the latest wheel target.
#[derive(Clone, Debug)]
pub struct SmoothScroll {
    duration: Millis,
    max_offset: f64,
    from: f64,
    target: f64,
    current: f64,
    started: Option<Millis>,
}

impl SmoothScroll {
    pub fn new(max_offset: f64) -> Self {
        Self {
            duration: DEFAULT_DURATION,
            max_offset: max_offset.max(0.0),
            from: 0.0,
            target: 0.0,
            current: 0.0,
            started: None,
        }
    }

    pub fn with_duration(mut self, duration: Millis) -> Self {
        self.duration = duration;
        self
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.started.is_none()
    }

    /// Page height changed: clamp the target into the new range.
    pub fn set_max_offset(&mut self, max_offset: f64) {
        self.max_offset = max_offset.max(0.0);
        self.target = self.target.min(self.max_offset);
        self.current = self.current.min(self.max_offset);
    }

    /// Restart the glide from wherever it is now.
    pub fn scroll_to(&mut self, target: f64, now: Millis) {
        if !target.is_finite() {
            return;
        }
        self.from = self.current;
        self.target = target.clamp(0.0, self.max_offset);
        self.started = Some(now);
    }

    pub fn scroll_by(&mut self, delta: f64, now: Millis) {
        self.scroll_to(self.target + delta, now);
    }

    /// Advance the glide; returns the offset to render.
    pub fn on_frame(&mut self, now: Millis) -> f64 {
        let Some(started) = self.started else {
            return self.current;
        };
        let t = if self.duration == Millis::ZERO {
            1.0
        } else {
            now.saturating_sub(started).as_f64() / self.duration.as_f64()
        };
        if t >= 1.0 {
            self.current = self.target;
            self.started = None;
        } else {
            self.current = self.from + (self.target - self.from) * glide(t);
        }
        self.current
    }
}

/// Capability check for inertial scrolling on the host.
pub trait ScrollProbe {
    /// Any error means the host cannot run the glide.
    fn probe(&self) -> FolioResult<()>;
}

#[derive(Clone, Debug)]
pub enum ScrollDriver {
    Smooth(SmoothScroll),
    /// Host scrolling is used as is.
    Native { offset: f64 },
}

impl ScrollDriver {
    /// Pick the inertial driver when the host supports it, native scrolling otherwise.
    ///
    /// Any probe failure degrades to native scrolling; the reason is only logged.
    pub fn init(probe: &dyn ScrollProbe, max_offset: f64) -> Self {
        match probe.probe() {
            Ok(()) => Self::Smooth(SmoothScroll::new(max_offset)),
            Err(err) => {
                tracing::debug!(%err, "smooth scrolling unavailable, using native scroll");
                Self::Native { offset: 0.0 }
            }
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native { .. })
    }

    /// Wheel or programmatic scroll request.
    pub fn scroll_to(&mut self, target: f64, now: Millis) {
        match self {
            Self::Smooth(s) => s.scroll_to(target, now),
            Self::Native { offset } => {
                if target.is_finite() {
                    *offset = target.max(0.0);
                }
            }
        }
    }

    pub fn on_frame(&mut self, now: Millis) -> f64 {
        match self {
            Self::Smooth(s) => s.on_frame(now),
            Self::Native { offset } => *offset,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequencer/smooth.rs"]
mod tests;
