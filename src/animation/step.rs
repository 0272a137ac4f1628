use crate::{
    animation::{
        anchor::Anchor,
        ease::Ease,
        property::{Lerp, PropertyState},
    },
    foundation::{
        core::{ElementId, Millis},
        error::{FolioError, FolioResult},
    },
};

/// Drive `targets` from `from` to `to` over `duration`, one element after another.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tween {
    /// Targets in document order; stagger follows this order.
    pub targets: Vec<ElementId>,
    pub from: PropertyState,
    pub to: PropertyState,
    pub duration: Millis,
    #[serde(default)]
    pub ease: Ease,
    #[serde(default)]
    pub stagger: Millis,
    #[serde(default)]
    pub delay: Millis,
}

/// A tween bound to a scroll activation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationStep {
    #[serde(flatten)]
    pub tween: Tween,
    pub activation: Activation,
}

impl AnimationStep {
    pub fn new(tween: Tween, activation: Activation) -> Self {
        Self { tween, activation }
    }

    pub fn validate(&self) -> FolioResult<()> {
        self.tween.validate()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activation {
    pub trigger: ElementId,
    pub start: Anchor,
    /// Defaults to `"bottom top"`, the point where the trigger leaves the viewport.
    #[serde(default)]
    pub end: Option<Anchor>,
    pub mode: ActivationMode,
}

impl Activation {
    pub const DEFAULT_END: Anchor = Anchor::new(1.0, 0.0);

    pub fn end_or_default(&self) -> Anchor {
        self.end.unwrap_or(Self::DEFAULT_END)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ActivationMode {
    /// Clock-driven playback once the start line is crossed.
    OneShot { actions: ToggleActions },
    /// Progress follows scroll forward and latches; scrolling back keeps the reveal.
    Scrub {
        #[serde(default)]
        smoothing: Millis,
    },
    /// Progress follows scroll 1:1 in both directions.
    ScrubReversible {
        #[serde(default)]
        smoothing: Millis,
    },
}

impl ActivationMode {
    pub fn one_shot() -> Self {
        Self::OneShot {
            actions: ToggleActions::ONCE,
        }
    }

    pub fn replay() -> Self {
        Self::OneShot {
            actions: ToggleActions::REPLAY,
        }
    }

    /// Scroll-tied progress that never moves backwards.
    pub fn scrub_latched(smoothing: Millis) -> Self {
        Self::Scrub { smoothing }
    }

    /// Scroll-tied progress in both directions, as parallax layers use.
    pub fn scrub_reversible(smoothing: Millis) -> Self {
        Self::ScrubReversible { smoothing }
    }

    pub fn is_scrub(self) -> bool {
        !matches!(self, Self::OneShot { .. })
    }
}

/// What a one-shot step does on each crossing of its start/end lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ToggleActions {
    pub on_enter: ToggleAction,
    pub on_leave: ToggleAction,
    pub on_enter_back: ToggleAction,
    pub on_leave_back: ToggleAction,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToggleAction {
    Play,
    Reverse,
    Reset,
    Restart,
    None,
}

impl ToggleActions {
    /// `play none none none`: applies once, stays revealed in both directions.
    pub const ONCE: Self = Self {
        on_enter: ToggleAction::Play,
        on_leave: ToggleAction::None,
        on_enter_back: ToggleAction::None,
        on_leave_back: ToggleAction::None,
    };

    /// `play none none reset`: snaps back to `from` when scrolled back above the start.
    pub const REPLAY: Self = Self {
        on_enter: ToggleAction::Play,
        on_leave: ToggleAction::None,
        on_enter_back: ToggleAction::None,
        on_leave_back: ToggleAction::Reset,
    };

    /// `play none none reverse`.
    pub const REVERSE_BACK: Self = Self {
        on_enter: ToggleAction::Play,
        on_leave: ToggleAction::None,
        on_enter_back: ToggleAction::None,
        on_leave_back: ToggleAction::Reverse,
    };

    /// `play reverse play reverse`: only visible while inside the start/end band.
    pub const WHILE_INSIDE: Self = Self {
        on_enter: ToggleAction::Play,
        on_leave: ToggleAction::Reverse,
        on_enter_back: ToggleAction::Play,
        on_leave_back: ToggleAction::Reverse,
    };

    pub fn parse(s: &str) -> FolioResult<Self> {
        let actions = s
            .split_whitespace()
            .map(|tok| match tok {
                "play" => Ok(ToggleAction::Play),
                "reverse" => Ok(ToggleAction::Reverse),
                "reset" => Ok(ToggleAction::Reset),
                "restart" => Ok(ToggleAction::Restart),
                "none" => Ok(ToggleAction::None),
                other => Err(FolioError::configuration(format!(
                    "unknown toggle action '{other}'"
                ))),
            })
            .collect::<FolioResult<Vec<_>>>()?;
        let &[on_enter, on_leave, on_enter_back, on_leave_back] = actions.as_slice() else {
            return Err(FolioError::configuration(format!(
                "toggle actions '{s}' must name exactly four actions"
            )));
        };
        Ok(Self {
            on_enter,
            on_leave,
            on_enter_back,
            on_leave_back,
        })
    }
}

impl std::fmt::Display for ToggleActions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn name(a: ToggleAction) -> &'static str {
            match a {
                ToggleAction::Play => "play",
                ToggleAction::Reverse => "reverse",
                ToggleAction::Reset => "reset",
                ToggleAction::Restart => "restart",
                ToggleAction::None => "none",
            }
        }
        write!(
            f,
            "{} {} {} {}",
            name(self.on_enter),
            name(self.on_leave),
            name(self.on_enter_back),
            name(self.on_leave_back)
        )
    }
}

impl TryFrom<String> for ToggleActions {
    type Error = FolioError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ToggleActions> for String {
    fn from(a: ToggleActions) -> Self {
        a.to_string()
    }
}

impl Tween {
    pub fn new(
        targets: Vec<ElementId>,
        from: PropertyState,
        to: PropertyState,
        duration: Millis,
    ) -> Self {
        Self {
            targets,
            from,
            to,
            duration,
            ease: Ease::default(),
            stagger: Millis::ZERO,
            delay: Millis::ZERO,
        }
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn stagger(mut self, stagger: Millis) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn delay(mut self, delay: Millis) -> Self {
        self.delay = delay;
        self
    }

    pub fn validate(&self) -> FolioResult<()> {
        if !self.from.same_keys(&self.to) {
            let from: Vec<_> = self.from.keys().collect();
            let to: Vec<_> = self.to.keys().collect();
            return Err(FolioError::configuration(format!(
                "from/to property keys differ: {from:?} vs {to:?}"
            )));
        }
        self.from.validate()?;
        self.to.validate()?;
        Ok(())
    }

    /// Length of the whole step including every element's stagger offset.
    pub fn total_duration(&self) -> Millis {
        let n = self.targets.len().saturating_sub(1) as u64;
        Millis(self.duration.0.saturating_add(self.stagger.0.saturating_mul(n)))
    }

    /// Local progress of the `index`-th target for step progress `progress`.
    ///
    /// Element `i`'s window starts at `i * stagger / total` and lasts `duration / total`.
    pub fn element_progress(&self, index: usize, progress: f64) -> f64 {
        let total = self.total_duration().as_f64();
        if total <= 0.0 {
            return if progress > 0.0 { 1.0 } else { 0.0 };
        }
        let p = progress.clamp(0.0, 1.0);
        let start = (index as f64 * self.stagger.as_f64()).min(total);
        let duration = self.duration.as_f64();
        if duration <= 0.0 {
            return if p * total >= start { 1.0 } else { 0.0 };
        }
        ((p * total - start) / duration).clamp(0.0, 1.0)
    }

    /// Where element `index`'s window starts, as a fraction of the whole step.
    pub fn element_window_start(&self, index: usize) -> f64 {
        let total = self.total_duration().as_f64();
        if total <= 0.0 {
            return 0.0;
        }
        ((index as f64 * self.stagger.as_f64()) / total).clamp(0.0, 1.0)
    }

    /// Eased state of the `index`-th target at step progress `progress`.
    pub fn state_at(&self, index: usize, progress: f64) -> PropertyState {
        let t = self.ease.apply(self.element_progress(index, progress));
        PropertyState::lerp(&self.from, &self.to, t)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/step.rs"]
mod tests;
