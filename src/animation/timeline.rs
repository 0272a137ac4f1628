use crate::{
    animation::{property::PropertyState, step::Tween},
    foundation::{
        core::{ElementId, Millis},
        error::{FolioError, FolioResult},
    },
};

/// Where the next tween starts relative to the timeline built so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    /// Right after the previous entry ends.
    AfterPrevious,
    /// `ms` before the previous entry ends (`"-=0.4"`).
    Overlap(Millis),
    /// `ms` after the previous entry ends (`"+=0.4"`).
    Gap(Millis),
    /// Absolute offset from the timeline start.
    At(Millis),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimelineEntry {
    pub offset: Millis,
    pub tween: Tween,
}

impl TimelineEntry {
    pub fn end(&self) -> Millis {
        self.offset
            .saturating_add(self.tween.delay)
            .saturating_add(self.tween.total_duration())
    }

    /// Tween progress at timeline-local time `t`.
    pub fn progress_at(&self, t: Millis) -> f64 {
        let start = self.offset.saturating_add(self.tween.delay);
        if t < start {
            return 0.0;
        }
        let total = self.tween.total_duration();
        if total == Millis::ZERO {
            return 1.0;
        }
        (t.saturating_sub(start).as_f64() / total.as_f64()).clamp(0.0, 1.0)
    }
}

/// An ordered list of tweens sharing one clock.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(self, tween: Tween) -> Self {
        self.then_at(Position::AfterPrevious, tween)
    }

    pub fn then_at(mut self, position: Position, tween: Tween) -> Self {
        let prev_end = self.entries.last().map(TimelineEntry::end).unwrap_or(Millis::ZERO);
        let offset = match position {
            Position::AfterPrevious => prev_end,
            Position::Overlap(by) => prev_end.saturating_sub(by),
            Position::Gap(by) => prev_end.saturating_add(by),
            Position::At(at) => at,
        };
        self.entries.push(TimelineEntry { offset, tween });
        self
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn duration(&self) -> Millis {
        self.entries
            .iter()
            .map(TimelineEntry::end)
            .max()
            .unwrap_or(Millis::ZERO)
    }

    pub fn validate(&self) -> FolioResult<()> {
        for (i, e) in self.entries.iter().enumerate() {
            e.tween
                .validate()
                .map_err(|err| FolioError::configuration(format!("timeline entry {i}: {err}")))?;
        }
        Ok(())
    }

    /// Every target's state at timeline-local time `t`.
    ///
    /// Entries are applied in order, so a later entry touching the same element
    /// overrides the properties it drives, once it has started.
    pub fn sample(&self, t: Millis) -> Vec<(ElementId, PropertyState)> {
        let mut out: Vec<(ElementId, PropertyState)> = Vec::new();
        for entry in &self.entries {
            let started = t >= entry.offset.saturating_add(entry.tween.delay);
            let p = entry.progress_at(t);
            for (i, el) in entry.tween.targets.iter().enumerate() {
                let state = entry.tween.state_at(i, p);
                match out.iter_mut().find(|(id, _)| id == el) {
                    Some((_, existing)) if started => existing.merge(&state),
                    Some(_) => {}
                    None => out.push((*el, state)),
                }
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
