use crate::{
    animation::{step::AnimationStep, timeline::Timeline},
    foundation::{core::Millis, error::FolioError},
    sequencer::{
        context::{SequenceId, SequencerContext},
        host::{Layout, Surface},
    },
};

/// Everything one page section wants animated.
#[derive(Clone, Debug, Default)]
pub struct SectionPlan {
    pub name: String,
    pub steps: Vec<AnimationStep>,
    /// Plays once from mount time, independent of scroll.
    pub intro: Option<Timeline>,
}

impl SectionPlan {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn step(mut self, step: AnimationStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn steps(mut self, steps: impl IntoIterator<Item = AnimationStep>) -> Self {
        self.steps.extend(steps);
        self
    }

    pub fn intro(mut self, timeline: Timeline) -> Self {
        self.intro = Some(timeline);
        self
    }
}

/// A mounted section: owns its sequencer context and tears it down on unmount.
#[derive(Debug)]
pub struct Section {
    ctx: SequencerContext,
    sequences: Vec<SequenceId>,
    skipped: Vec<(usize, FolioError)>,
}

impl Section {
    /// Mount every step as its own sequence, so a malformed step only skips itself.
    #[tracing::instrument(skip_all, fields(section = %plan.name))]
    pub fn mount(plan: SectionPlan, layout: &dyn Layout, now: Millis) -> Self {
        let mut ctx = SequencerContext::new(plan.name);
        let mut sequences = Vec::with_capacity(plan.steps.len() + 1);
        let mut skipped = Vec::new();

        if let Some(intro) = plan.intro {
            match ctx.register_timeline(intro, now) {
                Ok(id) => sequences.push(id),
                Err(err) => {
                    tracing::warn!(%err, "intro timeline skipped");
                    skipped.push((usize::MAX, err));
                }
            }
        }
        for (i, step) in plan.steps.into_iter().enumerate() {
            match ctx.register_sequence(vec![step], layout) {
                Ok(id) => sequences.push(id),
                Err(err) => {
                    tracing::warn!(step = i, %err, "step skipped");
                    skipped.push((i, err));
                }
            }
        }
        tracing::debug!(
            mounted = sequences.len(),
            skipped = skipped.len(),
            "section mounted"
        );
        Self {
            ctx,
            sequences,
            skipped,
        }
    }

    pub fn name(&self) -> &str {
        self.ctx.name()
    }

    pub fn mounted(&self) -> usize {
        self.sequences.len()
    }

    /// Steps rejected at mount, with their index in the plan.
    /// The intro timeline is reported as `usize::MAX`.
    pub fn skipped(&self) -> &[(usize, FolioError)] {
        &self.skipped
    }

    pub fn is_mounted(&self) -> bool {
        self.ctx.is_alive()
    }

    pub fn on_scroll(&mut self, offset: f64, surface: &mut dyn Surface) {
        self.ctx.on_scroll(offset, surface);
    }

    pub fn on_frame(&mut self, now: Millis, surface: &mut dyn Surface) {
        self.ctx.on_frame(now, surface);
    }

    pub fn refresh(&mut self, layout: &dyn Layout) {
        self.ctx.refresh(layout);
    }

    pub fn is_animating(&self) -> bool {
        self.sequences.iter().any(|id| self.ctx.is_animating(*id))
    }

    pub fn unmount(&mut self) {
        self.sequences.clear();
        self.ctx.dispose();
    }
}

/// Drives every mounted section from one scroll/frame source, in page order.
#[derive(Debug, Default)]
pub struct Page {
    sections: Vec<Section>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&mut self, plan: SectionPlan, layout: &dyn Layout, now: Millis) -> &Section {
        self.sections.push(Section::mount(plan, layout, now));
        &self.sections[self.sections.len() - 1]
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn on_scroll(&mut self, offset: f64, surface: &mut dyn Surface) {
        for s in &mut self.sections {
            s.on_scroll(offset, surface);
        }
    }

    pub fn on_frame(&mut self, now: Millis, surface: &mut dyn Surface) {
        for s in &mut self.sections {
            s.on_frame(now, surface);
        }
    }

    pub fn refresh(&mut self, layout: &dyn Layout) {
        for s in &mut self.sections {
            s.refresh(layout);
        }
    }

    pub fn unmount_all(&mut self) {
        for s in &mut self.sections {
            s.unmount();
        }
        self.sections.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequencer/section.rs"]
mod tests;
