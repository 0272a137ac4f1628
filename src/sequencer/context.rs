use crate::{
    animation::{
        anchor::ScrollTrack,
        step::{ActivationMode, AnimationStep, ToggleAction, ToggleActions, Tween},
        timeline::Timeline,
    },
    foundation::{
        core::Millis,
        error::{FolioError, FolioResult},
    },
    sequencer::host::{Layout, Surface},
};

/// Handle returned by registration, used to unregister a sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SequenceId(pub u64);

/// Apply `tween` at `progress` to every target, staggered in target order.
pub fn activate(tween: &Tween, progress: f64, surface: &mut dyn Surface) -> FolioResult<()> {
    for (i, el) in tween.targets.iter().enumerate() {
        surface.apply(*el, &tween.state_at(i, progress))?;
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Zone {
    Before,
    Inside,
    After,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Idle,
    Forward,
    Backward,
}

#[derive(Clone, Debug)]
struct Playback {
    progress: f64,
    direction: Direction,
    delay_left: Millis,
    clock: Option<Millis>,
}

impl Playback {
    fn idle() -> Self {
        Self {
            progress: 0.0,
            direction: Direction::Idle,
            delay_left: Millis::ZERO,
            clock: None,
        }
    }
}

#[derive(Clone, Debug)]
enum Driver {
    Scrub {
        track: ScrollTrack,
        latch: bool,
        smoothing: Millis,
        target: f64,
        shown: f64,
        clock: Option<Millis>,
    },
    OneShot {
        start: f64,
        end: f64,
        zone: Zone,
        actions: ToggleActions,
        playback: Playback,
    },
}

#[derive(Clone, Debug)]
struct StepBinding {
    step: AnimationStep,
    driver: Driver,
    dirty: bool,
    failed: bool,
}

#[derive(Clone, Debug)]
struct TimelineBinding {
    timeline: Timeline,
    started_at: Millis,
    finished: bool,
    failed: bool,
}

#[derive(Clone, Debug)]
enum Binding {
    Step(StepBinding),
    Timeline(TimelineBinding),
}

/// Per-section registry of scroll-driven bindings.
///
/// Each mounted section owns one context and disposes it on unmount. After
/// [`SequencerContext::dispose`] every entry point is a no-op.
#[derive(Debug)]
pub struct SequencerContext {
    name: String,
    sequences: Vec<(SequenceId, Vec<Binding>)>,
    next_id: u64,
    offset: Option<f64>,
    alive: bool,
}

impl SequencerContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sequences: Vec::new(),
            next_id: 0,
            offset: None,
            alive: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    fn ensure_alive(&self) -> FolioResult<()> {
        if !self.alive {
            return Err(FolioError::validation(format!(
                "sequencer context '{}' has been disposed",
                self.name
            )));
        }
        Ok(())
    }

    fn allocate(&mut self) -> SequenceId {
        let id = SequenceId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Validate and bind `steps`. All-or-nothing: one malformed step rejects the sequence.
    #[tracing::instrument(skip(self, steps, layout), fields(section = %self.name, steps = steps.len()))]
    pub fn register_sequence(
        &mut self,
        steps: Vec<AnimationStep>,
        layout: &dyn Layout,
    ) -> FolioResult<SequenceId> {
        self.ensure_alive()?;
        let mut bindings = Vec::with_capacity(steps.len());
        for (i, step) in steps.into_iter().enumerate() {
            step.validate()
                .map_err(|e| FolioError::configuration(format!("step {i}: {e}")))?;
            let driver = build_driver(&step, layout)?;
            bindings.push(Binding::Step(StepBinding {
                step,
                driver,
                dirty: true,
                failed: false,
            }));
        }
        let id = self.allocate();
        if let Some(offset) = self.offset {
            for b in &mut bindings {
                if let Binding::Step(sb) = b {
                    scroll_binding(sb, offset);
                }
            }
        }
        tracing::debug!(id = id.0, "sequence registered");
        self.sequences.push((id, bindings));
        Ok(id)
    }

    /// Bind a timeline whose clock starts at `now`.
    #[tracing::instrument(skip(self, timeline), fields(section = %self.name))]
    pub fn register_timeline(
        &mut self,
        timeline: Timeline,
        now: Millis,
    ) -> FolioResult<SequenceId> {
        self.ensure_alive()?;
        timeline.validate()?;
        let id = self.allocate();
        self.sequences.push((
            id,
            vec![Binding::Timeline(TimelineBinding {
                timeline,
                started_at: now,
                finished: false,
                failed: false,
            })],
        ));
        Ok(id)
    }

    /// Recompute scroll tracks and thresholds after the layout changed.
    ///
    /// A step whose trigger is no longer measurable is skipped from now on.
    pub fn refresh(&mut self, layout: &dyn Layout) {
        if !self.alive {
            return;
        }
        for (id, bindings) in &mut self.sequences {
            for b in bindings.iter_mut() {
                let Binding::Step(sb) = b else { continue };
                match build_driver(&sb.step, layout) {
                    Ok(fresh) => {
                        sb.driver = carry_state(&sb.driver, fresh);
                        sb.dirty = true;
                    }
                    Err(err) => {
                        tracing::warn!(
                            section = %self.name,
                            sequence = id.0,
                            %err,
                            "skipping step after refresh"
                        );
                        sb.failed = true;
                    }
                }
            }
        }
        if let Some(offset) = self.offset {
            self.scroll_all(offset);
        }
    }

    /// Feed a new scroll offset: fires one-shot crossings and updates scrub targets.
    pub fn on_scroll(&mut self, offset: f64, surface: &mut dyn Surface) {
        if !self.alive || !offset.is_finite() {
            return;
        }
        self.offset = Some(offset);
        self.scroll_all(offset);
        self.flush(surface);
    }

    fn scroll_all(&mut self, offset: f64) {
        for (_, bindings) in &mut self.sequences {
            for b in bindings.iter_mut() {
                if let Binding::Step(sb) = b {
                    if !sb.failed {
                        scroll_binding(sb, offset);
                    }
                }
            }
        }
    }

    /// Advance clocks to `now`. Scrub bindings settle first, then one-shots and timelines.
    pub fn on_frame(&mut self, now: Millis, surface: &mut dyn Surface) {
        if !self.alive {
            return;
        }
        for (_, bindings) in &mut self.sequences {
            for b in bindings.iter_mut() {
                if let Binding::Step(sb) = b {
                    if !sb.failed && matches!(sb.driver, Driver::Scrub { .. }) {
                        tick_binding(sb, now);
                    }
                }
            }
        }
        self.flush(surface);
        for (_, bindings) in &mut self.sequences {
            for b in bindings.iter_mut() {
                match b {
                    Binding::Step(sb) => {
                        if !sb.failed && matches!(sb.driver, Driver::OneShot { .. }) {
                            tick_binding(sb, now);
                        }
                    }
                    Binding::Timeline(tb) => tick_timeline(tb, now, surface, &self.name),
                }
            }
        }
        self.flush(surface);
    }

    fn flush(&mut self, surface: &mut dyn Surface) {
        for (id, bindings) in &mut self.sequences {
            for b in bindings.iter_mut() {
                let Binding::Step(sb) = b else { continue };
                if sb.failed || !sb.dirty {
                    continue;
                }
                sb.dirty = false;
                let progress = match &sb.driver {
                    Driver::Scrub { shown, .. } => *shown,
                    Driver::OneShot { playback, .. } => playback.progress,
                };
                if let Err(err) = activate(&sb.step.tween, progress, surface) {
                    tracing::warn!(section = %self.name, sequence = id.0, %err, "skipping step");
                    sb.failed = true;
                }
            }
        }
    }

    /// Detach one sequence and drop its pending playback. Unknown ids are ignored.
    pub fn unregister(&mut self, id: SequenceId) {
        let before = self.sequences.len();
        self.sequences.retain(|(sid, _)| *sid != id);
        if self.sequences.len() != before {
            tracing::debug!(section = %self.name, id = id.0, "sequence unregistered");
        }
    }

    /// Tear down every binding. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if self.alive {
            tracing::debug!(section = %self.name, sequences = self.sequences.len(), "disposing sequencer context");
        }
        self.sequences.clear();
        self.offset = None;
        self.alive = false;
    }

    /// Current progress of every step binding in `id`, in declaration order.
    pub fn progress(&self, id: SequenceId) -> Option<Vec<f64>> {
        let (_, bindings) = self.sequences.iter().find(|(sid, _)| *sid == id)?;
        Some(
            bindings
                .iter()
                .filter_map(|b| match b {
                    Binding::Step(sb) => Some(match &sb.driver {
                        Driver::Scrub { shown, .. } => *shown,
                        Driver::OneShot { playback, .. } => playback.progress,
                    }),
                    Binding::Timeline(_) => None,
                })
                .collect(),
        )
    }

    /// Whether any binding in `id` still has time-driven work to do.
    pub fn is_animating(&self, id: SequenceId) -> bool {
        self.sequences
            .iter()
            .filter(|(sid, _)| *sid == id)
            .flat_map(|(_, b)| b.iter())
            .any(|b| match b {
                Binding::Step(sb) => match &sb.driver {
                    Driver::Scrub { target, shown, .. } => (target - shown).abs() > f64::EPSILON,
                    Driver::OneShot { playback, .. } => playback.direction != Direction::Idle,
                },
                Binding::Timeline(tb) => !tb.finished,
            })
    }
}

impl Drop for SequencerContext {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn build_driver(step: &AnimationStep, layout: &dyn Layout) -> FolioResult<Driver> {
    let act = &step.activation;
    let bounds = layout.bounds(act.trigger).ok_or_else(|| {
        FolioError::configuration(format!("trigger element {} has no layout", act.trigger.0))
    })?;
    let vh = layout.viewport().height;
    match act.mode {
        ActivationMode::Scrub { smoothing } | ActivationMode::ScrubReversible { smoothing } => {
            Ok(Driver::Scrub {
                track: ScrollTrack::new(bounds, act.start, act.end_or_default(), vh),
                latch: matches!(act.mode, ActivationMode::Scrub { .. }),
                smoothing,
                target: 0.0,
                shown: 0.0,
                clock: None,
            })
        }
        ActivationMode::OneShot { actions } => {
            let start = act.start.scroll_offset(bounds, vh);
            let mut end = act.end_or_default().scroll_offset(bounds, vh);
            if end <= start {
                end = f64::INFINITY;
            }
            Ok(Driver::OneShot {
                start,
                end,
                zone: Zone::Before,
                actions,
                playback: Playback::idle(),
            })
        }
    }
}

/// Keep playback/progress state across a refresh; only geometry changes.
fn carry_state(old: &Driver, fresh: Driver) -> Driver {
    match (old, fresh) {
        (
            Driver::Scrub {
                target,
                shown,
                clock,
                ..
            },
            Driver::Scrub {
                track,
                latch,
                smoothing,
                ..
            },
        ) => Driver::Scrub {
            track,
            latch,
            smoothing,
            target: *target,
            shown: *shown,
            clock: *clock,
        },
        (
            Driver::OneShot { zone, playback, .. },
            Driver::OneShot {
                start,
                end,
                actions,
                ..
            },
        ) => Driver::OneShot {
            start,
            end,
            zone: *zone,
            actions,
            playback: playback.clone(),
        },
        (_, fresh) => fresh,
    }
}

fn zone_of(offset: f64, start: f64, end: f64) -> Zone {
    if offset < start {
        Zone::Before
    } else if offset < end {
        Zone::Inside
    } else {
        Zone::After
    }
}

fn scroll_binding(sb: &mut StepBinding, offset: f64) {
    let delay = sb.step.tween.delay;
    match &mut sb.driver {
        Driver::Scrub {
            track,
            latch,
            smoothing,
            target,
            shown,
            ..
        } => {
            let mut next = track.progress(offset);
            if *latch {
                next = next.max(*target);
            }
            *target = next;
            if *smoothing == Millis::ZERO && *shown != next {
                *shown = next;
                sb.dirty = true;
            }
        }
        Driver::OneShot {
            start,
            end,
            zone,
            actions,
            playback,
        } => {
            let next = zone_of(offset, *start, *end);
            let fired: [Option<ToggleAction>; 2] = match (*zone, next) {
                (Zone::Before, Zone::Inside) => [Some(actions.on_enter), None],
                (Zone::Before, Zone::After) => [Some(actions.on_enter), Some(actions.on_leave)],
                (Zone::Inside, Zone::After) => [Some(actions.on_leave), None],
                (Zone::After, Zone::Inside) => [Some(actions.on_enter_back), None],
                (Zone::After, Zone::Before) => {
                    [Some(actions.on_enter_back), Some(actions.on_leave_back)]
                }
                (Zone::Inside, Zone::Before) => [Some(actions.on_leave_back), None],
                _ => [None, None],
            };
            for action in fired.into_iter().flatten() {
                if apply_toggle(playback, action, delay) {
                    sb.dirty = true;
                }
            }
            *zone = next;
        }
    }
}

/// Returns true when the visual state must be re-applied right away.
fn apply_toggle(pb: &mut Playback, action: ToggleAction, delay: Millis) -> bool {
    match action {
        ToggleAction::Play => {
            if pb.progress < 1.0 {
                if pb.progress == 0.0 {
                    pb.delay_left = delay;
                }
                pb.direction = Direction::Forward;
                pb.clock = None;
            }
            false
        }
        ToggleAction::Reverse => {
            if pb.progress > 0.0 {
                pb.direction = Direction::Backward;
                pb.delay_left = Millis::ZERO;
                pb.clock = None;
            }
            false
        }
        ToggleAction::Reset => {
            *pb = Playback::idle();
            true
        }
        ToggleAction::Restart => {
            *pb = Playback {
                progress: 0.0,
                direction: Direction::Forward,
                delay_left: delay,
                clock: None,
            };
            true
        }
        ToggleAction::None => false,
    }
}

fn tick_binding(sb: &mut StepBinding, now: Millis) {
    let total = sb.step.tween.total_duration();
    match &mut sb.driver {
        Driver::Scrub {
            smoothing,
            target,
            shown,
            clock,
            ..
        } => {
            let last = clock.replace(now).unwrap_or(now);
            if *smoothing == Millis::ZERO || *shown == *target {
                return;
            }
            let dt = now.saturating_sub(last).as_f64();
            let k = (dt / smoothing.as_f64()).clamp(0.0, 1.0);
            let next = *shown + (*target - *shown) * k;
            *shown = if (next - *target).abs() < 1e-4 { *target } else { next };
            sb.dirty = true;
        }
        Driver::OneShot { playback, .. } => {
            if playback.direction == Direction::Idle {
                return;
            }
            let last = playback.clock.replace(now).unwrap_or(now);
            let mut dt = now.saturating_sub(last);
            if playback.delay_left > Millis::ZERO {
                let used = if dt < playback.delay_left { dt } else { playback.delay_left };
                playback.delay_left = playback.delay_left.saturating_sub(used);
                dt = dt.saturating_sub(used);
            }
            let delta = if total == Millis::ZERO {
                if playback.delay_left == Millis::ZERO { 1.0 } else { 0.0 }
            } else {
                dt.as_f64() / total.as_f64()
            };
            let before = playback.progress;
            playback.progress = match playback.direction {
                Direction::Forward => (before + delta).min(1.0),
                Direction::Backward => (before - delta).max(0.0),
                Direction::Idle => before,
            };
            if (playback.direction == Direction::Forward && playback.progress >= 1.0)
                || (playback.direction == Direction::Backward && playback.progress <= 0.0)
            {
                playback.direction = Direction::Idle;
                playback.clock = None;
            }
            if playback.progress != before {
                sb.dirty = true;
            }
        }
    }
}

fn tick_timeline(tb: &mut TimelineBinding, now: Millis, surface: &mut dyn Surface, section: &str) {
    if tb.failed || tb.finished {
        return;
    }
    let t = now.saturating_sub(tb.started_at);
    for (el, state) in tb.timeline.sample(t) {
        if let Err(err) = surface.apply(el, &state) {
            tracing::warn!(section, %err, "skipping timeline");
            tb.failed = true;
            return;
        }
    }
    if t >= tb.timeline.duration() {
        tb.finished = true;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequencer/context.rs"]
mod tests;
