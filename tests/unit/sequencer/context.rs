use super::*;
use crate::{
    animation::{
        anchor::Anchor,
        ease::Ease,
        property::{Property, PropertyState},
        step::Activation,
        timeline::Position,
    },
    foundation::core::{ElementId, Rect, Viewport},
    sequencer::host::{StaticLayout, StyleBuffer},
};

const TRIGGER: ElementId = ElementId(100);

fn layout() -> StaticLayout {
    // viewport 1000 tall, trigger spans 2000..2500
    StaticLayout::new(Viewport::new(1280.0, 1000.0).unwrap())
        .with(TRIGGER, Rect::new(0.0, 2000.0, 1280.0, 2500.0))
}

fn fade(targets: &[u32], mode: ActivationMode) -> AnimationStep {
    AnimationStep::new(
        Tween::new(
            targets.iter().copied().map(ElementId).collect(),
            PropertyState::new().with(Property::Opacity, 0.0),
            PropertyState::new().with(Property::Opacity, 1.0),
            Millis(1000),
        )
        .ease(Ease::Linear),
        Activation {
            trigger: TRIGGER,
            start: Anchor::parse("top 80%").unwrap(),
            end: None,
            mode,
        },
    )
}

fn opacity(buf: &StyleBuffer, el: u32) -> f64 {
    buf.get(ElementId(el), Property::Opacity).unwrap()
}

#[test]
fn mismatched_keys_reject_the_whole_sequence() {
    let mut ctx = SequencerContext::new("about");
    let mut bad = fade(&[2], ActivationMode::one_shot());
    bad.tween.to = PropertyState::new().with(Property::Y, 0.0);
    let err = ctx
        .register_sequence(vec![fade(&[1], ActivationMode::one_shot()), bad], &layout())
        .unwrap_err();
    assert!(matches!(err, FolioError::Configuration(_)));
    assert!(ctx.is_empty());
}

#[test]
fn missing_trigger_is_a_configuration_error() {
    let mut ctx = SequencerContext::new("about");
    let empty = StaticLayout::new(Viewport::new(1280.0, 1000.0).unwrap());
    let err = ctx
        .register_sequence(vec![fade(&[1], ActivationMode::one_shot())], &empty)
        .unwrap_err();
    assert!(matches!(err, FolioError::Configuration(_)));
}

#[test]
fn scrub_applies_progress_on_scroll() {
    let mut ctx = SequencerContext::new("hero");
    let mut step = fade(&[1], ActivationMode::scrub_reversible(Millis::ZERO));
    step.activation.start = Anchor::parse("top top").unwrap();
    step.activation.end = Some(Anchor::parse("bottom top").unwrap());
    let id = ctx.register_sequence(vec![step], &layout()).unwrap();
    let mut buf = StyleBuffer::new();

    ctx.on_scroll(2000.0, &mut buf);
    assert_eq!(opacity(&buf, 1), 0.0);
    ctx.on_scroll(2250.0, &mut buf);
    assert_eq!(opacity(&buf, 1), 0.5);
    ctx.on_scroll(2500.0, &mut buf);
    assert_eq!(opacity(&buf, 1), 1.0);
    ctx.on_scroll(2100.0, &mut buf);
    assert!((opacity(&buf, 1) - 0.2).abs() < 1e-9);
    assert_eq!(ctx.progress(id).unwrap().len(), 1);
}

#[test]
fn latching_scrub_never_goes_backwards() {
    let mut ctx = SequencerContext::new("skills");
    let mut step = fade(&[1], ActivationMode::scrub_latched(Millis::ZERO));
    step.activation.start = Anchor::parse("top top").unwrap();
    ctx.register_sequence(vec![step], &layout()).unwrap();
    let mut buf = StyleBuffer::new();
    ctx.on_scroll(2250.0, &mut buf);
    ctx.on_scroll(2000.0, &mut buf);
    assert_eq!(opacity(&buf, 1), 0.5);
}

#[test]
fn smoothed_scrub_catches_up_over_frames() {
    let mut ctx = SequencerContext::new("hero");
    let mut step = fade(&[1], ActivationMode::scrub_reversible(Millis(1000)));
    step.activation.start = Anchor::parse("top top").unwrap();
    let id = ctx.register_sequence(vec![step], &layout()).unwrap();
    let mut buf = StyleBuffer::new();
    ctx.on_frame(Millis(0), &mut buf);
    ctx.on_scroll(2500.0, &mut buf);
    assert_eq!(opacity(&buf, 1), 0.0);
    ctx.on_frame(Millis(500), &mut buf);
    assert_eq!(opacity(&buf, 1), 0.5);
    assert!(ctx.is_animating(id));
    ctx.on_frame(Millis(2000), &mut buf);
    assert_eq!(opacity(&buf, 1), 1.0);
    assert!(!ctx.is_animating(id));
}

#[test]
fn one_shot_plays_on_clock_after_crossing() {
    let mut ctx = SequencerContext::new("about");
    ctx.register_sequence(vec![fade(&[1], ActivationMode::one_shot())], &layout())
        .unwrap();
    let mut buf = StyleBuffer::new();

    ctx.on_scroll(0.0, &mut buf);
    assert_eq!(opacity(&buf, 1), 0.0);
    ctx.on_frame(Millis(10), &mut buf);
    assert_eq!(opacity(&buf, 1), 0.0);

    // start line: 2000 - 0.8 * 1000
    ctx.on_scroll(1200.0, &mut buf);
    ctx.on_frame(Millis(100), &mut buf);
    ctx.on_frame(Millis(600), &mut buf);
    assert_eq!(opacity(&buf, 1), 0.5);
    ctx.on_frame(Millis(1100), &mut buf);
    assert_eq!(opacity(&buf, 1), 1.0);
}

#[test]
fn replay_resets_on_backward_crossing() {
    let mut ctx = SequencerContext::new("about");
    ctx.register_sequence(vec![fade(&[1], ActivationMode::replay())], &layout())
        .unwrap();
    let mut buf = StyleBuffer::new();
    ctx.on_scroll(1500.0, &mut buf);
    ctx.on_frame(Millis(0), &mut buf);
    ctx.on_frame(Millis(1000), &mut buf);
    assert_eq!(opacity(&buf, 1), 1.0);

    ctx.on_scroll(1000.0, &mut buf);
    assert_eq!(opacity(&buf, 1), 0.0);

    ctx.on_scroll(1500.0, &mut buf);
    ctx.on_frame(Millis(2000), &mut buf);
    ctx.on_frame(Millis(2500), &mut buf);
    assert_eq!(opacity(&buf, 1), 0.5);
}

#[test]
fn non_replay_step_applies_once() {
    let mut ctx = SequencerContext::new("about");
    ctx.register_sequence(vec![fade(&[1], ActivationMode::one_shot())], &layout())
        .unwrap();
    let mut buf = StyleBuffer::new();
    ctx.on_scroll(1500.0, &mut buf);
    ctx.on_frame(Millis(0), &mut buf);
    ctx.on_frame(Millis(1000), &mut buf);
    ctx.on_scroll(0.0, &mut buf);
    ctx.on_frame(Millis(1500), &mut buf);
    assert_eq!(opacity(&buf, 1), 1.0);
}

#[test]
fn reverse_back_rewinds_on_the_clock() {
    let mut ctx = SequencerContext::new("projects");
    ctx.register_sequence(
        vec![fade(&[1], ActivationMode::OneShot {
            actions: ToggleActions::REVERSE_BACK,
        })],
        &layout(),
    )
    .unwrap();
    let mut buf = StyleBuffer::new();
    ctx.on_scroll(1500.0, &mut buf);
    ctx.on_frame(Millis(0), &mut buf);
    ctx.on_frame(Millis(1000), &mut buf);
    ctx.on_scroll(0.0, &mut buf);
    assert_eq!(opacity(&buf, 1), 1.0);
    ctx.on_frame(Millis(1100), &mut buf);
    ctx.on_frame(Millis(1350), &mut buf);
    assert_eq!(opacity(&buf, 1), 0.75);
}

#[test]
fn stagger_follows_target_order() {
    let mut ctx = SequencerContext::new("about");
    let mut step = fade(&[1, 2, 3], ActivationMode::one_shot());
    step.tween.stagger = Millis(500);
    ctx.register_sequence(vec![step], &layout()).unwrap();
    let mut buf = StyleBuffer::new();
    ctx.on_scroll(1500.0, &mut buf);
    ctx.on_frame(Millis(0), &mut buf);
    ctx.on_frame(Millis(750), &mut buf);
    assert_eq!(opacity(&buf, 1), 0.75);
    assert_eq!(opacity(&buf, 2), 0.25);
    assert_eq!(opacity(&buf, 3), 0.0);
}

#[test]
fn delay_postpones_playback() {
    let mut ctx = SequencerContext::new("experience");
    let mut step = fade(&[1], ActivationMode::one_shot());
    step.tween.delay = Millis(300);
    ctx.register_sequence(vec![step], &layout()).unwrap();
    let mut buf = StyleBuffer::new();
    ctx.on_scroll(1500.0, &mut buf);
    ctx.on_frame(Millis(0), &mut buf);
    ctx.on_frame(Millis(300), &mut buf);
    assert_eq!(opacity(&buf, 1), 0.0);
    ctx.on_frame(Millis(800), &mut buf);
    assert_eq!(opacity(&buf, 1), 0.5);
}

#[test]
fn empty_target_set_is_a_no_op() {
    let mut ctx = SequencerContext::new("skills");
    ctx.register_sequence(vec![fade(&[], ActivationMode::one_shot())], &layout())
        .unwrap();
    let mut buf = StyleBuffer::new();
    ctx.on_scroll(1500.0, &mut buf);
    ctx.on_frame(Millis(0), &mut buf);
    ctx.on_frame(Millis(2000), &mut buf);
    assert_eq!(buf.writes(), 0);
}

#[test]
fn rejected_step_is_skipped_without_aborting_others() {
    let mut ctx = SequencerContext::new("contact");
    ctx.register_sequence(
        vec![
            fade(&[1], ActivationMode::one_shot()),
            fade(&[2], ActivationMode::one_shot()),
        ],
        &layout(),
    )
    .unwrap();
    let mut buf = StyleBuffer::restricted([ElementId(2)]);
    ctx.on_scroll(1500.0, &mut buf);
    ctx.on_frame(Millis(0), &mut buf);
    ctx.on_frame(Millis(1000), &mut buf);
    assert!(buf.state(ElementId(1)).is_none());
    assert_eq!(opacity(&buf, 2), 1.0);
}

#[test]
fn refresh_moves_thresholds_and_skips_vanished_triggers() {
    let mut ctx = SequencerContext::new("about");
    ctx.register_sequence(vec![fade(&[1], ActivationMode::one_shot())], &layout())
        .unwrap();
    let mut buf = StyleBuffer::new();
    ctx.on_scroll(1300.0, &mut buf);

    let mut moved = layout();
    moved.insert(TRIGGER, Rect::new(0.0, 3000.0, 1280.0, 3500.0));
    ctx.refresh(&moved);
    // the new start line is 2200; the playback started earlier keeps running
    ctx.on_scroll(1300.0, &mut buf);
    ctx.on_frame(Millis(0), &mut buf);
    ctx.on_frame(Millis(1000), &mut buf);
    assert_eq!(opacity(&buf, 1), 1.0);

    moved.remove(TRIGGER);
    ctx.refresh(&moved);
    let writes = buf.writes();
    ctx.on_scroll(5000.0, &mut buf);
    ctx.on_frame(Millis(3000), &mut buf);
    assert_eq!(buf.writes(), writes);
}

#[test]
fn unregister_and_dispose_are_idempotent() {
    let mut ctx = SequencerContext::new("hero");
    let id = ctx
        .register_sequence(vec![fade(&[1], ActivationMode::one_shot())], &layout())
        .unwrap();
    let mut buf = StyleBuffer::new();
    ctx.on_scroll(1500.0, &mut buf);
    ctx.unregister(id);
    ctx.unregister(id);
    assert!(ctx.is_empty());
    let writes = buf.writes();
    ctx.on_frame(Millis(500), &mut buf);
    assert_eq!(buf.writes(), writes);

    ctx.dispose();
    ctx.dispose();
    assert!(!ctx.is_alive());
    assert!(
        ctx.register_sequence(vec![fade(&[1], ActivationMode::one_shot())], &layout())
            .is_err()
    );
    ctx.on_scroll(3000.0, &mut buf);
    assert_eq!(buf.writes(), writes);
}

#[test]
fn timeline_runs_on_its_own_clock() {
    let mut ctx = SequencerContext::new("hero");
    let a = Tween::new(
        vec![ElementId(1)],
        PropertyState::new().with(Property::Y, 30.0),
        PropertyState::new().with(Property::Y, 0.0),
        Millis(800),
    )
    .ease(Ease::Linear);
    let b = Tween::new(
        vec![ElementId(2)],
        PropertyState::new().with(Property::Opacity, 0.0),
        PropertyState::new().with(Property::Opacity, 1.0),
        Millis(800),
    )
    .ease(Ease::Linear);
    let tl = Timeline::new()
        .then(a)
        .then_at(Position::Overlap(Millis(400)), b);
    let id = ctx.register_timeline(tl, Millis(1000)).unwrap();
    let mut buf = StyleBuffer::new();
    ctx.on_frame(Millis(1400), &mut buf);
    assert_eq!(buf.get(ElementId(1), Property::Y), Some(15.0));
    assert_eq!(opacity(&buf, 2), 0.0);
    ctx.on_frame(Millis(1800), &mut buf);
    assert_eq!(opacity(&buf, 2), 0.5);
    assert!(ctx.is_animating(id));
    ctx.on_frame(Millis(3000), &mut buf);
    assert_eq!(opacity(&buf, 2), 1.0);
    assert!(!ctx.is_animating(id));
}
