//! Section plans for the portfolio page.
//!
//! Each preset takes the element handles of one section and returns the plan
//! the section mounts. Timings are in milliseconds; `POWER*` eases follow the
//! usual "power N out" naming.

use crate::animation::property::Property::{
    Blur, ClipRight, Height, Opacity, RotateX, RotateY, Rotation, Scale, ScaleY, X, XPercent, Y,
};

use crate::{
    animation::{
        anchor::Anchor,
        ease::Ease,
        property::{Property, PropertyState},
        step::{Activation, ActivationMode, AnimationStep, ToggleActions, Tween},
        timeline::{Position, Timeline},
    },
    foundation::core::{ElementId, Millis},
    sequencer::section::SectionPlan,
};

const POWER2: Ease = Ease::OutCubic;
const POWER3: Ease = Ease::OutQuart;
const POWER4: Ease = Ease::OutQuint;

fn back(overshoot: f64) -> Ease {
    Ease::back_out(overshoot)
}

fn elastic() -> Ease {
    Ease::elastic_out(1.0, 0.5)
}

fn state(pairs: &[(Property, f64)]) -> PropertyState {
    pairs.iter().copied().collect()
}

/// Resting value of a property: where `to`-only parallax steps start from.
fn rest(prop: Property) -> f64 {
    match prop {
        Opacity | Scale | ScaleY => 1.0,
        _ => 0.0,
    }
}

fn tween(
    targets: Vec<ElementId>,
    from: &[(Property, f64)],
    to: &[(Property, f64)],
    ms: u64,
    ease: Ease,
) -> Tween {
    Tween::new(targets, state(from), state(to), Millis(ms)).ease(ease)
}

/// `"top N%"`: the element's top edge reaches N% of the viewport height.
fn top(pct: f64) -> Anchor {
    Anchor::new(0.0, pct / 100.0)
}

fn on_enter(tween: Tween, trigger: ElementId, start: Anchor, actions: ToggleActions) -> AnimationStep {
    AnimationStep::new(
        tween,
        Activation {
            trigger,
            start,
            end: None,
            mode: ActivationMode::OneShot { actions },
        },
    )
}

fn replay(tween: Tween, trigger: ElementId, start: Anchor) -> AnimationStep {
    on_enter(tween, trigger, start, ToggleActions::REPLAY)
}

fn parallax(
    targets: Vec<ElementId>,
    to: &[(Property, f64)],
    trigger: ElementId,
    (start, end): (Anchor, Anchor),
    smoothing_ms: u64,
) -> AnimationStep {
    let from: Vec<_> = to.iter().map(|(p, _)| (*p, rest(*p))).collect();
    AnimationStep::new(
        tween(targets, &from, to, 1000, Ease::Linear),
        Activation {
            trigger,
            start,
            end: Some(end),
            mode: ActivationMode::scrub_reversible(Millis(smoothing_ms)),
        },
    )
}

/// Whole-section pass: from the section's top entering to its bottom leaving.
fn through(section: ElementId) -> (ElementId, (Anchor, Anchor)) {
    (section, (Anchor::new(0.0, 1.0), Anchor::new(1.0, 0.0)))
}

fn title_reveal(title: ElementId, scale_from: f64, blur: bool) -> AnimationStep {
    let mut from = vec![(Y, 60.0), (Opacity, 0.0), (Scale, scale_from)];
    let mut to = vec![(Y, 0.0), (Opacity, 1.0), (Scale, 1.0)];
    if blur {
        from.push((Blur, 10.0));
        to.push((Blur, 0.0));
    }
    replay(tween(vec![title], &from, &to, 1000, POWER3), title, top(85.0))
}

#[derive(Clone, Debug)]
pub struct HeroTargets {
    pub section: ElementId,
    pub content: ElementId,
    pub label: ElementId,
    pub name: ElementId,
    pub title: ElementId,
    pub description: ElementId,
    pub buttons: Vec<ElementId>,
    pub image: ElementId,
    pub stats: Vec<ElementId>,
    pub glows: Vec<ElementId>,
}

/// Intro timeline on load plus three parallax layers while scrolling away.
pub fn hero(t: &HeroTargets) -> SectionPlan {
    let intro = Timeline::new()
        .then(tween(
            vec![t.label],
            &[(Y, 30.0), (Opacity, 0.0), (Blur, 10.0)],
            &[(Y, 0.0), (Opacity, 1.0), (Blur, 0.0)],
            800,
            POWER3,
        ))
        .then_at(
            Position::Overlap(Millis(400)),
            tween(
                vec![t.name],
                &[(Y, 80.0), (Opacity, 0.0), (Scale, 0.9)],
                &[(Y, 0.0), (Opacity, 1.0), (Scale, 1.0)],
                1200,
                POWER4,
            ),
        )
        .then_at(
            Position::Overlap(Millis(600)),
            tween(
                vec![t.title],
                &[(Y, 40.0), (Opacity, 0.0), (ClipRight, 100.0)],
                &[(Y, 0.0), (Opacity, 1.0), (ClipRight, 0.0)],
                800,
                POWER3,
            ),
        )
        .then_at(
            Position::Overlap(Millis(300)),
            tween(
                vec![t.description],
                &[(Y, 30.0), (Opacity, 0.0)],
                &[(Y, 0.0), (Opacity, 1.0)],
                600,
                POWER3,
            ),
        )
        .then_at(
            Position::Overlap(Millis(200)),
            tween(
                t.buttons.clone(),
                &[(Y, 30.0), (Opacity, 0.0), (Scale, 0.9)],
                &[(Y, 0.0), (Opacity, 1.0), (Scale, 1.0)],
                500,
                back(1.5),
            )
            .stagger(Millis(150)),
        )
        .then_at(
            Position::Overlap(Millis(800)),
            tween(
                vec![t.image],
                &[(Scale, 0.8), (Opacity, 0.0), (Rotation, -10.0)],
                &[(Scale, 1.0), (Opacity, 1.0), (Rotation, 0.0)],
                1200,
                elastic(),
            ),
        )
        .then_at(
            Position::Overlap(Millis(500)),
            tween(
                t.stats.clone(),
                &[(Y, 30.0), (Opacity, 0.0)],
                &[(Y, 0.0), (Opacity, 1.0)],
                400,
                POWER3,
            )
            .stagger(Millis(100)),
        )
        .then_at(
            Position::Overlap(Millis(1000)),
            tween(
                t.glows.clone(),
                &[(Scale, 0.0), (Opacity, 0.0)],
                &[(Scale, 1.0), (Opacity, 1.0)],
                1500,
                POWER2,
            ),
        );

    let pinned = (Anchor::new(0.0, 0.0), Anchor::new(1.0, 0.0));
    SectionPlan::new("hero")
        .intro(intro)
        .step(parallax(vec![t.image], &[(Y, 100.0)], t.section, pinned, 1500))
        .step(parallax(
            t.glows.clone(),
            &[(Y, 80.0), (Scale, 1.2)],
            t.section,
            pinned,
            3000,
        ))
        .step(parallax(
            vec![t.content],
            &[(Y, -50.0), (Opacity, 0.0)],
            t.section,
            (Anchor::new(0.5, 0.5), Anchor::new(1.0, 0.0)),
            1000,
        ))
}

#[derive(Clone, Debug)]
pub struct AboutTargets {
    pub section: ElementId,
    pub title: ElementId,
    pub card: ElementId,
    pub edu_grid: ElementId,
    pub edu_cards: Vec<ElementId>,
    pub interests_grid: ElementId,
    pub interests: Vec<ElementId>,
    pub deco: ElementId,
}

pub fn about(t: &AboutTargets) -> SectionPlan {
    let (section, pass) = through(t.section);
    SectionPlan::new("about")
        .step(title_reveal(t.title, 0.95, false))
        .step(replay(
            tween(
                vec![t.card],
                &[(Y, 80.0), (Opacity, 0.0), (RotateX, 15.0)],
                &[(Y, 0.0), (Opacity, 1.0), (RotateX, 0.0)],
                1000,
                POWER3,
            ),
            t.card,
            top(80.0),
        ))
        .step(replay(
            tween(
                t.edu_cards.clone(),
                &[(X, -60.0), (Opacity, 0.0), (Scale, 0.9)],
                &[(X, 0.0), (Opacity, 1.0), (Scale, 1.0)],
                800,
                back(1.5),
            )
            .stagger(Millis(200)),
            t.edu_grid,
            top(80.0),
        ))
        .step(replay(
            tween(
                t.interests.clone(),
                &[(Scale, 0.0), (Rotation, -180.0), (Opacity, 0.0)],
                &[(Scale, 1.0), (Rotation, 0.0), (Opacity, 1.0)],
                600,
                back(2.0),
            )
            .stagger(Millis(100)),
            t.interests_grid,
            top(85.0),
        ))
        .step(parallax(
            vec![t.deco],
            &[(Y, -100.0), (Rotation, 45.0)],
            section,
            pass,
            2000,
        ))
}

#[derive(Clone, Debug)]
pub struct SkillsTargets {
    pub section: ElementId,
    pub title: ElementId,
    pub grid: ElementId,
    pub groups: Vec<ElementId>,
    /// Every tag across all groups, in document order.
    pub tags: Vec<ElementId>,
    pub glow: ElementId,
}

pub fn skills(t: &SkillsTargets) -> SectionPlan {
    let (section, pass) = through(t.section);
    SectionPlan::new("skills")
        .step(title_reveal(t.title, 0.95, false))
        .step(replay(
            tween(
                t.groups.clone(),
                &[(Y, 80.0), (Opacity, 0.0), (RotateY, -30.0), (Scale, 0.9)],
                &[(Y, 0.0), (Opacity, 1.0), (RotateY, 0.0), (Scale, 1.0)],
                900,
                POWER3,
            )
            .stagger(Millis(150)),
            t.grid,
            top(80.0),
        ))
        .step(replay(
            tween(
                t.tags.clone(),
                &[(Y, 30.0), (Opacity, 0.0), (Scale, 0.8)],
                &[(Y, 0.0), (Opacity, 1.0), (Scale, 1.0)],
                400,
                back(1.5),
            )
            .stagger(Millis(30)),
            t.grid,
            top(75.0),
        ))
        .step(parallax(
            vec![t.glow],
            &[(Y, -80.0), (X, 50.0), (Scale, 1.2)],
            section,
            pass,
            2000,
        ))
}

#[derive(Clone, Debug)]
pub struct ExperienceCard {
    pub card: ElementId,
    pub indicator: ElementId,
    pub number: ElementId,
    pub items: Vec<ElementId>,
}

#[derive(Clone, Debug)]
pub struct ExperienceTargets {
    pub section: ElementId,
    pub title: ElementId,
    pub grid: ElementId,
    pub line: ElementId,
    pub cards: Vec<ExperienceCard>,
    pub accent: ElementId,
}

/// Cards slide in from alternating sides.
pub fn experience(t: &ExperienceTargets) -> SectionPlan {
    let (section, pass) = through(t.section);
    let mut plan = SectionPlan::new("experience")
        .step(title_reveal(t.title, 0.95, true))
        .step(replay(
            tween(vec![t.line], &[(ScaleY, 0.0)], &[(ScaleY, 1.0)], 1500, POWER2),
            t.grid,
            top(80.0),
        ));

    for (i, c) in t.cards.iter().enumerate() {
        let dir = if i % 2 == 0 { -1.0 } else { 1.0 };
        plan = plan
            .step(replay(
                tween(
                    vec![c.card],
                    &[
                        (X, 80.0 * dir),
                        (Y, 50.0),
                        (Opacity, 0.0),
                        (RotateY, 15.0 * dir),
                        (Scale, 0.9),
                    ],
                    &[
                        (X, 0.0),
                        (Y, 0.0),
                        (Opacity, 1.0),
                        (RotateY, 0.0),
                        (Scale, 1.0),
                    ],
                    1000,
                    POWER3,
                ),
                c.card,
                top(85.0),
            ))
            .step(replay(
                tween(vec![c.indicator], &[(Height, 0.0)], &[(Height, 40.0)], 800, POWER2),
                c.card,
                top(80.0),
            ))
            .step(replay(
                tween(
                    vec![c.number],
                    &[(Scale, 0.0), (Opacity, 0.0), (Rotation, -90.0)],
                    &[(Scale, 1.0), (Opacity, 1.0), (Rotation, 0.0)],
                    600,
                    back(2.0),
                )
                .delay(Millis(300)),
                c.card,
                top(80.0),
            ))
            .step(replay(
                tween(
                    c.items.clone(),
                    &[(X, 20.0), (Opacity, 0.0)],
                    &[(X, 0.0), (Opacity, 1.0)],
                    400,
                    POWER2,
                )
                .stagger(Millis(100))
                .delay(Millis(400)),
                c.card,
                top(80.0),
            ));
    }

    plan.step(parallax(
        vec![t.accent],
        &[(Y, -150.0), (Rotation, 30.0)],
        section,
        pass,
        2000,
    ))
}

#[derive(Clone, Debug)]
pub struct ProjectPanel {
    pub content: ElementId,
    pub number: ElementId,
    pub title: ElementId,
    pub tags: Vec<ElementId>,
    pub description: ElementId,
    pub button: ElementId,
}

#[derive(Clone, Debug)]
pub struct ProjectsTargets {
    pub title: ElementId,
    /// The pinned strip. Its measured height includes the pin spacing, so
    /// scrolling through it drives the horizontal movement.
    pub strip: ElementId,
    pub panels: Vec<ElementId>,
    pub panel_parts: Vec<ProjectPanel>,
    pub dots: Vec<ElementId>,
}

/// Band of strip progress during which panel `index`'s left edge travels from
/// `enter` to `leave` (viewport-width fractions), expressed as anchors on the strip.
fn panel_band(index: usize, count: usize, enter: f64, leave: f64) -> (Anchor, Anchor) {
    let span = (count.saturating_sub(1)).max(1) as f64;
    let at = |f: f64| {
        let p = ((index as f64 - f) / span).clamp(0.0, 1.0);
        // scroll = top + p * (height - viewport): both fractions equal p.
        Anchor::new(p, p)
    };
    (at(enter), at(leave))
}

/// Horizontal pinned scroll through project panels; each panel's parts reveal
/// while the panel is on screen.
pub fn projects(t: &ProjectsTargets) -> SectionPlan {
    let n = t.panels.len();
    let mut plan = SectionPlan::new("projects")
        .step(title_reveal(t.title, 0.9, false))
        .step(AnimationStep::new(
            tween(
                t.panels.clone(),
                &[(XPercent, 0.0)],
                &[(XPercent, -100.0 * n.saturating_sub(1) as f64)],
                1000,
                Ease::Linear,
            ),
            Activation {
                trigger: t.strip,
                start: Anchor::new(0.0, 0.0),
                end: Some(Anchor::new(1.0, 1.0)),
                mode: ActivationMode::scrub_reversible(Millis(1000)),
            },
        ));

    for (i, parts) in t.panel_parts.iter().enumerate() {
        let bind = |tw: Tween, enter: f64| -> AnimationStep {
            if i == 0 {
                on_enter(tw, t.strip, top(40.0), ToggleActions::REVERSE_BACK)
            } else {
                let (start, end) = panel_band(i, n, enter, 0.2);
                AnimationStep::new(
                    tw,
                    Activation {
                        trigger: t.strip,
                        start,
                        end: Some(end),
                        mode: ActivationMode::OneShot {
                            actions: ToggleActions::WHILE_INSIDE,
                        },
                    },
                )
            }
        };
        plan = plan
            .step(bind(
                tween(
                    vec![parts.content],
                    &[(Opacity, 0.3), (Scale, 0.9), (RotateY, -10.0)],
                    &[(Opacity, 1.0), (Scale, 1.0), (RotateY, 0.0)],
                    800,
                    Ease::OutQuad,
                ),
                0.8,
            ))
            .step(bind(
                tween(
                    vec![parts.number],
                    &[(Scale, 0.0), (Rotation, -180.0), (Opacity, 0.0)],
                    &[(Scale, 1.0), (Rotation, 0.0), (Opacity, 1.0)],
                    800,
                    back(1.5),
                ),
                0.6,
            ))
            .step(bind(
                tween(
                    vec![parts.title],
                    &[(Y, 40.0), (Opacity, 0.0)],
                    &[(Y, 0.0), (Opacity, 1.0)],
                    600,
                    Ease::OutQuad,
                ),
                0.5,
            ))
            .step(bind(
                tween(
                    parts.tags.clone(),
                    &[(Y, 20.0), (Opacity, 0.0), (Scale, 0.8)],
                    &[(Y, 0.0), (Opacity, 1.0), (Scale, 1.0)],
                    400,
                    back(1.5),
                )
                .stagger(Millis(100)),
                0.45,
            ))
            .step(bind(
                tween(
                    vec![parts.description],
                    &[(Y, 20.0), (Opacity, 0.0)],
                    &[(Y, 0.0), (Opacity, 1.0)],
                    500,
                    Ease::OutQuad,
                ),
                0.4,
            ))
            .step(bind(
                tween(
                    vec![parts.button],
                    &[(Scale, 0.0), (Opacity, 0.0)],
                    &[(Scale, 1.0), (Opacity, 1.0)],
                    500,
                    elastic(),
                ),
                0.35,
            ));
    }

    plan.step(replay(
        tween(t.dots.clone(), &[(Scale, 0.0)], &[(Scale, 1.0)], 300, back(2.0))
            .stagger(Millis(100)),
        t.strip,
        top(80.0),
    ))
}

#[derive(Clone, Debug)]
pub struct ContactTargets {
    pub section: ElementId,
    pub title: ElementId,
    pub grid: ElementId,
    pub form: ElementId,
    pub form_groups: Vec<ElementId>,
    pub submit: ElementId,
    pub info: ElementId,
    pub items: Vec<ElementId>,
    pub portfolio_button: ElementId,
    pub footer: ElementId,
    pub glow: ElementId,
}

pub fn contact(t: &ContactTargets) -> SectionPlan {
    let (section, pass) = through(t.section);
    SectionPlan::new("contact")
        .step(title_reveal(t.title, 0.95, true))
        .step(replay(
            tween(
                vec![t.form],
                &[(X, -60.0), (Opacity, 0.0), (RotateY, 15.0)],
                &[(X, 0.0), (Opacity, 1.0), (RotateY, 0.0)],
                1000,
                POWER3,
            ),
            t.grid,
            top(80.0),
        ))
        .step(replay(
            tween(
                t.form_groups.clone(),
                &[(Y, 30.0), (Opacity, 0.0)],
                &[(Y, 0.0), (Opacity, 1.0)],
                600,
                POWER2,
            )
            .stagger(Millis(150)),
            t.form,
            top(75.0),
        ))
        .step(replay(
            tween(
                vec![t.submit],
                &[(Scale, 0.8), (Opacity, 0.0)],
                &[(Scale, 1.0), (Opacity, 1.0)],
                800,
                elastic(),
            ),
            t.submit,
            top(90.0),
        ))
        .step(replay(
            tween(
                vec![t.info],
                &[(X, 60.0), (Opacity, 0.0), (RotateY, -15.0)],
                &[(X, 0.0), (Opacity, 1.0), (RotateY, 0.0)],
                1000,
                POWER3,
            ),
            t.grid,
            top(80.0),
        ))
        .step(replay(
            tween(
                t.items.clone(),
                &[(X, 30.0), (Opacity, 0.0)],
                &[(X, 0.0), (Opacity, 1.0)],
                500,
                POWER2,
            )
            .stagger(Millis(100)),
            t.info,
            top(75.0),
        ))
        .step(replay(
            tween(
                vec![t.portfolio_button],
                &[(Y, 20.0), (Opacity, 0.0), (Scale, 0.9)],
                &[(Y, 0.0), (Opacity, 1.0), (Scale, 1.0)],
                600,
                back(1.5),
            ),
            t.portfolio_button,
            top(90.0),
        ))
        .step(replay(
            tween(
                vec![t.footer],
                &[(Y, 20.0), (Opacity, 0.0)],
                &[(Y, 0.0), (Opacity, 1.0)],
                600,
                Ease::OutQuad,
            ),
            t.footer,
            top(95.0),
        ))
        .step(parallax(
            vec![t.glow],
            &[(Y, -100.0), (Scale, 1.5)],
            section,
            pass,
            2000,
        ))
}

/// Navigation bar drop-in on page load.
pub fn nav_intro(nav: ElementId) -> Timeline {
    Timeline::new().then(
        tween(
            vec![nav],
            &[(Y, -50.0), (Opacity, 0.0)],
            &[(Y, 0.0), (Opacity, 1.0)],
            600,
            POWER2,
        )
        .delay(Millis(300)),
    )
}

/// Quick press-in on the submit button while the form is sending.
pub fn submit_press(button: ElementId) -> Timeline {
    Timeline::new()
        .then(tween(vec![button], &[(Scale, 1.0)], &[(Scale, 0.95)], 100, Ease::OutQuad))
        .then(tween(vec![button], &[(Scale, 0.95)], &[(Scale, 1.0)], 100, Ease::OutQuad))
}

/// Submit button pulse after a successful send.
pub fn submit_pulse(button: ElementId) -> Timeline {
    Timeline::new().then(tween(
        vec![button],
        &[(Scale, 1.1)],
        &[(Scale, 1.0)],
        500,
        elastic(),
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/sequencer/presets.rs"]
mod tests;
