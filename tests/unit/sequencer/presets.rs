use super::*;
use crate::{
    foundation::core::{Rect, Viewport},
    sequencer::{
        host::{StaticLayout, StyleBuffer},
        section::Section,
    },
};

/// Hands out fresh ids and lays every element out as a 400px block down the page.
struct Ids {
    next: u32,
    layout: StaticLayout,
}

impl Ids {
    fn new() -> Self {
        Self {
            next: 1,
            layout: StaticLayout::new(Viewport::new(1440.0, 900.0).unwrap()),
        }
    }

    fn one(&mut self) -> ElementId {
        let id = ElementId(self.next);
        let y = f64::from(self.next) * 400.0;
        self.layout.insert(id, Rect::new(0.0, y, 1440.0, y + 400.0));
        self.next += 1;
        id
    }

    fn many(&mut self, n: usize) -> Vec<ElementId> {
        (0..n).map(|_| self.one()).collect()
    }
}

fn hero_targets(ids: &mut Ids) -> HeroTargets {
    HeroTargets {
        section: ids.one(),
        content: ids.one(),
        label: ids.one(),
        name: ids.one(),
        title: ids.one(),
        description: ids.one(),
        buttons: ids.many(2),
        image: ids.one(),
        stats: ids.many(3),
        glows: ids.many(2),
    }
}

fn experience_targets(ids: &mut Ids) -> ExperienceTargets {
    ExperienceTargets {
        section: ids.one(),
        title: ids.one(),
        grid: ids.one(),
        line: ids.one(),
        cards: (0..2)
            .map(|_| ExperienceCard {
                card: ids.one(),
                indicator: ids.one(),
                number: ids.one(),
                items: ids.many(3),
            })
            .collect(),
        accent: ids.one(),
    }
}

fn projects_targets(ids: &mut Ids) -> ProjectsTargets {
    let panels = ids.many(3);
    let panel_parts = (0..3)
        .map(|_| ProjectPanel {
            content: ids.one(),
            number: ids.one(),
            title: ids.one(),
            tags: ids.many(2),
            description: ids.one(),
            button: ids.one(),
        })
        .collect();
    let title = ids.one();
    let strip = ids.one();
    // pinned strip: one viewport of scroll per panel
    let y = f64::from(strip.0) * 400.0;
    ids.layout.insert(strip, Rect::new(0.0, y, 1440.0, y + 2700.0));
    ProjectsTargets {
        title,
        strip,
        panels,
        panel_parts,
        dots: ids.many(3),
    }
}

fn every_plan(ids: &mut Ids) -> Vec<SectionPlan> {
    let about = AboutTargets {
        section: ids.one(),
        title: ids.one(),
        card: ids.one(),
        edu_grid: ids.one(),
        edu_cards: ids.many(2),
        interests_grid: ids.one(),
        interests: ids.many(4),
        deco: ids.one(),
    };
    let skills_t = SkillsTargets {
        section: ids.one(),
        title: ids.one(),
        grid: ids.one(),
        groups: ids.many(3),
        tags: ids.many(9),
        glow: ids.one(),
    };
    let contact_t = ContactTargets {
        section: ids.one(),
        title: ids.one(),
        grid: ids.one(),
        form: ids.one(),
        form_groups: ids.many(3),
        submit: ids.one(),
        info: ids.one(),
        items: ids.many(3),
        portfolio_button: ids.one(),
        footer: ids.one(),
        glow: ids.one(),
    };
    vec![
        hero(&hero_targets(ids)),
        super::about(&about),
        skills(&skills_t),
        experience(&experience_targets(ids)),
        projects(&projects_targets(ids)),
        contact(&contact_t),
    ]
}

#[test]
fn every_preset_mounts_without_skips() {
    let mut ids = Ids::new();
    let plans = every_plan(&mut ids);
    for plan in plans {
        let name = plan.name.clone();
        let section = Section::mount(plan, &ids.layout, Millis(0));
        assert!(section.skipped().is_empty(), "{name}: {:?}", section.skipped());
        assert!(section.mounted() > 0, "{name}");
    }
}

#[test]
fn hero_intro_overlaps_entries() {
    let mut ids = Ids::new();
    let plan = hero(&hero_targets(&mut ids));
    let intro = plan.intro.unwrap();
    let offsets: Vec<u64> = intro.entries().iter().map(|e| e.offset.0).collect();
    assert_eq!(offsets, vec![0, 400, 1000, 1500, 1900, 1750, 2450, 2050]);
    assert_eq!(intro.duration(), Millis(3550));
    assert_eq!(plan.steps.len(), 3);
    assert!(plan.steps.iter().all(|s| s.activation.mode.is_scrub()));
}

#[test]
fn experience_cards_alternate_sides() {
    let mut ids = Ids::new();
    let t = experience_targets(&mut ids);
    let plan = experience(&t);
    let card_x = |el: ElementId| {
        plan.steps
            .iter()
            .find(|s| s.tween.targets == vec![el])
            .and_then(|s| s.tween.from.get(Property::X))
            .unwrap()
    };
    assert_eq!(card_x(t.cards[0].card), -80.0);
    assert_eq!(card_x(t.cards[1].card), 80.0);
}

#[test]
fn projects_strip_slides_every_panel_out() {
    let mut ids = Ids::new();
    let t = projects_targets(&mut ids);
    let plan = projects(&t);
    let strip = plan
        .steps
        .iter()
        .find(|s| s.tween.targets == t.panels)
        .unwrap();
    assert_eq!(strip.tween.to.get(Property::XPercent), Some(-200.0));
    assert!(strip.activation.mode.is_scrub());

    // scrolling to the strip's bottom edge lands on the last panel
    let mut section = Section::mount(plan, &ids.layout, Millis(0));
    let mut buf = StyleBuffer::new();
    let bounds = ids.layout.elements[&t.strip];
    section.on_scroll(bounds.y1 - 900.0, &mut buf);
    section.on_frame(Millis(0), &mut buf);
    section.on_frame(Millis(5000), &mut buf);
    assert_eq!(buf.get(t.panels[0], Property::XPercent), Some(-200.0));
}

#[test]
fn later_panels_reveal_only_while_on_screen() {
    let (start, end) = panel_band(2, 3, 0.8, 0.2);
    assert!((start.element - 0.6).abs() < 1e-9);
    assert_eq!(start.element, start.viewport);
    assert!((end.element - 0.9).abs() < 1e-9);
    let (first, _) = panel_band(0, 3, 0.8, 0.2);
    assert_eq!(first.element, 0.0);
}

#[test]
fn submit_pulse_settles_at_rest_scale() {
    let tl = submit_pulse(ElementId(7));
    let sampled = tl.sample(tl.duration());
    assert_eq!(sampled.len(), 1);
    assert!((sampled[0].1.get(Property::Scale).unwrap() - 1.0).abs() < 1e-9);
}

#[test]
fn nav_intro_waits_before_dropping_in() {
    let tl = nav_intro(ElementId(1));
    assert_eq!(tl.duration(), Millis(900));
    let early = tl.sample(Millis(200));
    assert_eq!(early[0].1.get(Property::Opacity), Some(0.0));
}

#[test]
fn submit_press_dips_and_returns() {
    let tl = submit_press(ElementId(3));
    assert_eq!(tl.duration(), Millis(200));
    let scale_at = |t| tl.sample(Millis(t))[0].1.get(Property::Scale).unwrap();
    assert!((scale_at(100) - 0.95).abs() < 1e-9);
    assert!((scale_at(200) - 1.0).abs() < 1e-9);
}
