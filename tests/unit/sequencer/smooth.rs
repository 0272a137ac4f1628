use super::*;
use crate::foundation::error::FolioError;

struct Probe(fn() -> FolioResult<()>);

impl ScrollProbe for Probe {
    fn probe(&self) -> FolioResult<()> {
        (self.0)()
    }
}

#[test]
fn glide_starts_at_zero_and_caps_at_one() {
    assert!(glide(0.0).abs() < 0.01);
    assert_eq!(glide(1.0), 1.0);
    assert_eq!(glide(3.0), 1.0);
    assert!(glide(0.1) > 0.4);
}

#[test]
fn glide_reaches_the_target_after_the_duration() {
    let mut s = SmoothScroll::new(5000.0);
    s.scroll_to(1000.0, Millis(0));
    let mid = s.on_frame(Millis(300));
    assert!(mid > 0.0 && mid < 1000.0);
    assert!(!s.is_settled());
    assert_eq!(s.on_frame(Millis(1200)), 1000.0);
    assert!(s.is_settled());
}

#[test]
fn retarget_continues_from_current_offset() {
    let mut s = SmoothScroll::new(5000.0);
    s.scroll_to(1000.0, Millis(0));
    let at = s.on_frame(Millis(200));
    s.scroll_by(500.0, Millis(200));
    assert_eq!(s.target(), 1500.0);
    assert!((s.on_frame(Millis(200)) - at).abs() < 1.0);
}

#[test]
fn targets_are_clamped_to_the_page() {
    let mut s = SmoothScroll::new(800.0);
    s.scroll_to(-40.0, Millis(0));
    assert_eq!(s.target(), 0.0);
    s.scroll_to(9000.0, Millis(0));
    assert_eq!(s.target(), 800.0);
    s.set_max_offset(300.0);
    assert_eq!(s.target(), 300.0);
}

#[test]
fn unavailable_environment_falls_back_to_native() {
    let probe = Probe(|| Err(FolioError::environment_unavailable("no wheel events")));
    let mut driver = ScrollDriver::init(&probe, 4000.0);
    assert!(driver.is_native());
    driver.scroll_to(640.0, Millis(0));
    assert_eq!(driver.on_frame(Millis(16)), 640.0);
}

#[test]
fn any_startup_failure_falls_back_to_native() {
    let probe = Probe(|| Err(FolioError::validation("scroller failed to construct")));
    let mut driver = ScrollDriver::init(&probe, 4000.0);
    assert!(driver.is_native());
    driver.scroll_to(120.0, Millis(0));
    assert_eq!(driver.on_frame(Millis(16)), 120.0);

    let probe = Probe(|| Err(FolioError::configuration("bad duration")));
    assert!(ScrollDriver::init(&probe, 4000.0).is_native());
}

#[test]
fn working_probe_uses_the_glide() {
    let probe = Probe(|| Ok(()));
    let mut driver = ScrollDriver::init(&probe, 4000.0);
    assert!(!driver.is_native());
    driver.scroll_to(400.0, Millis(0));
    assert!(driver.on_frame(Millis(100)) < 400.0);
    assert_eq!(driver.on_frame(Millis(1300)), 400.0);
}
