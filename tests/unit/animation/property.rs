use super::*;

#[test]
fn lerp_interpolates_every_shared_key() {
    let a = PropertyState::new()
        .with(Property::Y, 60.0)
        .with(Property::Opacity, 0.0);
    let b = PropertyState::new()
        .with(Property::Y, 0.0)
        .with(Property::Opacity, 1.0);
    let mid = PropertyState::lerp(&a, &b, 0.5);
    assert_eq!(mid.get(Property::Y), Some(30.0));
    assert_eq!(mid.get(Property::Opacity), Some(0.5));
}

#[test]
fn same_keys_ignores_values_but_not_sets() {
    let a = PropertyState::new().with(Property::X, 1.0);
    let b = PropertyState::new().with(Property::X, 9.0);
    let c = PropertyState::new()
        .with(Property::X, 1.0)
        .with(Property::Scale, 1.0);
    assert!(a.same_keys(&b));
    assert!(!a.same_keys(&c));
    assert!(!c.same_keys(&a));
}

#[test]
fn non_finite_values_are_rejected() {
    let s = PropertyState::new().with(Property::Rotation, f64::INFINITY);
    assert!(matches!(s.validate(), Err(FolioError::Configuration(_))));
}

#[test]
fn serializes_with_camel_case_keys() {
    let s = PropertyState::new()
        .with(Property::RotateY, -30.0)
        .with(Property::Opacity, 0.0);
    let json = serde_json::to_string(&s).unwrap();
    assert_eq!(json, r#"{"opacity":0.0,"rotateY":-30.0}"#);
}
