use super::*;
use crate::animation::property::StyleBuffer;

fn vp(width: f64) -> Viewport {
    Viewport::new(width, 900.0).unwrap()
}

fn gallery() -> HorizontalTrack {
    let strip = TargetId::from("projects-strip");
    HorizontalTrack::new(strip, 500.0, 3000.0, 200.0, vp(1000.0)).unwrap()
}

#[test]
fn bound_is_strip_minus_viewport_plus_margin() {
    let t = gallery();
    assert!(t.is_enabled());
    assert_eq!(t.bound(), 2200.0);

    let narrow_strip =
        HorizontalTrack::new(TargetId::from("s"), 0.0, 500.0, 0.0, vp(1000.0)).unwrap();
    assert_eq!(narrow_strip.bound(), 0.0);
}

#[test]
fn releases_exactly_at_the_bound() {
    let mut t = gallery();
    assert!(!t.update(0.0).pinned);
    assert_eq!(t.update(400.0).translation_x, 0.0);

    let mut offset = 500.0;
    while offset <= 2690.0 {
        let f = t.update(offset);
        assert!(f.pinned, "offset {offset}");
        assert_eq!(f.translation_x, -(offset - 500.0));
        offset += 10.0;
    }

    let f = t.update(2699.0);
    assert!(f.pinned);
    assert_eq!(f.consumed, 2199.0);

    let f = t.update(2700.0);
    assert!(!f.pinned);
    assert_eq!(f.consumed, 2200.0);
    assert_eq!(f.translation_x, -2200.0);
    assert_eq!(t.phase(), PinPhase::Released);

    for offset in [2800.0, 4000.0, 9000.0] {
        let f = t.update(offset);
        assert!(!f.pinned);
        assert_eq!(f.translation_x, -2200.0);
    }
}

#[test]
fn single_large_delta_clamps_to_the_bound() {
    let mut t = gallery();
    t.update(0.0);
    let f = t.update(10_000.0);
    assert!(!f.pinned);
    assert_eq!(f.translation_x, -2200.0);
}

#[test]
fn scrolling_back_up_repins_and_then_unpins_before_start() {
    let mut t = gallery();
    t.update(0.0);
    t.update(3000.0);
    assert_eq!(t.phase(), PinPhase::Released);

    let f = t.update(2600.0);
    assert!(f.pinned);
    assert_eq!(f.translation_x, -2100.0);

    let f = t.update(400.0);
    assert!(!f.pinned);
    assert_eq!(t.phase(), PinPhase::Before);
    assert_eq!(f.translation_x, 0.0);
}

#[test]
fn narrow_viewports_disable_the_pin() {
    let mut t =
        HorizontalTrack::new(TargetId::from("s"), 500.0, 3000.0, 200.0, vp(768.0)).unwrap();
    assert!(!t.is_enabled());
    let f = t.update(1500.0);
    assert!(!f.pinned);
    assert_eq!(f.translation_x, 0.0);
}

#[test]
fn resize_keeps_translation() {
    let mut t = gallery();
    t.update(0.0);
    t.update(1500.0);
    let before = t.translation_x();
    assert_eq!(before, -1000.0);

    // wider viewport shrinks the bound but stays above the current translation
    t.recompute(vp(1400.0));
    assert_eq!(t.bound(), 1800.0);
    assert_eq!(t.translation_x(), before);
    assert_eq!(t.phase(), PinPhase::Pinned);

    let f = t.update(2300.0);
    assert!(!f.pinned);
    assert_eq!(f.translation_x, -1800.0);
}

#[test]
fn rotating_to_a_narrow_viewport_mid_gallery_keeps_translation() {
    let mut t = gallery();
    t.update(0.0);
    t.update(1500.0);
    assert_eq!(t.translation_x(), -1000.0);

    t.recompute(vp(700.0));
    assert!(t.is_enabled());
    assert_eq!(t.phase(), PinPhase::Pinned);
    assert_eq!(t.translation_x(), -1000.0);

    let f = t.update(1600.0);
    assert!(f.pinned);
    assert_eq!(f.translation_x, -1100.0);

    // back above the pin start, the narrow viewport disables the track
    let f = t.update(400.0);
    assert!(!f.pinned);
    assert_eq!(f.translation_x, 0.0);
    assert!(!t.is_enabled());
    let f = t.update(1500.0);
    assert!(!f.pinned);
    assert_eq!(f.translation_x, 0.0);
}

#[test]
fn narrow_viewport_before_the_pin_disables_the_track() {
    let mut t = gallery();
    t.update(0.0);
    t.update(300.0);
    t.recompute(vp(700.0));
    assert!(!t.is_enabled());
    assert_eq!(t.phase(), PinPhase::Before);

    t.recompute(vp(1000.0));
    assert!(t.is_enabled());
    t.update(300.0);
    assert!(t.update(600.0).pinned);
}

#[test]
fn resting_translation_is_positive_zero() {
    let mut t = gallery();
    assert!(t.translation_x().is_sign_positive());
    t.update(0.0);
    let f = t.update(400.0);
    assert_eq!(f.translation_x.to_bits(), 0.0f64.to_bits());

    let json = serde_json::to_string(&f).unwrap();
    assert!(json.contains("\"translation_x\":0.0"), "{json}");

    let mut sink = StyleBuffer::new();
    t.apply(&mut sink);
    let x = sink.get(&TargetId::from("projects-strip"), Property::TranslateX);
    assert!(x.is_some_and(f64::is_sign_positive));
}

#[test]
fn resize_below_current_translation_releases_in_place() {
    let mut t = gallery();
    t.update(0.0);
    t.update(2000.0);
    assert_eq!(t.translation_x(), -1500.0);

    t.recompute(vp(2000.0));
    assert_eq!(t.bound(), 1200.0);
    assert_eq!(t.phase(), PinPhase::Released);
    assert_eq!(t.translation_x(), -1500.0);

    // pulling back moves continuously from the preserved translation
    let f = t.update(1900.0);
    assert!(f.pinned);
    assert_eq!(f.translation_x, -1400.0);
}

#[test]
fn apply_writes_strip_translation() {
    let mut t = gallery();
    t.update(0.0);
    t.update(800.0);
    let mut sink = StyleBuffer::new();
    t.apply(&mut sink);
    assert_eq!(
        sink.get(&TargetId::from("projects-strip"), Property::TranslateX),
        Some(-300.0)
    );
}

#[test]
fn rejects_negative_geometry() {
    assert!(HorizontalTrack::new(TargetId::from("s"), 0.0, -1.0, 0.0, vp(1000.0)).is_err());
}
