use super::*;
use crate::animation::property::StyleBuffer;

fn cursor() -> CustomCursor {
    CustomCursor::new(TargetId::from("cursor-dot"), TargetId::from("cursor-ring"))
}

#[test]
fn starts_offscreen() {
    let f = cursor().frame();
    assert_eq!(f.dot, Point::new(-100.0, -100.0));
    assert_eq!(f.ring_opacity, 0.4);
}

#[test]
fn ring_lags_dot_and_both_settle() {
    let mut c = cursor();
    let mut sink = StyleBuffer::new();
    c.pointer_move(Point::new(400.0, 300.0));
    let mut f = c.tick(1.0 / 60.0, &mut sink);
    for _ in 0..2 {
        f = c.tick(1.0 / 60.0, &mut sink);
    }
    assert!(f.dot.x > f.ring.x);

    for _ in 0..180 {
        f = c.tick(1.0 / 60.0, &mut sink);
    }
    assert_eq!(f.dot, Point::new(392.0, 292.0));
    assert_eq!(f.ring, Point::new(392.0, 292.0));
    assert_eq!(
        sink.get(&TargetId::from("cursor-ring"), Property::TranslateX),
        Some(392.0)
    );
}

#[test]
fn hover_enlarges() {
    let mut c = cursor();
    c.set_hovering(true);
    let f = c.frame();
    assert_eq!((f.dot_scale, f.ring_scale, f.ring_opacity), (2.5, 1.5, 0.8));
}
