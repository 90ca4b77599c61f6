use super::*;
use crate::{
    animation::ease::Ease,
    animation::property::{Property, StyleBuffer},
    animation::timeline::{Step, TimelineState},
    foundation::core::{PageLayout, Rect, TargetId, Viewport},
};

fn section(policy: TriggerPolicy) -> SectionController {
    let zone = TriggerZone::new(TargetId::from("about"), 0.8, policy).unwrap();
    let tl = Timeline::new(
        vec![TargetId::from("about-title"), TargetId::from("about-body")],
        vec![
            Step::new(Property::Opacity, 0.0, 1.0, 1.0).with_ease(Ease::OutCubic),
            Step::new(Property::TranslateY, 50.0, 0.0, 1.0).with_ease(Ease::OutCubic),
        ],
        0.0,
    )
    .unwrap();
    SectionController::new("about", zone, vec![tl]).unwrap()
}

fn layout() -> PageLayout {
    let mut l = PageLayout::new(Viewport::new(1200.0, 1000.0).unwrap(), 6000.0);
    l.set_element(TargetId::from("about"), Rect::new(0.0, 2000.0, 1200.0, 3000.0));
    l
}

fn drive(
    s: &mut SectionController,
    tracker: &mut IntersectionTracker,
    offset: f64,
    sink: &mut StyleBuffer,
) {
    for ev in tracker.update(offset, &layout()) {
        if Some(ev.zone) == s.zone_id() {
            s.handle(ev.edge);
        }
    }
    s.tick(1.0 / 60.0, sink);
}

#[test]
fn frame_loop_tracks_live_subscriptions() {
    let mut fl = FrameLoop::new();
    let a = fl.subscribe();
    let b = fl.subscribe();
    assert_ne!(a, b);
    assert!(fl.unsubscribe(a));
    assert!(!fl.unsubscribe(a));
    assert!(!fl.is_live(a));
    assert!(fl.is_live(b));
    assert_eq!(fl.len(), 1);
}

#[test]
fn requires_a_timeline() {
    let zone = TriggerZone::new(TargetId::from("x"), 0.5, TriggerPolicy::PlayOnce).unwrap();
    assert!(SectionController::new("x", zone, Vec::new()).is_err());
}

#[test]
fn mount_writes_initial_pose() {
    let mut s = section(TriggerPolicy::PlayOnce);
    let mut tracker = IntersectionTracker::new();
    let mut fl = FrameLoop::new();
    s.mount(&mut tracker, &mut fl).unwrap();
    assert_eq!(s.state(), SectionState::Idle);
    assert_eq!(tracker.len(), 1);
    assert_eq!(fl.len(), 1);

    let mut sink = StyleBuffer::new();
    s.tick(1.0 / 60.0, &mut sink);
    assert_eq!(
        sink.get(&TargetId::from("about-body"), Property::Opacity),
        Some(0.0)
    );
    assert_eq!(
        sink.get(&TargetId::from("about-title"), Property::TranslateY),
        Some(50.0)
    );
}

#[test]
fn threshold_crossing_plays_forward_then_reverses_on_leave() {
    let mut s = section(TriggerPolicy::PlayReverseOnLeave);
    let mut tracker = IntersectionTracker::new();
    let mut fl = FrameLoop::new();
    let mut sink = StyleBuffer::new();
    s.mount(&mut tracker, &mut fl).unwrap();

    drive(&mut s, &mut tracker, 1100.0, &mut sink);
    assert_eq!(s.state(), SectionState::Idle);

    // top reaches 80% of the viewport at offset 1200
    drive(&mut s, &mut tracker, 1200.0, &mut sink);
    assert_eq!(s.state(), SectionState::PlayingForward);

    for _ in 0..90 {
        drive(&mut s, &mut tracker, 1300.0, &mut sink);
    }
    assert_eq!(s.state(), SectionState::Completed);
    assert_eq!(
        sink.get(&TargetId::from("about-title"), Property::Opacity),
        Some(1.0)
    );

    drive(&mut s, &mut tracker, 1000.0, &mut sink);
    assert_eq!(s.state(), SectionState::PlayingReverse);

    for _ in 0..90 {
        drive(&mut s, &mut tracker, 1000.0, &mut sink);
    }
    assert_eq!(s.state(), SectionState::Idle);
    assert_eq!(
        sink.get(&TargetId::from("about-title"), Property::Opacity),
        Some(0.0)
    );
}

#[test]
fn play_once_ignores_leaving() {
    let mut s = section(TriggerPolicy::PlayOnce);
    let mut tracker = IntersectionTracker::new();
    let mut fl = FrameLoop::new();
    let mut sink = StyleBuffer::new();
    s.mount(&mut tracker, &mut fl).unwrap();

    drive(&mut s, &mut tracker, 1500.0, &mut sink);
    assert_eq!(s.state(), SectionState::PlayingForward);
    assert!(tracker.is_empty(), "zone retired after first entry");

    s.handle(Edge::Left);
    assert_eq!(s.state(), SectionState::PlayingForward);
}

#[test]
fn reversal_mid_flight_is_continuous() {
    let mut s = section(TriggerPolicy::PlayReverseOnLeave);
    let mut tracker = IntersectionTracker::new();
    let mut fl = FrameLoop::new();
    let mut sink = StyleBuffer::new();
    s.mount(&mut tracker, &mut fl).unwrap();
    let title = TargetId::from("about-title");

    s.handle(Edge::Entered);
    for _ in 0..20 {
        s.tick(1.0 / 60.0, &mut sink);
    }
    let before = sink.get(&title, Property::TranslateY).unwrap();
    s.handle(Edge::Left);
    s.tick(0.0, &mut sink);
    let after = sink.get(&title, Property::TranslateY).unwrap();
    assert_eq!(before, after);
    assert_eq!(s.state(), SectionState::PlayingReverse);
}

#[test]
fn unmount_while_playing_stops_all_writes() {
    let mut s = section(TriggerPolicy::PlayReverseOnLeave);
    let mut tracker = IntersectionTracker::new();
    let mut fl = FrameLoop::new();
    let mut sink = StyleBuffer::new();
    s.mount(&mut tracker, &mut fl).unwrap();
    s.handle(Edge::Entered);
    s.tick(0.1, &mut sink);
    assert!(s.timelines()[0].is_playing());

    s.unmount(&mut tracker, &mut fl);
    assert_eq!(s.state(), SectionState::Unmounted);
    assert!(tracker.is_empty());
    assert!(fl.is_empty());
    assert_eq!(s.timelines()[0].state(), TimelineState::Interrupted);

    let writes = sink.write_count();
    for _ in 0..60 {
        s.handle(Edge::Entered);
        s.tick(1.0 / 60.0, &mut sink);
    }
    assert_eq!(sink.write_count(), writes);
}

#[test]
fn remount_starts_from_scratch() {
    let mut s = section(TriggerPolicy::PlayOnce);
    let mut tracker = IntersectionTracker::new();
    let mut fl = FrameLoop::new();
    s.mount(&mut tracker, &mut fl).unwrap();
    s.handle(Edge::Entered);
    s.unmount(&mut tracker, &mut fl);
    s.mount(&mut tracker, &mut fl).unwrap();
    assert_eq!(s.state(), SectionState::Idle);
    assert_eq!(s.timelines()[0].playhead_time(), 0.0);
    assert_eq!(tracker.len(), 1);
}
