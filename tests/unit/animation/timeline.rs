use super::*;
use crate::animation::property::StyleBuffer;

fn t(id: &str) -> TargetId {
    TargetId::from(id)
}

fn fade_up(targets: &[&str], stagger: f64) -> Timeline {
    Timeline::new(
        targets.iter().map(|s| t(s)).collect(),
        vec![
            Step::new(Property::Opacity, 0.0, 1.0, 1.0).with_ease(Ease::Linear),
            Step::new(Property::TranslateY, 50.0, 0.0, 1.0).with_ease(Ease::OutQuart),
        ],
        stagger,
    )
    .unwrap()
}

#[test]
fn endpoints_match_from_and_to_for_every_ease() {
    for ease in [
        Ease::Linear,
        Ease::OutQuart,
        Ease::OutBack { overshoot: 1.7 },
        Ease::OutElastic {
            amplitude: 1.0,
            period: 0.3,
        },
    ] {
        let mut tl = Timeline::single(
            t("x"),
            vec![Step::new(Property::TranslateY, 0.1, 0.3, 0.8).with_ease(ease)],
        )
        .unwrap();
        assert_eq!(tl.value_at(0, Property::TranslateY), Some(0.1));

        let mut sink = StyleBuffer::new();
        tl.play(Direction::Forward);
        while tl.tick(1.0 / 60.0, &mut sink) {}
        assert_eq!(tl.state(), TimelineState::Completed);
        assert_eq!(sink.get(&t("x"), Property::TranslateY), Some(0.3));
    }
}

#[test]
fn stagger_cascades_targets() {
    let mut tl = fade_up(&["a", "b", "c"], 0.1);
    assert!((tl.total_duration() - 1.2).abs() < 1e-12);

    let mut sink = StyleBuffer::new();
    tl.play(Direction::Forward);
    tl.tick(0.15, &mut sink);

    let a = sink.get(&t("a"), Property::Opacity).unwrap();
    let b = sink.get(&t("b"), Property::Opacity).unwrap();
    let c = sink.get(&t("c"), Property::Opacity).unwrap();
    assert!((a - 0.15).abs() < 1e-9);
    assert!((b - 0.05).abs() < 1e-9);
    assert_eq!(c, 0.0);
}

#[test]
fn reversing_mid_flight_has_no_jump() {
    let mut tl = fade_up(&["a"], 0.0);
    let mut sink = StyleBuffer::new();
    tl.play(Direction::Forward);
    tl.tick(0.4, &mut sink);
    let before = sink.get(&t("a"), Property::TranslateY).unwrap();

    tl.play(Direction::Reverse);
    assert_eq!(tl.state(), TimelineState::Playing);
    assert_eq!(tl.direction(), Direction::Reverse);
    assert_eq!(tl.value_at(0, Property::TranslateY), Some(before));

    tl.tick(0.0, &mut sink);
    assert_eq!(sink.get(&t("a"), Property::TranslateY), Some(before));

    tl.tick(0.1, &mut sink);
    let after = sink.get(&t("a"), Property::TranslateY).unwrap();
    assert!(after > before, "moving back toward from=50");

    while tl.tick(0.05, &mut sink) {}
    assert_eq!(tl.playhead_time(), 0.0);
    assert_eq!(sink.get(&t("a"), Property::TranslateY), Some(50.0));
}

#[test]
fn play_in_same_direction_is_idempotent() {
    let mut tl = fade_up(&["a"], 0.0);
    let mut sink = StyleBuffer::new();
    tl.play(Direction::Forward);
    tl.tick(0.3, &mut sink);
    tl.play(Direction::Forward);
    assert!((tl.playhead_time() - 0.3).abs() < 1e-12);
    assert_eq!(tl.state(), TimelineState::Playing);
}

#[test]
fn interrupt_freezes_and_stops_writes() {
    let mut tl = fade_up(&["a"], 0.0);
    let mut sink = StyleBuffer::new();
    tl.play(Direction::Forward);
    tl.tick(0.25, &mut sink);
    let frozen = sink.get(&t("a"), Property::Opacity).unwrap();
    let writes = sink.write_count();

    tl.interrupt();
    assert_eq!(tl.state(), TimelineState::Interrupted);
    for _ in 0..10 {
        tl.tick(0.1, &mut sink);
    }
    assert_eq!(sink.write_count(), writes);
    assert_eq!(sink.get(&t("a"), Property::Opacity), Some(frozen));

    tl.play(Direction::Forward);
    tl.tick(0.0, &mut sink);
    assert_eq!(sink.get(&t("a"), Property::Opacity), Some(frozen));
}

#[test]
fn delta_spike_clamps_progress() {
    let mut tl = fade_up(&["a", "b"], 0.2);
    let mut sink = StyleBuffer::new();
    tl.play(Direction::Forward);
    assert!(!tl.tick(1000.0, &mut sink));
    assert_eq!(tl.state(), TimelineState::Completed);
    assert_eq!(tl.playhead_time(), tl.total_duration());
    assert_eq!(sink.get(&t("b"), Property::Opacity), Some(1.0));
    assert_eq!(sink.get(&t("b"), Property::TranslateY), Some(0.0));
}

#[test]
fn zero_duration_timeline_completes_with_one_write() {
    let mut tl = Timeline::single(t("a"), vec![Step::new(Property::Scale, 0.9, 1.0, 0.0)]).unwrap();
    let mut sink = StyleBuffer::new();
    tl.play(Direction::Forward);
    assert_eq!(tl.state(), TimelineState::Completed);
    tl.tick(0.016, &mut sink);
    tl.tick(0.016, &mut sink);
    assert_eq!(sink.write_count(), 1);
    assert_eq!(sink.get(&t("a"), Property::Scale), Some(1.0));
}

#[test]
fn reverse_from_idle_is_noop() {
    let mut tl = fade_up(&["a"], 0.0);
    tl.play(Direction::Reverse);
    assert_eq!(tl.state(), TimelineState::Idle);
}

#[test]
fn later_steps_take_over_a_property_once_started() {
    let tl_steps = vec![
        Step::new(Property::Opacity, 0.0, 1.0, 1.0).with_ease(Ease::Linear),
        Step::new(Property::Opacity, 1.0, 0.0, 1.0)
            .with_delay(2.0)
            .with_ease(Ease::Linear),
    ];
    let mut tl = Timeline::single(t("a"), tl_steps).unwrap();
    tl.seek(1.5);
    assert_eq!(tl.value_at(0, Property::Opacity), Some(1.0));
    tl.seek(2.5);
    assert_eq!(tl.value_at(0, Property::Opacity), Some(0.5));
    assert_eq!(tl.value_at(0, Property::Blur), None);
}

#[test]
fn seek_redraws_once_without_playing() {
    let mut tl = fade_up(&["a"], 0.0);
    let mut sink = StyleBuffer::new();
    tl.request_redraw();
    tl.tick(0.1, &mut sink);
    tl.tick(0.1, &mut sink);
    assert_eq!(sink.write_count(), 2);
    assert_eq!(sink.get(&t("a"), Property::Opacity), Some(0.0));
    assert_eq!(tl.state(), TimelineState::Idle);
}

#[test]
fn apply_initial_writes_from_pose_after_playback() {
    let mut tl = fade_up(&["a", "b"], 0.1);
    let mut sink = StyleBuffer::new();
    tl.play(Direction::Forward);
    while tl.tick(0.25, &mut sink) {}
    assert_eq!(sink.get(&t("b"), Property::Opacity), Some(1.0));

    tl.apply_initial(&mut sink);
    assert_eq!(tl.state(), TimelineState::Idle);
    assert_eq!(tl.playhead_time(), 0.0);
    assert_eq!(sink.get(&t("a"), Property::Opacity), Some(0.0));
    assert_eq!(sink.get(&t("b"), Property::TranslateY), Some(50.0));

    let writes = sink.write_count();
    tl.tick(1.0, &mut sink);
    assert_eq!(sink.write_count(), writes);
}

#[test]
fn rejects_invalid_construction() {
    assert!(Timeline::new(vec![], vec![Step::new(Property::Opacity, 0.0, 1.0, 1.0)], 0.0).is_err());
    assert!(Timeline::new(vec![t("a")], vec![], 0.0).is_err());
    assert!(
        Timeline::new(
            vec![t("a")],
            vec![Step::new(Property::Opacity, 0.0, 1.0, 1.0)],
            -0.1
        )
        .is_err()
    );
    assert!(Timeline::single(t("a"), vec![Step::new(Property::Opacity, 0.0, 1.0, -1.0)]).is_err());
    assert!(
        Timeline::single(
            t("a"),
            vec![Step::new(Property::Opacity, 0.0, 1.0, 1.0).with_delay(f64::NAN)]
        )
        .is_err()
    );
}
