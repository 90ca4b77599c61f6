use super::*;
use crate::{
    animation::property::{Property, StyleBuffer},
    audio::effects::OfflineSynth,
    foundation::core::TargetId,
    scroll::driver::HeadlessScroll,
};

const DT: f64 = 1.0 / 60.0;

fn page() -> Page<HeadlessScroll> {
    let config = PageConfig::portfolio(Viewport::new(1200.0, 1000.0).unwrap());
    Page::new(&config, HeadlessScroll::default()).unwrap()
}

fn run(
    page: &mut Page<HeadlessScroll>,
    frames: usize,
    sink: &mut StyleBuffer,
) -> Vec<SectionEvent> {
    let mut events = Vec::new();
    for _ in 0..frames {
        events.extend(page.frame(DT, sink).events);
    }
    events
}

#[test]
fn nothing_happens_before_mount() {
    let mut p = page();
    let mut sink = StyleBuffer::new();
    let report = p.frame(DT, &mut sink);
    assert!(report.events.is_empty());
    assert_eq!(sink.write_count(), 0);
    assert!(report.sections.iter().all(|s| s.state == SectionState::Unmounted));
    assert!(p.host().unwrap().native_enabled);
}

#[test]
fn mount_takes_over_scrolling_and_hides_elements() {
    let mut p = page();
    p.mount().unwrap();
    assert!(!p.host().unwrap().native_enabled);

    let mut sink = StyleBuffer::new();
    let report = p.frame(DT, &mut sink);
    // The hero is in view at the top of the page.
    assert_eq!(
        report.events,
        vec![SectionEvent {
            section: "hero".into(),
            edge: Edge::Entered
        }]
    );
    let about = TargetId::from("about-text");
    assert_eq!(sink.get(&about, Property::Opacity), Some(0.0));
    assert_eq!(sink.get(&about, Property::TranslateY), Some(50.0));
}

#[test]
fn wheel_reveals_about_and_back_reverses_it() {
    let mut p = page();
    p.mount().unwrap();
    let mut sink = StyleBuffer::new();
    run(&mut p, 2, &mut sink);

    p.wheel(600.0);
    let events = run(&mut p, 120, &mut sink);
    assert!(events.contains(&SectionEvent {
        section: "about".into(),
        edge: Edge::Entered
    }));
    run(&mut p, 60, &mut sink);
    assert_eq!(p.section("about").unwrap().state(), SectionState::Completed);
    assert_eq!(
        sink.get(&TargetId::from("about-text"), Property::Opacity),
        Some(1.0)
    );

    p.wheel(-600.0);
    let events = run(&mut p, 120, &mut sink);
    assert!(events.contains(&SectionEvent {
        section: "about".into(),
        edge: Edge::Left
    }));
    run(&mut p, 60, &mut sink);
    assert_eq!(p.section("about").unwrap().state(), SectionState::Idle);
    assert_eq!(
        sink.get(&TargetId::from("about-text"), Property::Opacity),
        Some(0.0)
    );
}

#[test]
fn unmounted_section_gets_no_writes() {
    let mut p = page();
    p.mount().unwrap();
    let mut sink = StyleBuffer::new();
    p.wheel(600.0);
    run(&mut p, 40, &mut sink);
    assert!(p.unmount_section("about"));
    assert!(!p.unmount_section("about"));
    assert!(!p.unmount_section("nope"));

    let about = TargetId::from("about-text");
    let before = sink.get(&about, Property::Opacity);
    let mut writes = Vec::new();
    let mut spy = |t: &TargetId, _: Property, _: f64| {
        if *t == about {
            writes.push(t.clone());
        }
    };
    for _ in 0..120 {
        p.frame(DT, &mut spy);
    }
    assert!(writes.is_empty());
    assert_eq!(sink.get(&about, Property::Opacity), before);
    assert_eq!(p.section("about").unwrap().state(), SectionState::Unmounted);
}

#[test]
fn scroll_to_glides_to_anchor_with_click() {
    let mut p = page().with_audio(Box::new(OfflineSynth::default()));
    assert!(p.scroll_to(Anchor::Skills).is_err());
    p.mount().unwrap();
    p.scroll_to(Anchor::Skills).unwrap();
    let mut sink = StyleBuffer::new();
    let report = (0..600).map(|_| p.frame(DT, &mut sink)).last().unwrap();
    assert_eq!(report.scroll.smoothed_offset, 4400.0);
    assert_eq!(report.nav.active, Anchor::Skills);
    assert!(report.nav.visible);
}

#[test]
fn track_pins_through_projects() {
    let mut p = page();
    p.mount().unwrap();
    let mut sink = StyleBuffer::new();
    p.wheel(2700.0);
    let report = (0..600).map(|_| p.frame(DT, &mut sink)).last().unwrap();
    let track = report.tracks[0];
    assert!(track.pinned);
    assert!((track.translation_x + 700.0).abs() < 1e-6);
    assert_eq!(
        sink.get(&TargetId::from("projects-strip"), Property::TranslateX),
        Some(track.translation_x)
    );
}

#[test]
fn resize_to_mobile_disables_track() {
    let mut p = page();
    p.mount().unwrap();
    p.resize(Viewport::new(600.0, 900.0).unwrap()).unwrap();
    assert!(!p.tracks()[0].is_enabled());
    assert!(p.resize(Viewport { width: 0.0, height: 900.0 }).is_err());
}

#[test]
fn teardown_restores_native_scrolling() {
    let mut p = page();
    p.mount().unwrap();
    p.wheel(500.0);
    p.teardown();
    assert!(!p.is_mounted());
    let host = p.host().unwrap();
    assert!(host.native_enabled);
    assert_eq!(host.offset, 500.0);
    assert!(p.sections().iter().all(|s| !s.is_mounted()));
}

#[test]
fn set_layout_updates_scroll_range() {
    let mut p = page();
    p.mount().unwrap();
    let mut layout = p.layout().clone();
    layout.document_height = 2000.0;
    p.set_layout(layout).unwrap();

    // Contact now lies beyond the end of the shorter document.
    p.scroll_to(Anchor::Contact).unwrap();
    let mut sink = StyleBuffer::new();
    let report = (0..600).map(|_| p.frame(DT, &mut sink)).last().unwrap();
    assert_eq!(report.scroll.smoothed_offset, 1000.0);

    let mut broken = p.layout().clone();
    broken.document_height = f64::NAN;
    assert!(p.set_layout(broken).is_err());
}
