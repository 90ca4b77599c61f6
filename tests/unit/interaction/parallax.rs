use super::*;

#[test]
fn smooth_damp_reaches_target_without_overshoot() {
    let mut d = SmoothDamp::new(0.0);
    let mut prev = 0.0;
    for _ in 0..240 {
        let v = d.step(1.0, 0.25, 1.0 / 60.0);
        assert!(v >= prev && v <= 1.0);
        prev = v;
    }
    assert_eq!(d.value, 1.0);
}

#[test]
fn camera_drifts_toward_pointer() {
    let mut rig = CameraRig::new();
    assert_eq!(rig.pose().position, [0.0, 0.0, 5.0]);
    let mut pose = rig.pose();
    for _ in 0..240 {
        pose = rig.update(Vec2::new(1.0, -1.0), 1.0 / 60.0);
    }
    assert!((pose.position[0] - 0.2).abs() < 1e-9);
    assert!((pose.position[1] + 0.2).abs() < 1e-9);
    assert_eq!(pose.position[2], 5.0);
    assert!((pose.rotation[0] + 0.1).abs() < 1e-9);
    assert!((pose.rotation[1] + 0.1).abs() < 1e-9);
}

#[test]
fn ndc_maps_viewport_corners() {
    let vp = Viewport::new(800.0, 600.0).unwrap();
    assert_eq!(pointer_ndc(Point::new(0.0, 0.0), vp), Vec2::new(-1.0, 1.0));
    assert_eq!(pointer_ndc(Point::new(400.0, 300.0), vp), Vec2::new(0.0, 0.0));
    assert_eq!(pointer_ndc(Point::new(900.0, 700.0), vp), Vec2::new(1.0, -1.0));
}
