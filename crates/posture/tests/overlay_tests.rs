mod common;

use {
    base::Vec2,
    common::*,
    image::{BLACK, GREEN, RED, RgbImage, WHITE},
    posture::*,
};

fn status_with(segment: Segment, degrees: f64) -> SegmentStatus {
    classify(&AngleSet::default().with(segment, degrees))
}

#[test]
fn test_topology_table() {
    assert_eq!(BLAZEPOSE.connections.len(), 35);
    assert_eq!(BLAZEPOSE.landmark_count, POSE_LANDMARK_COUNT);
    assert!(
        BLAZEPOSE
            .connections
            .iter()
            .all(|(start, end)| *start < POSE_LANDMARK_COUNT && *end < POSE_LANDMARK_COUNT)
    );
    assert_eq!(BLAZEPOSE.connection_owner(11, 13), Some(Segment::LeftShoulder));
    assert_eq!(BLAZEPOSE.connection_owner(13, 11), Some(Segment::LeftShoulder));
    assert_eq!(BLAZEPOSE.connection_owner(0, 1), Some(Segment::Neck));
    assert_eq!(BLAZEPOSE.connection_owner(8, 0), Some(Segment::Visual));
    assert_eq!(BLAZEPOSE.connection_owner(27, 29), None);
    assert_eq!(BLAZEPOSE.joint_owner(19), Some(Segment::LeftWrist));
    assert_eq!(BLAZEPOSE.joint_owner(2), None);
}

#[test]
fn test_connection_color_follows_owner() {
    let renderer = OverlayRenderer::default();
    let status = status_with(Segment::LeftShoulder, 60.0);
    assert_eq!(renderer.connection_color(11, 13, &status), RED);
    assert_eq!(renderer.connection_color(12, 14, &status), GREEN);

    let status = status_with(Segment::Neck, 100.0);
    assert_eq!(renderer.connection_color(11, 12, &status), RED);
    assert_eq!(renderer.connection_color(0, 4, &status), RED);
    assert_eq!(renderer.connection_color(3, 7, &status), GREEN);
}

#[test]
fn test_unowned_or_unclassified_is_good() {
    let renderer = OverlayRenderer::default();
    let mut angles = AngleSet::default();
    for segment in Segment::ALL {
        angles = angles.with(segment, 500.0);
    }
    let all_bad = classify(&angles);
    assert_eq!(renderer.connection_color(27, 29, &all_bad), GREEN);
    assert_eq!(renderer.joint_color(1, &all_bad), GREEN);

    let nothing = SegmentStatus::default();
    assert_eq!(renderer.connection_color(11, 13, &nothing), GREEN);
    assert_eq!(renderer.joint_color(11, &nothing), GREEN);
}

#[test]
fn test_joint_color_follows_owner() {
    let renderer = OverlayRenderer::default();
    let status = status_with(Segment::RightWrist, 120.0);
    for index in [16, 18, 20] {
        assert_eq!(renderer.joint_color(index, &status), RED, "landmark {index}");
    }
    assert_eq!(renderer.joint_color(15, &status), GREEN);
}

#[test]
fn test_custom_style_colors() {
    let style = OverlayStyle::default().with_good_color(WHITE).with_bad_color(BLACK);
    let renderer = OverlayRenderer::new(&BLAZEPOSE, style);
    let status = status_with(Segment::LeftKnee, 30.0);
    assert_eq!(renderer.connection_color(25, 27, &status), BLACK);
    assert_eq!(renderer.joint_color(25, &status), BLACK);
    assert_eq!(renderer.joint_color(26, &status), WHITE);
}

#[test]
fn test_color_map_is_deterministic() {
    let renderer = OverlayRenderer::default();
    let status = classify(&calculate_angle_set(&LandmarkSet::from_pose(&build_pose(&TargetAngles {
        elbow: 150.0,
        ..TargetAngles::default()
    }))));
    let first = renderer.color_map(&status);
    let second = renderer.color_map(&status);
    assert_eq!(first, second);
    assert_eq!(first.connections.len(), BLAZEPOSE.connections.len());
    assert_eq!(first.joints.len(), POSE_LANDMARK_COUNT);
    assert_eq!(first.joints[13], RED);
}

#[test]
fn test_uniform_color_map() {
    let colors = ColorMap::uniform(&BLAZEPOSE, RED);
    assert!(colors.connections.iter().chain(colors.joints.iter()).all(|color| *color == RED));
}

#[test]
fn test_render_draws_bones_and_joints() {
    let mut image = RgbImage::new(Vec2::new(20, 20));
    let pose = PoseLandmarks::new()
        .with(11, Landmark::new(0.25, 0.5, 0.0))
        .with(12, Landmark::new(0.75, 0.5, 0.0));
    let status = status_with(Segment::Neck, 100.0);
    let renderer = OverlayRenderer::default();
    renderer.render(&mut image, &pose, &renderer.color_map(&status));

    // shoulder line, 10 pixels thick
    assert_eq!(image.pixel(10, 10), Some(RED));
    assert_eq!(image.pixel(10, 6), Some(RED));
    assert_eq!(image.pixel(10, 0), Some(BLACK));
    // left shoulder ring, radius 3, drawn over the line
    assert_eq!(image.pixel(8, 10), Some(GREEN));
    assert_eq!(image.pixel(0, 19), Some(BLACK));
}

#[test]
fn test_render_skips_missing_endpoints() {
    let mut image = RgbImage::new(Vec2::new(20, 20));
    let pose = PoseLandmarks::new().with(11, Landmark::new(0.5, 0.5, 0.0));
    let renderer = OverlayRenderer::default();
    renderer.render(&mut image, &pose, &ColorMap::uniform(&BLAZEPOSE, RED));

    // only the ring around (10, 10)
    assert_eq!(image.pixel(13, 10), Some(RED));
    assert_eq!(image.pixel(10, 10), Some(BLACK));
    assert_eq!(image.pixel(17, 10), Some(BLACK));
}

#[test]
fn test_render_overlay_matches_renderer() {
    let pose = ideal_pose();
    let status = classify(&calculate_angle_set(&LandmarkSet::from_pose(&pose)));

    let mut direct = RgbImage::new(Vec2::new(64, 64));
    render_overlay(&mut direct, &pose, &status, &OverlayStyle::default());

    let mut via_renderer = RgbImage::new(Vec2::new(64, 64));
    let renderer = OverlayRenderer::default();
    renderer.render(&mut via_renderer, &pose, &renderer.color_map(&status));

    assert_eq!(direct, via_renderer);
    assert!(direct.data.iter().any(|byte| *byte != 0));
}

#[test]
fn test_render_far_off_frame_landmark_does_not_panic() {
    let mut image = RgbImage::new(Vec2::new(20, 20));
    let pose = PoseLandmarks::new()
        .with(11, Landmark::new(1e12, 0.5, 0.0))
        .with(12, Landmark::new(0.5, 0.5, 0.0));
    let renderer = OverlayRenderer::default();
    renderer.render(&mut image, &pose, &ColorMap::uniform(&BLAZEPOSE, RED));

    // the shoulder line is clipped at the right edge
    assert_eq!(image.pixel(19, 10), Some(RED));
    assert_eq!(image.pixel(2, 10), Some(BLACK));
}
