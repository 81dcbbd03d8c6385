mod common;

use {
    base::Vec2,
    common::*,
    image::{RgbImage, encode_png},
    posture::*,
};

/// Returns a fixed answer and counts how often it was asked.
struct FixedEstimator {
    pose: Option<PoseLandmarks>,
    calls: usize,
}

impl FixedEstimator {
    fn new(pose: Option<PoseLandmarks>) -> Self {
        Self { pose, calls: 0 }
    }
}

impl PoseEstimator for FixedEstimator {
    fn estimate(&mut self, _image: &RgbImage) -> Result<Option<PoseLandmarks>, PostureError> {
        self.calls += 1;
        Ok(self.pose.clone())
    }
}

struct FailingEstimator;

impl PoseEstimator for FailingEstimator {
    fn estimate(&mut self, _image: &RgbImage) -> Result<Option<PoseLandmarks>, PostureError> {
        Err(PostureError::Estimator("model not loaded".to_string()))
    }
}

fn png_bytes() -> Vec<u8> {
    encode_png(&RgbImage::new(Vec2::new(64, 48))).unwrap()
}

#[test]
fn test_analyze_ideal_image() {
    let mut estimator = FixedEstimator::new(Some(ideal_pose()));
    let analysis = analyze_image(&png_bytes(), &mut estimator, &OverlayRenderer::default()).unwrap();

    assert_eq!(estimator.calls, 1);
    assert!(analysis.is_good_posture());
    assert_eq!(analysis.report().recommendations.len(), 1);
    assert_eq!(analysis.report().recommendations[0].kind, RecommendationKind::Success);
    assert_eq!(analysis.assessment.angles.len(), SEGMENT_COUNT);
    assert_eq!(analysis.annotated.size, Vec2::new(64, 48));
    assert!(analysis.annotated.data.iter().any(|byte| *byte != 0));
    assert_eq!(analysis.landmarks, ideal_pose());
}

#[test]
fn test_no_person_detected() {
    let renderer = OverlayRenderer::default();

    let mut nobody = FixedEstimator::new(None);
    assert!(matches!(
        analyze_image(&png_bytes(), &mut nobody, &renderer),
        Err(PostureError::NoPersonDetected)
    ));

    let mut empty = FixedEstimator::new(Some(PoseLandmarks::new()));
    assert!(matches!(
        analyze_image(&png_bytes(), &mut empty, &renderer),
        Err(PostureError::NoPersonDetected)
    ));
}

#[test]
fn test_undecodable_bytes() {
    let mut estimator = FixedEstimator::new(Some(ideal_pose()));
    let result = analyze_image(b"definitely not an image", &mut estimator, &OverlayRenderer::default());
    assert!(matches!(result, Err(PostureError::Decode(_))));
    assert_eq!(estimator.calls, 0);
}

#[test]
fn test_estimator_error_propagates() {
    let image = RgbImage::new(Vec2::new(8, 8));
    let result = analyze_rgb(&image, &mut FailingEstimator, &OverlayRenderer::default());
    assert!(matches!(result, Err(PostureError::Estimator(_))));
}

#[test]
fn test_annotate_leaves_input_untouched() {
    let image = RgbImage::new(Vec2::new(32, 32));
    let pose = ideal_pose();
    let assessment = assess_pose(&pose);
    let annotated = annotate(&image, &pose, &assessment.status, &OverlayRenderer::default());
    assert!(image.data.iter().all(|byte| *byte == 0));
    assert_ne!(annotated, image);
}

#[test]
fn test_assessment_json_shape() {
    let assessment = assess_pose(&build_pose(&TargetAngles {
        hip: 60.0,
        ..TargetAngles::default()
    }));
    assert!(!assessment.is_good_posture);

    let json = serde_json::to_value(&assessment).unwrap();
    assert_eq!(json["is_good_posture"], false);
    assert_eq!(json["angles"].as_object().map(|angles| angles.len()), Some(SEGMENT_COUNT));
    assert_eq!(json["report"]["recommendations"][0]["area"], "Cadera");
    assert_eq!(json["report"]["recommendations"][0]["angle"], 60.0);
    let status = json["status"].as_object().unwrap();
    assert_eq!(status.len(), SEGMENT_COUNT);
    assert_eq!(status["left_hip"], "incorrecto");
    assert_eq!(status["right_hip"], "incorrecto");
    assert_eq!(status["left_knee"], "correcto");
}

#[test]
fn test_error_display() {
    assert_eq!(
        PostureError::MissingLandmark(Joint::LeftEar).to_string(),
        "missing landmark: left_ear"
    );
    assert_eq!(PostureError::NoPersonDetected.to_string(), "no person detected");
}
