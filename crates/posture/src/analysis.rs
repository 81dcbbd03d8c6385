use {
    crate::*,
    image::{RgbImage, decode_rgb},
    serde::Serialize,
};

/// Source of body landmarks for an image
///
/// One estimator instance serves one caller at a time.
pub trait PoseEstimator {
    /// Landmarks of the single person in `image`, or `None` when nobody was found
    fn estimate(&mut self, image: &RgbImage) -> Result<Option<PoseLandmarks>, PostureError>;
}

/// Everything derived from one set of landmarks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostureAssessment {
    pub angles: AngleSet,
    pub status: SegmentStatus,
    pub is_good_posture: bool,
    pub report: PostureReport,
}

/// Result of analyzing one image
#[derive(Debug, Clone)]
pub struct ImageAnalysis {
    pub landmarks: PoseLandmarks,
    pub assessment: PostureAssessment,
    /// Input image with the status-colored skeleton drawn on it
    pub annotated: RgbImage,
}

impl ImageAnalysis {
    pub fn is_good_posture(&self) -> bool {
        self.assessment.is_good_posture
    }

    pub fn report(&self) -> &PostureReport {
        &self.assessment.report
    }
}

/// Angles, classification and report for one pose.
pub fn assess_pose(pose: &PoseLandmarks) -> PostureAssessment {
    let angles = calculate_angle_set(&LandmarkSet::from_pose(pose));
    let status = classify(&angles);
    let is_good_posture = status.is_good_posture();
    let report = generate_recommendations(&status);
    log::debug!(
        "assessed {} angles, {} warnings, good posture: {}",
        angles.len(),
        report.warnings().count(),
        is_good_posture
    );
    PostureAssessment {
        angles,
        status,
        is_good_posture,
        report,
    }
}

/// Draw the assessment's skeleton onto a copy of `image`.
pub fn annotate(image: &RgbImage, pose: &PoseLandmarks, status: &SegmentStatus, renderer: &OverlayRenderer) -> RgbImage {
    let mut annotated = image.clone();
    let colors = renderer.color_map(status);
    renderer.render(&mut annotated, pose, &colors);
    annotated
}

/// Analyze an already decoded image.
pub fn analyze_rgb(
    image: &RgbImage,
    estimator: &mut dyn PoseEstimator,
    renderer: &OverlayRenderer,
) -> Result<ImageAnalysis, PostureError> {
    let landmarks = match estimator.estimate(image)? {
        Some(landmarks) if !landmarks.is_empty() => landmarks,
        _ => {
            log::debug!("no person in {}x{} image", image.width(), image.height());
            return Err(PostureError::NoPersonDetected);
        }
    };
    let assessment = assess_pose(&landmarks);
    let annotated = annotate(image, &landmarks, &assessment.status, renderer);
    Ok(ImageAnalysis {
        landmarks,
        assessment,
        annotated,
    })
}

/// Decode an encoded image and analyze it.
///
/// Fails with `Decode` for unreadable bytes and `NoPersonDetected` when the
/// estimator finds nobody.
pub fn analyze_image(
    bytes: &[u8],
    estimator: &mut dyn PoseEstimator,
    renderer: &OverlayRenderer,
) -> Result<ImageAnalysis, PostureError> {
    let image = decode_rgb(bytes)?;
    analyze_rgb(&image, estimator, renderer)
}
