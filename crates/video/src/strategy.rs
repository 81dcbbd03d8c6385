use {
    image::{GREEN, RED, Rgb, YELLOW},
    posture::{Joint, LandmarkSet, PostureError, calculate_angle_set, classify},
};

/// Decides whether the pose of one frame counts as bad posture
pub trait PostureCriterion {
    fn name(&self) -> &'static str;

    /// `Err` when a landmark the criterion reads is missing
    fn is_bad(&self, landmarks: &LandmarkSet) -> Result<bool, PostureError>;
}

/// Flags frames where the nose sits too close in height to the hips.
///
/// Reads only the vertical gap `|nose.y - mid_hip.y|` in normalized units,
/// a quick check that works on any camera angle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpineUprightness {
    threshold: f64,
}

impl Default for SpineUprightness {
    fn default() -> Self {
        Self { threshold: 0.15 }
    }
}

impl SpineUprightness {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Vertical distance between nose and hip midpoint
    pub fn gap(&self, landmarks: &LandmarkSet) -> Result<f64, PostureError> {
        let nose = landmarks.require(Joint::Nose)?;
        let mid_hip = landmarks.midpoint(Joint::LeftHip, Joint::RightHip)?;
        Ok((nose.y - mid_hip.y).abs())
    }
}

impl PostureCriterion for SpineUprightness {
    fn name(&self) -> &'static str {
        "spine uprightness"
    }

    fn is_bad(&self, landmarks: &LandmarkSet) -> Result<bool, PostureError> {
        Ok(self.gap(landmarks)? < self.threshold)
    }
}

/// Judges frames with the per-segment ergonomic table used for still images.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SegmentThresholds;

impl PostureCriterion for SegmentThresholds {
    fn name(&self) -> &'static str {
        "segment thresholds"
    }

    fn is_bad(&self, landmarks: &LandmarkSet) -> Result<bool, PostureError> {
        let angles = calculate_angle_set(landmarks);
        if angles.is_empty() {
            return Err(PostureError::NoPersonDetected);
        }
        Ok(!classify(&angles).is_good_posture())
    }
}

/// Head position relative to the shoulders
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NeckAlignment {
    Correct,
    SlightlyInclined,
    Inclined,
}

impl NeckAlignment {
    pub fn label(self) -> &'static str {
        match self {
            NeckAlignment::Correct => "Cuello correcto",
            NeckAlignment::SlightlyInclined => "Cuello levemente inclinado",
            NeckAlignment::Inclined => "Cuello inclinado",
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            NeckAlignment::Correct => GREEN,
            NeckAlignment::SlightlyInclined => YELLOW,
            NeckAlignment::Inclined => RED,
        }
    }
}

/// Band edges, in degrees, of the neck-alignment angle.
///
/// Above `upper` or below `lower` is correct, `inclined_from..=upper` is
/// inclined, and the rest is slightly inclined.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NeckBands {
    pub lower: f64,
    pub inclined_from: f64,
    pub upper: f64,
}

impl Default for NeckBands {
    fn default() -> Self {
        Self {
            lower: 75.0,
            inclined_from: 95.0,
            upper: 115.0,
        }
    }
}

impl NeckBands {
    pub fn classify(&self, degrees: f64) -> NeckAlignment {
        if degrees > self.upper || degrees < self.lower {
            NeckAlignment::Correct
        } else if degrees >= self.inclined_from {
            NeckAlignment::Inclined
        } else {
            NeckAlignment::SlightlyInclined
        }
    }
}

/// Angle in degrees between the shoulder-midpoint to ear-midpoint vector and
/// the image's downward vertical axis.
pub fn neck_angle(landmarks: &LandmarkSet) -> Result<f64, PostureError> {
    let ears = landmarks.midpoint(Joint::LeftEar, Joint::RightEar)?;
    let shoulders = landmarks.midpoint(Joint::LeftShoulder, Joint::RightShoulder)?;
    let v = ears.position() - shoulders.position();
    Ok(v.x.atan2(v.y).to_degrees().abs())
}
