use crate::PostureError;
use base::Vec2;
use serde::{Deserialize, Serialize};

/// Number of landmark slots produced by the pose estimator (BlazePose layout)
pub const POSE_LANDMARK_COUNT: usize = 33;

/// Number of named joints used by the angle rules
pub const JOINT_COUNT: usize = 21;

/// A single estimated body keypoint
///
/// `x` and `y` are normalized to `[0, 1]` relative to the image; `z` is the
/// estimator's relative depth and is carried but never used for angles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn position(&self) -> Vec2<f64> {
        Vec2::new(self.x, self.y)
    }

    /// Arithmetic mean of two landmarks
    pub fn midpoint(&self, other: &Landmark) -> Landmark {
        let mid = self.position().midpoint(other.position());
        Landmark::new(mid.x, mid.y, (self.z + other.z) / 2.0)
    }
}

impl From<Vec2<f64>> for Landmark {
    fn from(position: Vec2<f64>) -> Self {
        Landmark::new(position.x, position.y, 0.0)
    }
}

/// Joints the posture rules read, named after the estimator's landmarks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Joint {
    Nose,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftPinky,
    RightPinky,
    LeftIndex,
    RightIndex,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftFootIndex,
    RightFootIndex,
}

impl Joint {
    pub const ALL: [Joint; JOINT_COUNT] = [
        Joint::Nose,
        Joint::LeftEar,
        Joint::RightEar,
        Joint::LeftShoulder,
        Joint::RightShoulder,
        Joint::LeftElbow,
        Joint::RightElbow,
        Joint::LeftWrist,
        Joint::RightWrist,
        Joint::LeftPinky,
        Joint::RightPinky,
        Joint::LeftIndex,
        Joint::RightIndex,
        Joint::LeftHip,
        Joint::RightHip,
        Joint::LeftKnee,
        Joint::RightKnee,
        Joint::LeftAnkle,
        Joint::RightAnkle,
        Joint::LeftFootIndex,
        Joint::RightFootIndex,
    ];

    /// Slot of this joint in the estimator's 33-landmark output
    pub fn pose_index(self) -> usize {
        match self {
            Joint::Nose => 0,
            Joint::LeftEar => 7,
            Joint::RightEar => 8,
            Joint::LeftShoulder => 11,
            Joint::RightShoulder => 12,
            Joint::LeftElbow => 13,
            Joint::RightElbow => 14,
            Joint::LeftWrist => 15,
            Joint::RightWrist => 16,
            Joint::LeftPinky => 17,
            Joint::RightPinky => 18,
            Joint::LeftIndex => 19,
            Joint::RightIndex => 20,
            Joint::LeftHip => 23,
            Joint::RightHip => 24,
            Joint::LeftKnee => 25,
            Joint::RightKnee => 26,
            Joint::LeftAnkle => 27,
            Joint::RightAnkle => 28,
            Joint::LeftFootIndex => 31,
            Joint::RightFootIndex => 32,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Joint::Nose => "nose",
            Joint::LeftEar => "left_ear",
            Joint::RightEar => "right_ear",
            Joint::LeftShoulder => "left_shoulder",
            Joint::RightShoulder => "right_shoulder",
            Joint::LeftElbow => "left_elbow",
            Joint::RightElbow => "right_elbow",
            Joint::LeftWrist => "left_wrist",
            Joint::RightWrist => "right_wrist",
            Joint::LeftPinky => "left_pinky",
            Joint::RightPinky => "right_pinky",
            Joint::LeftIndex => "left_index",
            Joint::RightIndex => "right_index",
            Joint::LeftHip => "left_hip",
            Joint::RightHip => "right_hip",
            Joint::LeftKnee => "left_knee",
            Joint::RightKnee => "right_knee",
            Joint::LeftAnkle => "left_ankle",
            Joint::RightAnkle => "right_ankle",
            Joint::LeftFootIndex => "left_foot_index",
            Joint::RightFootIndex => "right_foot_index",
        }
    }
}

impl TryFrom<usize> for Joint {
    type Error = String;

    /// Map an estimator slot back to its joint; slots the rules never read fail
    fn try_from(pose_index: usize) -> Result<Self, Self::Error> {
        Joint::ALL
            .into_iter()
            .find(|joint| joint.pose_index() == pose_index)
            .ok_or_else(|| format!("Pose landmark {} is not a named joint", pose_index))
    }
}

/// Raw per-person output of the pose estimator
///
/// Always holds [`POSE_LANDMARK_COUNT`] slots; a slot is `None` when the
/// estimator did not report that landmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Option<Landmark>>", into = "Vec<Option<Landmark>>")]
pub struct PoseLandmarks {
    slots: Vec<Option<Landmark>>,
}

impl Default for PoseLandmarks {
    fn default() -> Self {
        Self {
            slots: vec![None; POSE_LANDMARK_COUNT],
        }
    }
}

impl PoseLandmarks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from every slot reported by the estimator, in index order
    pub fn from_landmarks(landmarks: &[Landmark]) -> Result<Self, PostureError> {
        Self::try_from(landmarks.iter().copied().map(Some).collect::<Vec<_>>())
            .map_err(PostureError::InvalidLandmarks)
    }

    /// Set a slot (builder pattern); indices past the layout are ignored
    pub fn with(mut self, index: usize, landmark: Landmark) -> Self {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = Some(landmark);
        }
        self
    }

    /// Set the slot of a named joint (builder pattern)
    pub fn with_joint(self, joint: Joint, landmark: Landmark) -> Self {
        self.with(joint.pose_index(), landmark)
    }

    pub fn get(&self, index: usize) -> Option<Landmark> {
        self.slots.get(index).copied().flatten()
    }

    pub fn joint(&self, joint: Joint) -> Option<Landmark> {
        self.get(joint.pose_index())
    }

    /// Present landmarks with their slot index
    pub fn iter(&self) -> impl Iterator<Item = (usize, Landmark)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.map(|landmark| (index, landmark)))
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }
}

impl TryFrom<Vec<Option<Landmark>>> for PoseLandmarks {
    type Error = String;

    /// Shorter inputs are padded with missing slots; longer ones are rejected
    fn try_from(mut slots: Vec<Option<Landmark>>) -> Result<Self, Self::Error> {
        if slots.len() > POSE_LANDMARK_COUNT {
            return Err(format!(
                "expected at most {} landmarks, got {}",
                POSE_LANDMARK_COUNT,
                slots.len()
            ));
        }
        slots.resize(POSE_LANDMARK_COUNT, None);
        Ok(Self { slots })
    }
}

impl From<PoseLandmarks> for Vec<Option<Landmark>> {
    fn from(pose: PoseLandmarks) -> Self {
        pose.slots
    }
}

/// The named joints of one image or frame
///
/// Built once from [`PoseLandmarks`] and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LandmarkSet {
    joints: [Option<Landmark>; JOINT_COUNT],
}

impl LandmarkSet {
    pub fn from_pose(pose: &PoseLandmarks) -> Self {
        let mut set = Self::default();
        for (slot, joint) in set.joints.iter_mut().zip(Joint::ALL) {
            *slot = pose.joint(joint);
        }
        set
    }

    /// Set a joint (builder pattern)
    pub fn with(mut self, joint: Joint, landmark: Landmark) -> Self {
        self.joints[joint as usize] = Some(landmark);
        self
    }

    pub fn get(&self, joint: Joint) -> Option<Landmark> {
        self.joints[joint as usize]
    }

    /// Like [`get`](Self::get), but a missing joint is a `MissingLandmark` error
    pub fn require(&self, joint: Joint) -> Result<Landmark, PostureError> {
        self.get(joint).ok_or(PostureError::MissingLandmark(joint))
    }

    /// Midpoint of two joints; both must be present
    pub fn midpoint(&self, a: Joint, b: Joint) -> Result<Landmark, PostureError> {
        Ok(self.require(a)?.midpoint(&self.require(b)?))
    }

    pub fn len(&self) -> usize {
        self.joints.iter().filter(|joint| joint.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.iter().all(|joint| joint.is_none())
    }
}

impl From<&PoseLandmarks> for LandmarkSet {
    fn from(pose: &PoseLandmarks) -> Self {
        LandmarkSet::from_pose(pose)
    }
}

impl FromIterator<(Joint, Landmark)> for LandmarkSet {
    fn from_iter<I: IntoIterator<Item = (Joint, Landmark)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(LandmarkSet::default(), |set, (joint, landmark)| set.with(joint, landmark))
    }
}
