// Synthetic poses with known joint angles.
#![allow(dead_code)]

use {base::Vec2, posture::*};

pub const EPS: f64 = 1e-6;

/// Angle per area the synthetic pose is built to show, both sides equal
#[derive(Clone, Copy, Debug)]
pub struct TargetAngles {
    pub hip: f64,
    pub knee: f64,
    pub ankle: f64,
    pub elbow: f64,
    pub shoulder: f64,
    pub wrist: f64,
    pub neck: f64,
    pub visual: f64,
}

impl Default for TargetAngles {
    fn default() -> Self {
        Self {
            hip: 100.0,
            knee: 95.0,
            ankle: 100.0,
            elbow: 105.0,
            shoulder: 10.0,
            wrist: 175.0,
            neck: 160.0,
            visual: 95.0,
        }
    }
}

// point at `length` from `vertex` so that the angle from-vertex-point is `degrees`
fn place(vertex: Vec2<f64>, from: Vec2<f64>, degrees: f64, length: f64) -> Vec2<f64> {
    let heading = (from - vertex).heading() + degrees.to_radians();
    Vec2::new(vertex.x + length * heading.cos(), vertex.y + length * heading.sin())
}

fn mirror(point: Vec2<f64>) -> Vec2<f64> {
    Vec2::new(1.0 - point.x, point.y)
}

/// Left side is built joint by joint, right side is its mirror image around
/// x = 0.5, so every midpoint of a left/right pair lies on x = 0.5.
pub fn build_pose(targets: &TargetAngles) -> PoseLandmarks {
    let hip = Vec2::new(0.45, 0.6);
    let shoulder = Vec2::new(0.45, 0.35);
    let knee = place(hip, shoulder, -targets.hip, 0.2);
    let ankle = place(knee, hip, targets.knee, 0.2);
    let foot = place(ankle, knee, -targets.ankle, 0.08);
    let elbow = place(shoulder, hip, -targets.shoulder, 0.15);
    let wrist = place(elbow, shoulder, targets.elbow, 0.15);
    let hand = place(wrist, elbow, targets.wrist, 0.05);

    let left = [
        (Joint::LeftShoulder, Joint::RightShoulder, shoulder),
        (Joint::LeftHip, Joint::RightHip, hip),
        (Joint::LeftKnee, Joint::RightKnee, knee),
        (Joint::LeftAnkle, Joint::RightAnkle, ankle),
        (Joint::LeftFootIndex, Joint::RightFootIndex, foot),
        (Joint::LeftElbow, Joint::RightElbow, elbow),
        (Joint::LeftWrist, Joint::RightWrist, wrist),
        (Joint::LeftIndex, Joint::RightIndex, hand),
        (Joint::LeftPinky, Joint::RightPinky, hand),
    ];

    let mut pose = PoseLandmarks::new();
    for (left_joint, right_joint, point) in left {
        pose = pose
            .with_joint(left_joint, Landmark::from(point))
            .with_joint(right_joint, Landmark::from(mirror(point)));
    }

    // head: nose from the neck angle, then the ear midpoint on x = 0.5 such
    // that shoulders-ears-nose shows the visual angle
    let mid_shoulder = Vec2::new(0.5, shoulder.y);
    let mid_hip = Vec2::new(0.5, hip.y);
    let nose = place(mid_shoulder, mid_hip, targets.neck, 0.12);
    let ear_y = nose.y - (nose.x - 0.5).abs() / targets.visual.to_radians().tan();
    let ear = Vec2::new(0.47, ear_y);

    pose.with_joint(Joint::Nose, Landmark::from(nose))
        .with_joint(Joint::LeftEar, Landmark::from(ear))
        .with_joint(Joint::RightEar, Landmark::from(mirror(ear)))
}

pub fn ideal_pose() -> PoseLandmarks {
    build_pose(&TargetAngles::default())
}

pub fn ideal_landmarks() -> LandmarkSet {
    LandmarkSet::from_pose(&ideal_pose())
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPS,
        "expected {expected}, got {actual}"
    );
}
