use crate::*;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Number of angle-bearing segments
pub const SEGMENT_COUNT: usize = 14;

/// A body segment whose joint angle is classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftElbow,
    RightElbow,
    Neck,
    LeftShoulder,
    RightShoulder,
    LeftWrist,
    RightWrist,
    /// Gaze: head inclination seen from the shoulders through the ears
    Visual,
}

impl Segment {
    pub const ALL: [Segment; SEGMENT_COUNT] = [
        Segment::LeftHip,
        Segment::RightHip,
        Segment::LeftKnee,
        Segment::RightKnee,
        Segment::LeftAnkle,
        Segment::RightAnkle,
        Segment::LeftElbow,
        Segment::RightElbow,
        Segment::Neck,
        Segment::LeftShoulder,
        Segment::RightShoulder,
        Segment::LeftWrist,
        Segment::RightWrist,
        Segment::Visual,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Segment::LeftHip => "left_hip",
            Segment::RightHip => "right_hip",
            Segment::LeftKnee => "left_knee",
            Segment::RightKnee => "right_knee",
            Segment::LeftAnkle => "left_ankle",
            Segment::RightAnkle => "right_ankle",
            Segment::LeftElbow => "left_elbow",
            Segment::RightElbow => "right_elbow",
            Segment::Neck => "neck",
            Segment::LeftShoulder => "left_shoulder",
            Segment::RightShoulder => "right_shoulder",
            Segment::LeftWrist => "left_wrist",
            Segment::RightWrist => "right_wrist",
            Segment::Visual => "visual",
        }
    }
}

/// Joint angle in degrees at vertex `p2`, between the rays to `p1` and `p3`.
///
/// The difference of the two ray headings is taken in absolute value and
/// folded back into `[0, 180]`, so the result does not depend on the order
/// of `p1` and `p3`. Depth is ignored.
pub fn calculate_angle(p1: &Landmark, p2: &Landmark, p3: &Landmark) -> f64 {
    let vertex = p2.position();
    let radians = (p3.position() - vertex).heading() - (p1.position() - vertex).heading();
    let degrees = radians.to_degrees().abs();
    if degrees > 180.0 { 360.0 - degrees } else { degrees }
}

/// Where an angle rule takes one of its three points from
#[derive(Debug, Clone, Copy)]
enum Point {
    Joint(Joint),
    Mid(Joint, Joint),
}

impl Point {
    fn resolve(self, landmarks: &LandmarkSet) -> Result<Landmark, PostureError> {
        match self {
            Point::Joint(joint) => landmarks.require(joint),
            Point::Mid(a, b) => landmarks.midpoint(a, b),
        }
    }
}

use Joint::*;

/// Three-point rule for every segment, vertex in the middle
const ANGLE_RULES: [(Segment, [Point; 3]); SEGMENT_COUNT] = [
    (Segment::LeftHip, [Point::Joint(LeftShoulder), Point::Joint(LeftHip), Point::Joint(LeftKnee)]),
    (Segment::RightHip, [Point::Joint(RightShoulder), Point::Joint(RightHip), Point::Joint(RightKnee)]),
    (Segment::LeftKnee, [Point::Joint(LeftHip), Point::Joint(LeftKnee), Point::Joint(LeftAnkle)]),
    (Segment::RightKnee, [Point::Joint(RightHip), Point::Joint(RightKnee), Point::Joint(RightAnkle)]),
    (Segment::LeftAnkle, [Point::Joint(LeftKnee), Point::Joint(LeftAnkle), Point::Joint(LeftFootIndex)]),
    (Segment::RightAnkle, [Point::Joint(RightKnee), Point::Joint(RightAnkle), Point::Joint(RightFootIndex)]),
    (Segment::LeftElbow, [Point::Joint(LeftShoulder), Point::Joint(LeftElbow), Point::Joint(LeftWrist)]),
    (Segment::RightElbow, [Point::Joint(RightShoulder), Point::Joint(RightElbow), Point::Joint(RightWrist)]),
    (Segment::Neck, [Point::Mid(LeftHip, RightHip), Point::Mid(LeftShoulder, RightShoulder), Point::Joint(Nose)]),
    (Segment::LeftShoulder, [Point::Joint(LeftHip), Point::Joint(LeftShoulder), Point::Joint(LeftElbow)]),
    (Segment::RightShoulder, [Point::Joint(RightHip), Point::Joint(RightShoulder), Point::Joint(RightElbow)]),
    (Segment::LeftWrist, [Point::Joint(LeftElbow), Point::Joint(LeftWrist), Point::Mid(LeftIndex, LeftPinky)]),
    (Segment::RightWrist, [Point::Joint(RightElbow), Point::Joint(RightWrist), Point::Mid(RightIndex, RightPinky)]),
    (Segment::Visual, [Point::Mid(LeftShoulder, RightShoulder), Point::Mid(LeftEar, RightEar), Point::Joint(Nose)]),
];

/// Computed angles, one optional slot per [`Segment`]
///
/// A slot is `None` when a landmark the rule needs was not detected.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AngleSet {
    angles: [Option<f64>; SEGMENT_COUNT],
}

impl AngleSet {
    /// Set an angle (builder pattern)
    pub fn with(mut self, segment: Segment, degrees: f64) -> Self {
        self.angles[segment as usize] = Some(degrees);
        self
    }

    pub fn get(&self, segment: Segment) -> Option<f64> {
        self.angles[segment as usize]
    }

    /// Present angles in segment order
    pub fn iter(&self) -> impl Iterator<Item = (Segment, f64)> + '_ {
        Segment::ALL
            .into_iter()
            .filter_map(|segment| self.get(segment).map(|angle| (segment, angle)))
    }

    pub fn len(&self) -> usize {
        self.angles.iter().filter(|angle| angle.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.iter().all(|angle| angle.is_none())
    }
}

impl Serialize for AngleSet {
    /// Serialized as `{ "left_hip": 97.5, ... }` with absent segments left out
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (segment, angle) in self.iter() {
            map.serialize_entry(segment.name(), &angle)?;
        }
        map.end()
    }
}

fn resolve_points(points: [Point; 3], landmarks: &LandmarkSet) -> Result<[Landmark; 3], PostureError> {
    Ok([
        points[0].resolve(landmarks)?,
        points[1].resolve(landmarks)?,
        points[2].resolve(landmarks)?,
    ])
}

/// Derive every computable segment angle from a landmark set.
///
/// Missing landmarks never abort: the affected segment is left out and the
/// rest is still computed.
pub fn calculate_angle_set(landmarks: &LandmarkSet) -> AngleSet {
    let mut angles = AngleSet::default();
    for (segment, points) in ANGLE_RULES {
        match resolve_points(points, landmarks) {
            Ok([p1, p2, p3]) => {
                let angle = calculate_angle(&p1, &p2, &p3);
                if angle.is_finite() {
                    angles = angles.with(segment, angle);
                } else {
                    log::debug!("{}: angle is not finite, skipped", segment.name());
                }
            }
            Err(error) => log::debug!("{}: {}, skipped", segment.name(), error),
        }
    }
    angles
}
