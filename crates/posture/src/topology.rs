use crate::*;

/// Skeleton layout of a pose estimator: which landmarks are connected and
/// which segment each landmark and connection belongs to.
///
/// Tables are static; a new estimator layout is a new value with its own
/// `version`.
#[derive(Debug)]
pub struct SkeletonTopology {
    pub version: &'static str,
    pub landmark_count: usize,
    /// Landmark index pairs drawn as bones
    pub connections: &'static [(usize, usize)],
    joint_owners: &'static [(usize, Segment)],
    connection_owners: &'static [((usize, usize), Segment)],
    /// Connections touching this landmark fall back to this segment
    fallback_joint: Option<(usize, Segment)>,
}

impl SkeletonTopology {
    /// Segment that colors a landmark, if any
    pub fn joint_owner(&self, index: usize) -> Option<Segment> {
        self.joint_owners
            .iter()
            .find(|(joint, _)| *joint == index)
            .map(|(_, segment)| *segment)
    }

    /// Segment that colors a connection; pairs match in either order
    pub fn connection_owner(&self, start: usize, end: usize) -> Option<Segment> {
        self.connection_owners
            .iter()
            .find(|((a, b), _)| (*a == start && *b == end) || (*a == end && *b == start))
            .map(|(_, segment)| *segment)
            .or_else(|| {
                self.fallback_joint
                    .filter(|(joint, _)| *joint == start || *joint == end)
                    .map(|(_, segment)| segment)
            })
    }
}

/// 33-landmark BlazePose layout
pub static BLAZEPOSE: SkeletonTopology = SkeletonTopology {
    version: "blazepose-33/1",
    landmark_count: POSE_LANDMARK_COUNT,
    connections: &[
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 7),
        (0, 4),
        (4, 5),
        (5, 6),
        (6, 8),
        (9, 10),
        (11, 12),
        (11, 13),
        (13, 15),
        (15, 17),
        (15, 19),
        (15, 21),
        (17, 19),
        (12, 14),
        (14, 16),
        (16, 18),
        (16, 20),
        (16, 22),
        (18, 20),
        (11, 23),
        (12, 24),
        (23, 24),
        (23, 25),
        (24, 26),
        (25, 27),
        (26, 28),
        (27, 29),
        (28, 30),
        (29, 31),
        (30, 32),
        (27, 31),
        (28, 32),
    ],
    joint_owners: &[
        (11, Segment::LeftShoulder),
        (12, Segment::RightShoulder),
        (13, Segment::LeftElbow),
        (14, Segment::RightElbow),
        (15, Segment::LeftWrist),
        (17, Segment::LeftWrist),
        (19, Segment::LeftWrist),
        (16, Segment::RightWrist),
        (18, Segment::RightWrist),
        (20, Segment::RightWrist),
        (25, Segment::LeftKnee),
        (26, Segment::RightKnee),
        (27, Segment::LeftAnkle),
        (31, Segment::LeftAnkle),
        (28, Segment::RightAnkle),
        (32, Segment::RightAnkle),
        (23, Segment::LeftHip),
        (24, Segment::RightHip),
        (0, Segment::Visual),
        (7, Segment::Visual),
        (8, Segment::Visual),
    ],
    connection_owners: &[
        ((11, 13), Segment::LeftShoulder),
        ((12, 14), Segment::RightShoulder),
        ((13, 15), Segment::LeftElbow),
        ((14, 16), Segment::RightElbow),
        ((15, 17), Segment::LeftWrist),
        ((15, 19), Segment::LeftWrist),
        ((16, 18), Segment::RightWrist),
        ((16, 20), Segment::RightWrist),
        ((11, 23), Segment::LeftHip),
        ((23, 25), Segment::LeftHip),
        ((12, 24), Segment::RightHip),
        ((24, 26), Segment::RightHip),
        ((25, 27), Segment::LeftKnee),
        ((26, 28), Segment::RightKnee),
        ((27, 31), Segment::LeftAnkle),
        ((28, 32), Segment::RightAnkle),
        ((0, 7), Segment::Visual),
        ((0, 8), Segment::Visual),
        // head and trunk cluster
        ((11, 12), Segment::Neck),
        ((23, 24), Segment::Neck),
        ((11, 24), Segment::Neck),
        ((12, 23), Segment::Neck),
    ],
    fallback_joint: Some((0, Segment::Neck)),
};
