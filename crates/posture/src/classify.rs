use {
    crate::*,
    serde::{
        Serialize,
        ser::{SerializeMap, Serializer},
    },
};

/// Number of body areas reported on
pub const AREA_COUNT: usize = 8;

/// Pass/fail of one segment or area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Status {
    #[serde(rename = "correcto")]
    Good,
    #[serde(rename = "incorrecto")]
    Bad,
}

impl Status {
    pub fn is_good(self) -> bool {
        self == Status::Good
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Good => "correcto",
            Status::Bad => "incorrecto",
        }
    }
}

/// Inclusive range of acceptable angles in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoodRange {
    pub min: f64,
    pub max: f64,
}

impl GoodRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, degrees: f64) -> bool {
        degrees >= self.min && degrees <= self.max
    }

    pub fn status(&self, degrees: f64) -> Status {
        if self.contains(degrees) { Status::Good } else { Status::Bad }
    }
}

/// Body area, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Area {
    Hip,
    Knee,
    Ankle,
    Elbow,
    Neck,
    Shoulder,
    Wrist,
    Visual,
}

// indexed by `Area`
const THRESHOLDS: [GoodRange; AREA_COUNT] = [
    GoodRange::new(80.0, 120.0),
    GoodRange::new(80.0, 110.0),
    GoodRange::new(80.0, 120.0),
    GoodRange::new(90.0, 120.0),
    GoodRange::new(130.0, 180.0),
    GoodRange::new(0.0, 20.0),
    GoodRange::new(160.0, 190.0),
    GoodRange::new(80.0, 110.0),
];

impl Area {
    pub const ALL: [Area; AREA_COUNT] = [
        Area::Hip,
        Area::Knee,
        Area::Ankle,
        Area::Elbow,
        Area::Neck,
        Area::Shoulder,
        Area::Wrist,
        Area::Visual,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Area::Hip => "hip",
            Area::Knee => "knee",
            Area::Ankle => "ankle",
            Area::Elbow => "elbow",
            Area::Neck => "neck",
            Area::Shoulder => "shoulder",
            Area::Wrist => "wrist",
            Area::Visual => "visual",
        }
    }

    /// Segments measured for this area, left side first
    pub fn segments(self) -> &'static [Segment] {
        match self {
            Area::Hip => &[Segment::LeftHip, Segment::RightHip],
            Area::Knee => &[Segment::LeftKnee, Segment::RightKnee],
            Area::Ankle => &[Segment::LeftAnkle, Segment::RightAnkle],
            Area::Elbow => &[Segment::LeftElbow, Segment::RightElbow],
            Area::Neck => &[Segment::Neck],
            Area::Shoulder => &[Segment::LeftShoulder, Segment::RightShoulder],
            Area::Wrist => &[Segment::LeftWrist, Segment::RightWrist],
            Area::Visual => &[Segment::Visual],
        }
    }

    pub fn good_range(self) -> GoodRange {
        THRESHOLDS[self as usize]
    }

    /// Whether the area is judged on the mean of its sides rather than on
    /// each side separately
    pub fn judged_on_mean(self) -> bool {
        self == Area::Hip
    }
}

impl Segment {
    pub fn area(self) -> Area {
        match self {
            Segment::LeftHip | Segment::RightHip => Area::Hip,
            Segment::LeftKnee | Segment::RightKnee => Area::Knee,
            Segment::LeftAnkle | Segment::RightAnkle => Area::Ankle,
            Segment::LeftElbow | Segment::RightElbow => Area::Elbow,
            Segment::Neck => Area::Neck,
            Segment::LeftShoulder | Segment::RightShoulder => Area::Shoulder,
            Segment::LeftWrist | Segment::RightWrist => Area::Wrist,
            Segment::Visual => Area::Visual,
        }
    }

    pub fn good_range(self) -> GoodRange {
        self.area().good_range()
    }
}

/// Verdict for one area: the representative angle and its status
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaVerdict {
    /// Mean of the present sides, or the single angle
    pub angle: f64,
    pub status: Status,
}

/// Classification of one [`AngleSet`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SegmentStatus {
    segments: [Option<Status>; SEGMENT_COUNT],
    areas: [Option<AreaVerdict>; AREA_COUNT],
}

impl SegmentStatus {
    /// Status of a single segment; `None` when its angle was not computed
    pub fn get(&self, segment: Segment) -> Option<Status> {
        self.segments[segment as usize]
    }

    pub fn area(&self, area: Area) -> Option<AreaVerdict> {
        self.areas[area as usize]
    }

    /// Present area verdicts in report order
    pub fn areas(&self) -> impl Iterator<Item = (Area, AreaVerdict)> + '_ {
        Area::ALL
            .into_iter()
            .filter_map(|area| self.area(area).map(|verdict| (area, verdict)))
    }

    /// True when no present area is bad, so also for an empty classification
    pub fn is_good_posture(&self) -> bool {
        self.areas().all(|(_, verdict)| verdict.status.is_good())
    }

    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|status| status.is_none())
    }

    /// Present segment statuses in segment order
    pub fn segments(&self) -> impl Iterator<Item = (Segment, Status)> + '_ {
        Segment::ALL
            .into_iter()
            .filter_map(|segment| self.get(segment).map(|status| (segment, status)))
    }
}

impl Serialize for SegmentStatus {
    /// Serialized as `{ "left_hip": "correcto", ... }` with absent segments left out
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (segment, status) in self.segments() {
            map.serialize_entry(segment.name(), &status)?;
        }
        map.end()
    }
}

fn judge_area(area: Area, angles: &AngleSet) -> Option<AreaVerdict> {
    let sides: Vec<f64> = area
        .segments()
        .iter()
        .filter_map(|segment| angles.get(*segment))
        .collect();
    if sides.is_empty() {
        return None;
    }
    let range = area.good_range();
    let angle = sides.iter().sum::<f64>() / sides.len() as f64;
    // non-hip areas fail when any side fails, even if the mean passes
    let status = if area.judged_on_mean() || sides.iter().all(|side| range.contains(*side)) {
        range.status(angle)
    } else {
        Status::Bad
    };
    Some(AreaVerdict { angle, status })
}

/// Classify every present angle against the threshold table.
pub fn classify(angles: &AngleSet) -> SegmentStatus {
    let mut status = SegmentStatus::default();
    for (segment, angle) in angles.iter() {
        status.segments[segment as usize] = Some(segment.good_range().status(angle));
    }
    for area in Area::ALL {
        status.areas[area as usize] = judge_area(area, angles);
    }
    status
}
