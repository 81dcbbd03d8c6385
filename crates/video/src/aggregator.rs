use {
    crate::*,
    base::Vec2,
    image::{Rgb, RgbImage, draw_text},
    posture::{BLAZEPOSE, ColorMap, LandmarkSet, OverlayRenderer, PoseLandmarks, round2},
    serde::ser::{Serialize, SerializeStruct, Serializer},
};

const NECK_LABEL_POSITION: Vec2<i32> = Vec2 { x: 50, y: 30 };
const NECK_LABEL_SCALE: f32 = 0.7;
const SPINE_LABEL_POSITION: Vec2<i32> = Vec2 { x: 50, y: 70 };
const SPINE_LABEL_SCALE: f32 = 0.9;

const FLAGGED_TEXT: &str = "Columna muy erguida";
const UNFLAGGED_TEXT: &str = "Postura correcta";

/// Text drawn on a frame
#[derive(Clone, Debug, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub color: Rgb,
    /// Pixel position of the bottom-left corner of the text
    pub position: Vec2<i32>,
    pub scale: f32,
}

/// One processed frame
#[derive(Clone, Debug)]
pub struct FrameResult {
    /// 0-based position in the stream
    pub frame_index: usize,
    pub has_landmarks: bool,
    pub flagged_bad: bool,
    /// The frame, with skeleton and labels drawn when it had landmarks
    pub annotated_pixels: RgbImage,
    pub labels: Vec<TextLabel>,
}

/// Stream-level counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VideoSummary {
    pub total_frames: usize,
    pub bad_posture_frames: usize,
}

impl VideoSummary {
    /// Share of flagged frames in percent, two decimals; 0 for an empty stream
    pub fn bad_posture_percentage(&self) -> f64 {
        if self.total_frames == 0 {
            return 0.0;
        }
        round2(self.bad_posture_frames as f64 / self.total_frames as f64 * 100.0)
    }
}

impl Serialize for VideoSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("VideoSummary", 3)?;
        state.serialize_field("total_frames", &self.total_frames)?;
        state.serialize_field("bad_posture_frames", &self.bad_posture_frames)?;
        state.serialize_field("bad_posture_percentage", &self.bad_posture_percentage())?;
        state.end()
    }
}

/// Runs the per-frame chain and counts frames.
///
/// Frames must be fed in stream order. Nothing but the two counters of
/// [`VideoSummary`] survives from one frame to the next.
pub struct VideoAggregator<C: PostureCriterion = SpineUprightness> {
    criterion: C,
    neck_bands: NeckBands,
    renderer: OverlayRenderer,
    summary: VideoSummary,
}

impl VideoAggregator<SpineUprightness> {
    pub fn new(config: &VideoConfig) -> Self {
        Self::with_criterion(config, SpineUprightness::new(config.spine_threshold()))
    }
}

impl<C: PostureCriterion> VideoAggregator<C> {
    pub fn with_criterion(config: &VideoConfig, criterion: C) -> Self {
        Self {
            criterion,
            neck_bands: config.neck_bands(),
            renderer: OverlayRenderer::new(&BLAZEPOSE, config.skeleton_style()),
            summary: VideoSummary::default(),
        }
    }

    pub fn criterion(&self) -> &C {
        &self.criterion
    }

    pub fn summary(&self) -> VideoSummary {
        self.summary
    }

    /// Start counting a new stream.
    pub fn reset(&mut self) {
        self.summary = VideoSummary::default();
    }

    fn next_index(&mut self) -> usize {
        let index = self.summary.total_frames;
        self.summary.total_frames += 1;
        index
    }

    fn pass_through(frame_index: usize, frame: RgbImage) -> FrameResult {
        FrameResult {
            frame_index,
            has_landmarks: false,
            flagged_bad: false,
            annotated_pixels: frame,
            labels: Vec::new(),
        }
    }

    /// Count a frame that could not be analyzed; it is passed through as is.
    pub fn skip_frame(&mut self, frame: RgbImage) -> FrameResult {
        let frame_index = self.next_index();
        Self::pass_through(frame_index, frame)
    }

    /// Process the next frame of the stream.
    ///
    /// Without landmarks the frame is only counted. A frame whose landmarks
    /// lack what the criterion reads is counted as skipped.
    pub fn process_frame(&mut self, frame: RgbImage, pose: Option<&PoseLandmarks>) -> FrameResult {
        let frame_index = self.next_index();
        let Some(pose) = pose.filter(|pose| !pose.is_empty()) else {
            return Self::pass_through(frame_index, frame);
        };
        let landmarks = LandmarkSet::from_pose(pose);

        let flagged_bad = match self.criterion.is_bad(&landmarks) {
            Ok(flagged_bad) => flagged_bad,
            Err(error) => {
                log::warn!("frame {}: {} skipped: {}", frame_index, self.criterion.name(), error);
                return Self::pass_through(frame_index, frame);
            }
        };

        let mut labels = Vec::with_capacity(2);
        match neck_angle(&landmarks) {
            Ok(degrees) => {
                let alignment = self.neck_bands.classify(degrees);
                labels.push(TextLabel {
                    text: format!("{} ({:.1}°)", alignment.label(), degrees),
                    color: alignment.color(),
                    position: NECK_LABEL_POSITION,
                    scale: NECK_LABEL_SCALE,
                });
            }
            Err(error) => log::debug!("frame {}: no neck label: {}", frame_index, error),
        }

        let style = self.renderer.style();
        let (text, color) = if flagged_bad {
            (FLAGGED_TEXT, style.bad_color())
        } else {
            (UNFLAGGED_TEXT, style.good_color())
        };
        labels.push(TextLabel {
            text: text.to_string(),
            color,
            position: SPINE_LABEL_POSITION,
            scale: SPINE_LABEL_SCALE,
        });

        let mut annotated_pixels = frame;
        let colors = ColorMap::uniform(self.renderer.topology(), color);
        self.renderer.render(&mut annotated_pixels, pose, &colors);
        for label in &labels {
            draw_text(&mut annotated_pixels, &label.text, label.position, label.color, label.scale);
        }

        if flagged_bad {
            self.summary.bad_posture_frames += 1;
        }

        FrameResult {
            frame_index,
            has_landmarks: true,
            flagged_bad,
            annotated_pixels,
            labels,
        }
    }
}
