// Scripted stand-ins for decoder, encoder and pose estimator.
#![allow(dead_code)]

use {
    base::Vec2,
    image::RgbImage,
    posture::{Landmark, PoseEstimator, PoseLandmarks, PostureError},
    std::{
        collections::VecDeque,
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
    },
    video::*,
};

pub const FRAME_SIZE: Vec2<usize> = Vec2 { x: 50, y: 50 };

/// Upper body with the nose at `nose_y`; hips sit at y = 0.6
pub fn upper_body(nose_y: f64) -> PoseLandmarks {
    PoseLandmarks::new()
        .with(0, Landmark::new(0.5, nose_y, 0.0))
        .with(7, Landmark::new(0.45, 0.25, 0.0))
        .with(8, Landmark::new(0.55, 0.25, 0.0))
        .with(11, Landmark::new(0.4, 0.35, 0.0))
        .with(12, Landmark::new(0.6, 0.35, 0.0))
        .with(23, Landmark::new(0.42, 0.6, 0.0))
        .with(24, Landmark::new(0.58, 0.6, 0.0))
}

/// Nose 0.05 above the hips: flagged by the spine check
pub fn slouched() -> PoseLandmarks {
    upper_body(0.55)
}

pub fn upright() -> PoseLandmarks {
    upper_body(0.2)
}

#[derive(Clone)]
pub enum Step {
    Pose(PoseLandmarks),
    Nobody,
    Fail,
}

/// Answers each call with the next scripted step
pub struct ScriptedEstimator {
    steps: VecDeque<Step>,
}

impl ScriptedEstimator {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps: steps.into() }
    }
}

impl PoseEstimator for ScriptedEstimator {
    fn estimate(&mut self, _image: &RgbImage) -> Result<Option<PoseLandmarks>, PostureError> {
        match self.steps.pop_front() {
            Some(Step::Pose(pose)) => Ok(Some(pose)),
            Some(Step::Nobody) | None => Ok(None),
            Some(Step::Fail) => Err(PostureError::Estimator("inference failed".to_string())),
        }
    }
}

/// The 10-frame stream: frames 3 and 7 without a person, 5 and 9 upright,
/// the rest slouched (1-based)
pub fn ten_frame_script() -> Vec<Step> {
    (1..=10)
        .map(|frame| match frame {
            3 | 7 => Step::Nobody,
            5 | 9 => Step::Pose(upright()),
            _ => Step::Pose(slouched()),
        })
        .collect()
}

pub struct FakeSource {
    frames: VecDeque<RgbImage>,
    fail_open: bool,
    fail_at: Option<usize>,
    served: usize,
    pub released: Arc<AtomicUsize>,
}

impl FakeSource {
    pub fn new(count: usize) -> Self {
        Self {
            frames: (0..count).map(|_| RgbImage::new(FRAME_SIZE)).collect(),
            fail_open: false,
            fail_at: None,
            served: 0,
            released: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing_open() -> Self {
        Self {
            fail_open: true,
            ..Self::new(0)
        }
    }

    /// Fail with a decode error instead of serving frame `index`
    pub fn failing_at(count: usize, index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Self::new(count)
        }
    }

    pub fn release_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.released)
    }
}

impl FrameSource for FakeSource {
    fn open(&mut self) -> Result<StreamInfo, VideoError> {
        if self.fail_open {
            return Err(VideoError::StreamOpen("no such file".to_string()));
        }
        Ok(StreamInfo {
            size: FRAME_SIZE,
            frame_rate: 30.0,
        })
    }

    fn next_frame(&mut self) -> Result<Option<RgbImage>, VideoError> {
        if self.fail_at == Some(self.served) {
            return Err(VideoError::Decode("corrupt packet".to_string()));
        }
        self.served += 1;
        Ok(self.frames.pop_front())
    }

    fn release(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct FakeSink {
    pub opened: Option<(Vec2<usize>, f32)>,
    pub frames: Vec<FrameResult>,
    pub released: usize,
    /// Raise this flag after writing the given number of frames
    pub cancel_after: Option<(usize, CancelFlag)>,
}

impl FrameSink for FakeSink {
    fn open(&mut self, size: Vec2<usize>, frame_rate: f32) -> Result<(), VideoError> {
        self.opened = Some((size, frame_rate));
        Ok(())
    }

    fn write(&mut self, frame: &FrameResult) -> Result<(), VideoError> {
        self.frames.push(frame.clone());
        if let Some((count, flag)) = &self.cancel_after {
            if self.frames.len() == *count {
                flag.cancel();
            }
        }
        Ok(())
    }

    fn release(&mut self) {
        self.released += 1;
    }
}

pub fn released(counter: &Arc<AtomicUsize>) -> usize {
    counter.load(Ordering::SeqCst)
}
