//! Posture analysis over video streams.
//!
//! Frames come from a [`FrameSource`], go through a [`PoseEstimator`] and
//! the [`VideoAggregator`], and leave annotated through a [`FrameSink`].
//! The aggregator keeps only two counters between frames.
//!
//! [`PoseEstimator`]: posture::PoseEstimator

mod aggregator;
pub use aggregator::*;

mod config;
pub use config::*;

mod error;
pub use error::*;

mod pipeline;
pub use pipeline::*;

mod strategy;
pub use strategy::*;
