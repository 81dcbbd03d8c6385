//! Ergonomic posture analysis from body landmarks.
//!
//! Landmarks from an external pose estimator are turned into joint angles,
//! classified against a fixed table of ergonomic ranges, summarized as
//! recommendations and drawn back onto the image as a color-coded skeleton.
//!
//! Everything here is synchronous and keeps no state between calls.

mod analysis;
pub use analysis::*;

mod angle;
pub use angle::*;

mod classify;
pub use classify::*;

mod error;
pub use error::*;

mod landmark;
pub use landmark::*;

mod overlay;
pub use overlay::*;

mod recommend;
pub use recommend::*;

mod topology;
pub use topology::*;
