//! RGB pixel buffers for posture overlays.
//!
//! Decoding and encoding are delegated to the `image` crate; this crate owns
//! the packed `RgbImage` buffer and the rasterizer that draws skeletons and
//! frame labels onto it.
//!
//! All buffers are row-major, 3 bytes per pixel.

mod codec;
pub use codec::*;

mod draw;
pub use draw::*;

mod error;
pub use error::*;

mod rgbimage;
pub use rgbimage::*;
