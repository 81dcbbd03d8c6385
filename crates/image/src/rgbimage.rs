use crate::*;
use base::Vec2;

/// An RGB color triple.
pub type Rgb = [u8; 3];

pub const BLACK: Rgb = [0, 0, 0];
pub const WHITE: Rgb = [255, 255, 255];
pub const RED: Rgb = [255, 0, 0];
pub const GREEN: Rgb = [0, 255, 0];
pub const YELLOW: Rgb = [255, 255, 0];

/// Packed 8-bit RGB image.
#[derive(Clone, PartialEq)]
pub struct RgbImage {
    pub size: Vec2<usize>,
    pub data: Vec<u8>,
}

impl std::fmt::Debug for RgbImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // pixel data is too large to be useful in debug output
        f.debug_struct("RgbImage")
            .field("size", &self.size)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl RgbImage {
    /// Create an image filled with `color`.
    pub fn filled(size: Vec2<usize>, color: Rgb) -> Self {
        let data = color
            .iter()
            .copied()
            .cycle()
            .take(size.x * size.y * 3)
            .collect();
        Self { size, data }
    }

    /// Create a black image.
    pub fn new(size: Vec2<usize>) -> Self {
        Self {
            size,
            data: vec![0; size.x * size.y * 3],
        }
    }

    /// Wrap an existing buffer, checking its length against `size`.
    pub fn from_raw(size: Vec2<usize>, data: Vec<u8>) -> Result<Self, ImageError> {
        let expected = size.x * size.y * 3;
        if data.len() != expected {
            return Err(ImageError::BufferSize {
                expected,
                got: data.len(),
            });
        }
        Ok(Self { size, data })
    }

    pub fn width(&self) -> usize {
        self.size.x
    }

    pub fn height(&self) -> usize {
        self.size.y
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.size.x && (y as usize) < self.size.y
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        if !self.contains(x, y) {
            return None;
        }
        let idx = (y as usize * self.size.x + x as usize) * 3;
        Some([self.data[idx], self.data[idx + 1], self.data[idx + 2]])
    }

    /// Set a pixel; writes outside the image are dropped.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb) {
        if !self.contains(x, y) {
            return;
        }
        let idx = (y as usize * self.size.x + x as usize) * 3;
        self.data[idx..idx + 3].copy_from_slice(&color);
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}
