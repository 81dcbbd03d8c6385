use std::{
    fmt,
    ops::{Add, Div, Sub},
};

#[derive(Clone, Copy, PartialEq, Default)]
pub struct Vec2<T> {
    pub x: T,
    pub y: T,
}

impl<T: fmt::Debug> fmt::Debug for Vec2<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vec2")
            .field("x", &self.x)
            .field("y", &self.y)
            .finish()
    }
}

impl<T> Vec2<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

// --- Arithmetic operators ---

impl<T: Add<Output = T>> Add for Vec2<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl<T: Sub<Output = T>> Sub for Vec2<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

// Scalar divide
impl<T: Div<Output = T> + Copy> Div<T> for Vec2<T> {
    type Output = Self;
    fn div(self, rhs: T) -> Self {
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
        }
    }
}

// --- Float operations (f64) ---

impl Vec2<f64> {
    /// Arithmetic mean of two points.
    pub fn midpoint(self, other: Self) -> Self {
        (self + other) / 2.0
    }

    /// Direction of the vector in radians, measured from +x towards +y.
    pub fn heading(self) -> f64 {
        self.y.atan2(self.x)
    }
}

// --- Pixel space ---

/// Largest pixel coordinate magnitude produced by [`Vec2::to_pixel`].
pub const PIXEL_LIMIT: i32 = 1 << 24;

impl Vec2<f64> {
    /// Scale a normalized `[0, 1]` coordinate to pixel space, truncating towards zero.
    ///
    /// Results are clamped to `±PIXEL_LIMIT` so pixel offsets added by the
    /// rasterizer stay in `i32` range.
    pub fn to_pixel(self, size: Vec2<usize>) -> Vec2<i32> {
        let limit = PIXEL_LIMIT as f64;
        Vec2::new(
            (self.x * size.x as f64).clamp(-limit, limit) as i32,
            (self.y * size.y as f64).clamp(-limit, limit) as i32,
        )
    }
}
