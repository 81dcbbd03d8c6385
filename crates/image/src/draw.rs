use crate::*;
use base::Vec2;
use font8x8::{BASIC_FONTS, LATIN_FONTS, UnicodeFonts};

/// Draw a line of `thickness` pixels between two points.
///
/// The line is clipped (Cohen-Sutherland) to the image grown by the pen
/// radius, then walked with Bresenham and stamped with a disc at each step.
pub fn draw_line(image: &mut RgbImage, from: Vec2<i32>, to: Vec2<i32>, color: Rgb, thickness: u32) {
    let radius = (thickness / 2) as i32;
    let bounds = ClipRect {
        min_x: -radius,
        min_y: -radius,
        max_x: image.width() as i32 - 1 + radius,
        max_y: image.height() as i32 - 1 + radius,
    };
    let Some((mut x0, mut y0, x1, y1)) = bounds.clip(from.x, from.y, to.x, to.y) else {
        return;
    };

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    loop {
        draw_filled_circle(image, Vec2::new(x0, y0), radius, color);

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Draw a filled disc; a radius of 0 sets a single pixel.
pub fn draw_filled_circle(image: &mut RgbImage, center: Vec2<i32>, radius: i32, color: Rgb) {
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                image.set_pixel(center.x.saturating_add(dx), center.y.saturating_add(dy), color);
            }
        }
    }
}

/// Draw a ring of `thickness` pixels centred on the circle of `radius`.
pub fn draw_circle(image: &mut RgbImage, center: Vec2<i32>, radius: i32, color: Rgb, thickness: u32) {
    let half = thickness.max(1) as f64 / 2.0;
    let reach = radius + half.ceil() as i32;
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let distance = ((dx * dx + dy * dy) as f64).sqrt();
            if (distance - radius as f64).abs() <= half {
                image.set_pixel(center.x.saturating_add(dx), center.y.saturating_add(dy), color);
            }
        }
    }
}

/// Glyph cell size of the built-in font, in font pixels
pub const GLYPH_SIZE: i32 = 8;

/// Font pixel size for a text scale; 1.0 gives 3x3 image pixels per font pixel.
pub fn text_pixel_size(scale: f32) -> i32 {
    ((scale * 3.0).round() as i32).max(1)
}

/// Draw `text` with the built-in 8x8 font (ASCII and Latin-1).
///
/// `origin` is the bottom-left corner of the first glyph. Characters the
/// font lacks are left blank but still advance the pen.
pub fn draw_text(image: &mut RgbImage, text: &str, origin: Vec2<i32>, color: Rgb, scale: f32) {
    let px = text_pixel_size(scale);
    let advance = GLYPH_SIZE.saturating_mul(px);
    let top = origin.y.saturating_sub(advance);
    let mut left = origin.x;
    for c in text.chars() {
        if let Some(glyph) = BASIC_FONTS.get(c).or_else(|| LATIN_FONTS.get(c)) {
            for (row, bits) in glyph.iter().enumerate() {
                for col in 0..GLYPH_SIZE {
                    if bits & (1u8 << col) == 0 {
                        continue;
                    }
                    let x = left.saturating_add(col.saturating_mul(px));
                    let y = top.saturating_add((row as i32).saturating_mul(px));
                    for dy in 0..px {
                        for dx in 0..px {
                            image.set_pixel(x.saturating_add(dx), y.saturating_add(dy), color);
                        }
                    }
                }
            }
        }
        left = left.saturating_add(advance);
    }
}

// Cohen-Sutherland outcodes
const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

/// Inclusive clipping rectangle.
struct ClipRect {
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
}

impl ClipRect {
    fn outcode(&self, x: i32, y: i32) -> u8 {
        let mut code = INSIDE;
        if x < self.min_x {
            code |= LEFT;
        } else if x > self.max_x {
            code |= RIGHT;
        }
        if y < self.min_y {
            code |= TOP;
        } else if y > self.max_y {
            code |= BOTTOM;
        }
        code
    }

    /// Clip a segment, returning `None` when nothing of it is inside.
    fn clip(&self, mut x0: i32, mut y0: i32, mut x1: i32, mut y1: i32) -> Option<(i32, i32, i32, i32)> {
        if self.min_x > self.max_x || self.min_y > self.max_y {
            return None;
        }
        loop {
            let outcode0 = self.outcode(x0, y0);
            let outcode1 = self.outcode(x1, y1);

            if (outcode0 | outcode1) == 0 {
                return Some((x0, y0, x1, y1));
            }
            if (outcode0 & outcode1) != 0 {
                return None;
            }

            let outcode = if outcode0 != 0 { outcode0 } else { outcode1 };
            let (x, y) = self.clip_point(x0, y0, x1, y1, outcode);
            if outcode == outcode0 {
                x0 = x;
                y0 = y;
            } else {
                x1 = x;
                y1 = y;
            }
        }
    }

    // widen to i64 so far-away endpoints cannot overflow the products
    fn clip_point(&self, x0: i32, y0: i32, x1: i32, y1: i32, outcode: u8) -> (i32, i32) {
        let (x0, y0, x1, y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);
        let dx = x1 - x0;
        let dy = y1 - y0;

        if outcode & TOP != 0 {
            let y = self.min_y as i64;
            ((x0 + dx * (y - y0) / dy) as i32, y as i32)
        } else if outcode & BOTTOM != 0 {
            let y = self.max_y as i64;
            ((x0 + dx * (y - y0) / dy) as i32, y as i32)
        } else if outcode & LEFT != 0 {
            let x = self.min_x as i64;
            (x as i32, (y0 + dy * (x - x0) / dx) as i32)
        } else {
            let x = self.max_x as i64;
            (x as i32, (y0 + dy * (x - x0) / dx) as i32)
        }
    }
}
