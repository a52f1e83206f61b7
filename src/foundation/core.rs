use crate::foundation::error::{MaskError, MaskResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Pixel dimensions of a raster target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Build a canvas, rejecting empty dimensions.
    pub fn new(width: u32, height: u32) -> MaskResult<Self> {
        if width == 0 || height == 0 {
            return Err(MaskError::validation("canvas width and height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Number of bytes in a tightly packed RGBA8 buffer of this size.
    pub fn rgba8_len(self) -> MaskResult<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| MaskError::evaluation("canvas buffer size overflow"))
    }

    /// Centre of the pixel at `(x, y)`.
    pub fn pixel_centre(x: u32, y: u32) -> Point {
        Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5)
    }
}

pub(crate) fn is_finite_rect(r: Rect) -> bool {
    r.x0.is_finite() && r.y0.is_finite() && r.x1.is_finite() && r.y1.is_finite()
}

pub(crate) fn is_finite_affine(a: Affine) -> bool {
    a.as_coeffs().iter().all(|c| c.is_finite())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
