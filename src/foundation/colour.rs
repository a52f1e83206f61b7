use crate::foundation::core::Vec2;
use crate::foundation::math::{mul_div255_u8, unit_to_u8};

/// Straight-alpha RGBA colour with unit-range `f32` channels.
///
/// Serialized as a `[r, g, b, a]` array.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Rgba {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha (not premultiplied into the colour channels).
    pub a: f32,
}

impl From<[f32; 4]> for Rgba {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Rgba> for [f32; 4] {
    fn from(c: Rgba) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

impl Rgba {
    /// All channels zero.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Build a colour from straight-alpha channels.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build a colour from straight-alpha RGBA8 channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }

    /// Same colour with alpha replaced.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Same colour with alpha multiplied by `factor`.
    pub fn scale_alpha(self, factor: f32) -> Self {
        Self {
            a: self.a * factor,
            ..self
        }
    }

    /// Component-wise product, e.g. a vertex colour tinting a texel.
    pub fn modulate(self, other: Self) -> Self {
        Self::new(
            self.r * other.r,
            self.g * other.g,
            self.b * other.b,
            self.a * other.a,
        )
    }

    /// Linear interpolation between `a` and `b`; `t` is not clamped.
    pub fn mix(a: Self, b: Self, t: f32) -> Self {
        let lerp = |x: f32, y: f32| x + (y - x) * t;
        Self::new(lerp(a.r, b.r), lerp(a.g, b.g), lerp(a.b, b.b), lerp(a.a, b.a))
    }

    /// Straight-alpha source-over: `self` layered on top of `dst`.
    ///
    /// Returns [`Rgba::TRANSPARENT`] when both inputs have zero alpha.
    pub fn blend_over(self, dst: Self) -> Self {
        let inv = 1.0 - self.a;
        let out_a = self.a + dst.a * inv;
        if out_a <= 0.0 {
            return Self::TRANSPARENT;
        }
        let channel = |s: f32, d: f32| (s * self.a + d * dst.a * inv) / out_a;
        Self::new(
            channel(self.r, dst.r),
            channel(self.g, dst.g),
            channel(self.b, dst.b),
            out_a,
        )
    }

    /// Whether every channel is finite.
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    /// Quantize to premultiplied RGBA8, clamping channels to the unit range.
    pub fn to_premul_rgba8(self) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(
            unit_to_u8(self.r),
            unit_to_u8(self.g),
            unit_to_u8(self.b),
            unit_to_u8(self.a),
        )
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent pixel.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Premultiply straight-alpha RGBA8 channels.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        let premul = |c: u8| mul_div255_u8(u16::from(c), u16::from(a));
        Self {
            r: premul(r),
            g: premul(g),
            b: premul(b),
            a,
        }
    }

    /// Channels as a `[r, g, b, a]` array.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Four corner colours forming a bilinear gradient over the masking rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "BorderColourRepr")]
pub struct BorderColour {
    /// Colour at the top-left corner.
    pub top_left: Rgba,
    /// Colour at the bottom-left corner.
    pub bottom_left: Rgba,
    /// Colour at the top-right corner.
    pub top_right: Rgba,
    /// Colour at the bottom-right corner.
    pub bottom_right: Rgba,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum BorderColourRepr {
    Uniform(Rgba),
    Corners {
        top_left: Rgba,
        bottom_left: Rgba,
        top_right: Rgba,
        bottom_right: Rgba,
    },
}

impl From<BorderColourRepr> for BorderColour {
    fn from(repr: BorderColourRepr) -> Self {
        match repr {
            BorderColourRepr::Uniform(c) => Self::uniform(c),
            BorderColourRepr::Corners {
                top_left,
                bottom_left,
                top_right,
                bottom_right,
            } => Self {
                top_left,
                bottom_left,
                top_right,
                bottom_right,
            },
        }
    }
}

impl BorderColour {
    /// The same colour at every corner.
    pub fn uniform(c: Rgba) -> Self {
        Self {
            top_left: c,
            bottom_left: c,
            top_right: c,
            bottom_right: c,
        }
    }

    /// Gradient from `top` to `bottom`.
    pub fn vertical(top: Rgba, bottom: Rgba) -> Self {
        Self {
            top_left: top,
            bottom_left: bottom,
            top_right: top,
            bottom_right: bottom,
        }
    }

    /// Gradient from `left` to `right`.
    pub fn horizontal(left: Rgba, right: Rgba) -> Self {
        Self {
            top_left: left,
            bottom_left: left,
            top_right: right,
            bottom_right: right,
        }
    }

    /// Bilinear sample at `relative`, where `(0, 0)` is top-left and `(1, 1)` bottom-right.
    pub fn interpolate(&self, relative: Vec2) -> Rgba {
        let x = relative.x as f32;
        let y = relative.y as f32;
        let top = Rgba::mix(self.top_left, self.top_right, x);
        let bottom = Rgba::mix(self.bottom_left, self.bottom_right, x);
        Rgba::mix(top, bottom, y)
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.top_left.is_finite()
            && self.bottom_left.is_finite()
            && self.top_right.is_finite()
            && self.bottom_right.is_finite()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/colour.rs"]
mod tests;
