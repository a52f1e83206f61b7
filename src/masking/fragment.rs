use crate::foundation::colour::Rgba;
use crate::foundation::core::{Point, Rect, Vec2};

/// Per-invocation input to the masking evaluator. Never persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fragment {
    /// Position in masking space.
    pub masking_position: Point,
    /// Position in scissor space; only read when the descriptor has a scissor.
    pub scissor_position: Point,
    /// Content colour, i.e. the vertex colour already multiplied by the sampled texel.
    pub colour: Rgba,
    /// Texture coordinate used for texture-edge feathering.
    pub tex_coord: Point,
    /// Texture rectangle the feathering is measured against.
    pub tex_rect: Rect,
    /// Per-axis texture blend range. Components `<= 0` disable feathering on that axis.
    pub blend_range: Vec2,
}

impl Fragment {
    /// Fragment at `masking_position` with no texture-edge feathering.
    pub fn new(masking_position: Point, colour: Rgba) -> Self {
        Self {
            masking_position,
            scissor_position: masking_position,
            colour,
            tex_coord: Point::ZERO,
            tex_rect: Rect::ZERO,
            blend_range: Vec2::ZERO,
        }
    }

    /// Set the scissor-space position.
    pub fn with_scissor_position(mut self, scissor_position: Point) -> Self {
        self.scissor_position = scissor_position;
        self
    }

    /// Enable texture-edge feathering.
    pub fn with_texture_edge(mut self, tex_coord: Point, tex_rect: Rect, blend_range: Vec2) -> Self {
        self.tex_coord = tex_coord;
        self.tex_rect = tex_rect;
        self.blend_range = blend_range;
        self
    }

    /// Whether any blend range is set. A non-zero range disables the non-masking fast path.
    pub fn has_blend_range(&self) -> bool {
        self.blend_range != Vec2::ZERO
    }

    /// Whether the texture-edge fade applies (some component strictly positive).
    pub fn has_texture_fade(&self) -> bool {
        self.blend_range.x > 0.0 || self.blend_range.y > 0.0
    }
}
