use crate::foundation::colour::{BorderColour, Rgba};
use crate::foundation::core::{Affine, Point, Rect, Vec2, is_finite_affine, is_finite_rect};
use crate::foundation::error::{MaskError, MaskResult};
use crate::masking::fragment::Fragment;

fn identity() -> Affine {
    Affine::IDENTITY
}

/// Secondary hard-reject rectangle with its own coordinate space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScissorRegion {
    /// Rectangle in scissor space. Fragments outside it are discarded.
    pub rect: Rect,
    /// Maps fragment-local coordinates into scissor space.
    #[serde(default = "identity")]
    pub to_scissor_space: Affine,
}

/// Inner cutout of a ring-shaped (hollow) region.
///
/// Its presence on a [`MaskRegionDescriptor`] turns on inner discarding.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InnerEdge {
    /// Translation applied to the fragment before measuring the inner distance.
    #[serde(default)]
    pub edge_offset: Vec2,
    /// Corner radius of the inner boundary.
    pub inner_corner_radius: f64,
}

/// Read-only masking record consumed by [`MaskEvaluator`](crate::MaskEvaluator).
///
/// One descriptor is built per draw primitive and shared by every fragment of that primitive.
/// Lengths are in masking-space units. Build one from a host-level
/// [`MaskingInfo`](crate::MaskingInfo) or construct it directly.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaskRegionDescriptor {
    /// Maps fragment-local coordinates into masking space.
    #[serde(default = "identity")]
    pub to_masking_space: Affine,
    /// When `false` and the fragment has no texture blend range, masking is skipped entirely.
    pub is_masking: bool,
    /// Axis-aligned rectangle in masking space (`x0,y0` top-left, `x1,y1` bottom-right).
    pub masking_rect: Rect,
    /// Optional hard-reject rectangle.
    #[serde(default)]
    pub scissor: Option<ScissorRegion>,
    /// Corner radius, `>= 0`.
    pub corner_radius: f64,
    /// Superellipse exponent of the corners; `2.0` is circular.
    pub corner_exponent: f64,
    /// Border thickness, `>= 0`.
    pub border_thickness: f64,
    /// Border colour gradient.
    pub border_colour: BorderColour,
    /// Width of the anti-aliasing falloff band, `> 0`.
    pub masking_blend_range: f64,
    /// Exponent applied to the final coverage factor, `> 0`.
    pub alpha_exponent: f64,
    /// Inner cutout for ring shapes.
    #[serde(default)]
    pub inner_edge: Option<InnerEdge>,
}

impl MaskRegionDescriptor {
    /// A non-masking record covering `area`.
    ///
    /// Fragments without a texture blend range pass through untouched; fragments with one are
    /// still feathered against their texture rectangle.
    pub fn passthrough(area: Rect) -> Self {
        Self {
            to_masking_space: Affine::IDENTITY,
            is_masking: false,
            masking_rect: area,
            scissor: None,
            corner_radius: 0.0,
            corner_exponent: 2.0,
            border_thickness: 0.0,
            border_colour: BorderColour::default(),
            masking_blend_range: 1.0,
            alpha_exponent: 1.0,
            inner_edge: None,
        }
    }

    /// Whether fragments inside the inner edge are cut out.
    pub fn discards_inner(&self) -> bool {
        self.inner_edge.is_some()
    }

    /// Reject records that would make evaluation divide by zero or produce NaN.
    pub fn validate(&self) -> MaskResult<()> {
        if !is_finite_affine(self.to_masking_space) {
            return Err(MaskError::validation("to_masking_space must be finite"));
        }
        if !is_finite_rect(self.masking_rect) {
            return Err(MaskError::validation("masking_rect must be finite"));
        }
        if let Some(scissor) = &self.scissor
            && !(is_finite_rect(scissor.rect) && is_finite_affine(scissor.to_scissor_space))
        {
            return Err(MaskError::validation("scissor rect and transform must be finite"));
        }
        if !self.border_colour.is_finite() {
            return Err(MaskError::validation("border_colour must be finite"));
        }

        // Texture feathering runs the full fade on non-masking records too.
        if !(self.masking_blend_range.is_finite() && self.masking_blend_range > 0.0) {
            return Err(MaskError::validation("masking_blend_range must be > 0"));
        }
        if !(self.alpha_exponent.is_finite() && self.alpha_exponent > 0.0) {
            return Err(MaskError::validation("alpha_exponent must be > 0"));
        }
        if !(self.corner_exponent.is_finite() && self.corner_exponent > 0.0) {
            return Err(MaskError::validation("corner_exponent must be > 0"));
        }
        if !(self.corner_radius.is_finite() && self.corner_radius >= 0.0) {
            return Err(MaskError::validation("corner_radius must be >= 0"));
        }
        if !(self.border_thickness.is_finite() && self.border_thickness >= 0.0) {
            return Err(MaskError::validation("border_thickness must be >= 0"));
        }
        if let Some(inner) = &self.inner_edge {
            if !(inner.inner_corner_radius.is_finite() && inner.inner_corner_radius >= 0.0) {
                return Err(MaskError::validation("inner_corner_radius must be >= 0"));
            }
            if !(inner.edge_offset.x.is_finite() && inner.edge_offset.y.is_finite()) {
                return Err(MaskError::validation("edge_offset must be finite"));
            }
        }
        Ok(())
    }

    /// Build the fragment input for a point in fragment-local space.
    ///
    /// Runs the point through [`to_masking_space`](Self::to_masking_space) and, when a scissor
    /// is present, through its transform, the way a vertex stage would.
    pub fn fragment_at(&self, local: Point, colour: Rgba) -> Fragment {
        let scissor_position = match &self.scissor {
            Some(s) => s.to_scissor_space * local,
            None => local,
        };
        Fragment::new(self.to_masking_space * local, colour).with_scissor_position(scissor_position)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/masking/descriptor.rs"]
mod tests;
