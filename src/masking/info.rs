use std::path::Path;

use crate::foundation::colour::BorderColour;
use crate::foundation::core::{Affine, Rect, Vec2};
use crate::foundation::error::{MaskError, MaskResult};
use crate::masking::descriptor::{InnerEdge, MaskRegionDescriptor, ScissorRegion};

fn identity() -> Affine {
    Affine::IDENTITY
}

fn default_corner_exponent() -> f64 {
    2.0
}

fn one() -> f64 {
    1.0
}

/// Host-level masking state of a masking container.
///
/// This is what a UI tree carries around and what the `roundmask` CLI reads from JSON. Only
/// `masking_rect` is required; everything else has a default. Turn it into an evaluation record
/// with [`to_descriptor`](Self::to_descriptor).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaskingInfo {
    /// Masking area in masking space.
    pub masking_rect: Rect,
    /// Maps vertex coordinates into the space of `masking_rect`.
    #[serde(default = "identity")]
    pub to_masking_space: Affine,
    /// Optional hard scissor.
    #[serde(default)]
    pub scissor: Option<ScissorRegion>,
    /// Corner radius.
    #[serde(default)]
    pub corner_radius: f64,
    /// Corner superellipse exponent.
    #[serde(default = "default_corner_exponent")]
    pub corner_exponent: f64,
    /// Border thickness in masking-space units.
    #[serde(default)]
    pub border_thickness: f64,
    /// Border colour; ignored while `border_thickness` is zero.
    #[serde(default)]
    pub border_colour: BorderColour,
    /// Width of the anti-aliased edge.
    #[serde(default = "one")]
    pub blend_range: f64,
    /// Coverage curve exponent.
    #[serde(default = "one")]
    pub alpha_exponent: f64,
    /// Offset of the inner edge of a hollow container.
    #[serde(default)]
    pub edge_offset: Vec2,
    /// Only draw between the outer and inner edges.
    #[serde(default)]
    pub hollow: bool,
    /// Corner radius of the inner edge when hollow.
    #[serde(default)]
    pub hollow_corner_radius: f64,
}

impl MaskingInfo {
    /// Plain rectangular masking of `masking_rect` with default settings.
    pub fn new(masking_rect: Rect) -> Self {
        Self {
            masking_rect,
            to_masking_space: Affine::IDENTITY,
            scissor: None,
            corner_radius: 0.0,
            corner_exponent: default_corner_exponent(),
            border_thickness: 0.0,
            border_colour: BorderColour::default(),
            blend_range: 1.0,
            alpha_exponent: 1.0,
            edge_offset: Vec2::ZERO,
            hollow: false,
            hollow_corner_radius: 0.0,
        }
    }

    /// Parse a JSON configuration and validate it.
    pub fn from_json_str(s: &str) -> MaskResult<Self> {
        let info: Self = serde_json::from_str(s)?;
        info.validate()?;
        Ok(info)
    }

    /// Read and validate a JSON configuration file.
    pub fn from_json_path(path: &Path) -> MaskResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            MaskError::validation(format!("read masking info '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&s)
    }

    /// Check every field the evaluator divides by or exponentiates with.
    pub fn validate(&self) -> MaskResult<()> {
        if !(self.blend_range.is_finite() && self.blend_range > 0.0) {
            return Err(MaskError::validation("blend_range must be > 0"));
        }
        if self.hollow
            && !(self.hollow_corner_radius.is_finite() && self.hollow_corner_radius >= 0.0)
        {
            return Err(MaskError::validation("hollow_corner_radius must be >= 0"));
        }
        self.to_descriptor().validate()
    }

    /// Build the evaluation record.
    pub fn to_descriptor(&self) -> MaskRegionDescriptor {
        let border_colour = if self.border_thickness > 0.0 {
            self.border_colour
        } else {
            BorderColour::default()
        };
        let inner_edge = self.hollow.then_some(InnerEdge {
            edge_offset: self.edge_offset,
            inner_corner_radius: self.hollow_corner_radius,
        });

        MaskRegionDescriptor {
            to_masking_space: self.to_masking_space,
            is_masking: true,
            masking_rect: self.masking_rect,
            scissor: self.scissor,
            corner_radius: self.corner_radius,
            corner_exponent: self.corner_exponent,
            border_thickness: self.border_thickness,
            border_colour,
            masking_blend_range: self.blend_range,
            alpha_exponent: self.alpha_exponent,
            inner_edge,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/masking/info.rs"]
mod tests;
