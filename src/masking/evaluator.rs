use crate::foundation::colour::Rgba;
use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::MaskResult;
use crate::masking::descriptor::MaskRegionDescriptor;
use crate::masking::distance::{
    distance_from_drawing_rect, distance_from_rounded_rect, distance_from_scissor_rect,
};
use crate::masking::fragment::Fragment;
use crate::storage::DescriptorSource;

/// Result of masking one fragment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MaskOutput {
    /// The fragment contributes nothing; nothing is written.
    Discard,
    /// Straight-alpha colour to hand to the host's compositing stage.
    Colour(Rgba),
}

impl MaskOutput {
    /// Output colour, or `None` when discarded.
    pub fn colour(self) -> Option<Rgba> {
        match self {
            Self::Discard => None,
            Self::Colour(c) => Some(c),
        }
    }

    /// Output alpha; discarded fragments count as fully transparent.
    pub fn alpha(self) -> f32 {
        self.colour().map_or(0.0, |c| c.a)
    }

    /// Whether the fragment was discarded.
    pub fn is_discard(self) -> bool {
        matches!(self, Self::Discard)
    }
}

/// Edge quantities for a fragment that survived every early-out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeCoverage {
    /// Outer rounded-rect distance in blend-range units.
    pub dist: f64,
    /// Normalized distance at which the outer fade begins.
    pub fade_start: f64,
    /// Coverage after every fade and the alpha exponent, in `(0, 1]`.
    pub alpha_factor: f64,
    /// Share of content versus border: `>= 1` content only, `<= 0` border only.
    pub colour_weight: f64,
}

/// Coverage classification of a fragment, before colours are resolved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Coverage {
    /// Non-masking record and no blend range: the base colour is used untouched.
    Passthrough,
    /// Rejected by the scissor rectangle.
    Discard,
    /// Fully transparent (inside a ring cutout, or faded out completely).
    Transparent,
    /// Partially or fully covered.
    Edge(EdgeCoverage),
}

/// Evaluates a [`MaskRegionDescriptor`] against fragments.
///
/// Holds per-descriptor constants so a draw can reuse them across all of its fragments. The
/// evaluator is `Copy` and borrows the descriptor immutably, so any number of threads can share
/// one.
#[derive(Clone, Copy, Debug)]
pub struct MaskEvaluator<'a> {
    descriptor: &'a MaskRegionDescriptor,
    fade_start: f64,
    border_start: f64,
}

impl<'a> MaskEvaluator<'a> {
    /// Prepare an evaluator. The descriptor is assumed to pass
    /// [`MaskRegionDescriptor::validate`].
    pub fn new(descriptor: &'a MaskRegionDescriptor) -> Self {
        let blend_range = descriptor.masking_blend_range;
        let radius = descriptor.corner_radius;

        // Keeps radii below one blend range from fading the straight edges.
        let radius_correction = if radius <= 0.0 {
            blend_range
        } else {
            (blend_range - radius).max(0.0)
        };
        let fade_start = (radius + radius_correction) / blend_range;
        let border_start = 1.0 + fade_start - descriptor.border_thickness / blend_range;

        Self {
            descriptor,
            fade_start,
            border_start,
        }
    }

    /// The descriptor being evaluated.
    pub fn descriptor(&self) -> &'a MaskRegionDescriptor {
        self.descriptor
    }

    /// Normalized distance at which the outer fade begins.
    pub fn fade_start(&self) -> f64 {
        self.fade_start
    }

    /// Outer rounded-rect distance of a masking-space position, in masking-space units.
    pub fn outer_distance(&self, masking_position: Point) -> f64 {
        let d = self.descriptor;
        distance_from_rounded_rect(
            masking_position,
            d.masking_rect,
            Vec2::ZERO,
            d.corner_radius,
            d.corner_exponent,
        )
    }

    /// Inner-edge distance, reusing `outer` when the inner boundary coincides with the outer one.
    ///
    /// Returns `None` when the descriptor has no inner edge.
    pub fn inner_distance(&self, masking_position: Point, outer: f64) -> Option<f64> {
        let d = self.descriptor;
        let inner = d.inner_edge.as_ref()?;
        if inner.edge_offset == Vec2::ZERO && inner.inner_corner_radius == d.corner_radius {
            return Some(outer);
        }
        Some(distance_from_rounded_rect(
            masking_position,
            d.masking_rect,
            inner.edge_offset,
            inner.inner_corner_radius,
            d.corner_exponent,
        ))
    }

    /// Classify a fragment's coverage.
    pub fn coverage(&self, fragment: &Fragment) -> Coverage {
        let d = self.descriptor;

        if !d.is_masking && !fragment.has_blend_range() {
            return Coverage::Passthrough;
        }

        if let Some(scissor) = &d.scissor
            && distance_from_scissor_rect(fragment.scissor_position, scissor.rect) > 0.0
        {
            return Coverage::Discard;
        }

        let outer = self.outer_distance(fragment.masking_position);
        let mut alpha_factor = 1.0;

        if let (Some(inner), Some(inner_dist)) = (
            d.inner_edge.as_ref(),
            self.inner_distance(fragment.masking_position, outer),
        ) {
            // The fragment blend range carries the edge container's own masking blend range.
            let inner_blend_factor = (inner.inner_corner_radius - d.masking_blend_range
                - inner_dist)
                / fragment.blend_range.x;
            if inner_blend_factor > 1.0 {
                return Coverage::Transparent;
            }

            // Pre-inverts the alpha exponent applied below so the inner edge fades linearly.
            alpha_factor = (1.0 - inner_blend_factor)
                .min(1.0)
                .powf(1.0 / d.alpha_exponent);
        }

        let dist = outer / d.masking_blend_range;
        alpha_factor *= (self.fade_start - dist).min(1.0);

        if fragment.has_texture_fade() {
            let edge = distance_from_drawing_rect(
                fragment.tex_coord,
                fragment.tex_rect,
                fragment.blend_range,
            );
            alpha_factor *= (1.0 - edge).clamp(0.0, 1.0);
        }

        if alpha_factor.is_nan() || alpha_factor <= 0.0 {
            return Coverage::Transparent;
        }

        let alpha_factor = alpha_factor.powf(d.alpha_exponent);
        let colour_weight = (self.border_start - dist).min(1.0);

        Coverage::Edge(EdgeCoverage {
            dist,
            fade_start: self.fade_start,
            alpha_factor,
            colour_weight,
        })
    }

    /// Mask a fragment and resolve its final colour.
    pub fn evaluate(&self, fragment: &Fragment) -> MaskOutput {
        match self.coverage(fragment) {
            Coverage::Passthrough => MaskOutput::Colour(fragment.colour),
            Coverage::Discard => MaskOutput::Discard,
            Coverage::Transparent => MaskOutput::Colour(Rgba::TRANSPARENT),
            Coverage::Edge(edge) => MaskOutput::Colour(self.resolve_colour(fragment, &edge)),
        }
    }

    /// Border colour at a masking-space position.
    ///
    /// Samples the corner gradient at the position relative to the masking rectangle, clamped
    /// to the rectangle, so fragments outside it take the nearest edge colour instead of
    /// extrapolating the gradient. Degenerate axes sample the top/left side.
    pub fn border_colour_at(&self, masking_position: Point) -> Rgba {
        let rect = self.descriptor.masking_rect;
        let relative = |p: f64, origin: f64, size: f64| {
            if size > 0.0 {
                ((p - origin) / size).clamp(0.0, 1.0)
            } else {
                0.0
            }
        };
        let rel = Vec2::new(
            relative(masking_position.x, rect.x0, rect.x1 - rect.x0),
            relative(masking_position.y, rect.y0, rect.y1 - rect.y0),
        );
        self.descriptor.border_colour.interpolate(rel)
    }

    fn resolve_colour(&self, fragment: &Fragment, edge: &EdgeCoverage) -> Rgba {
        let alpha_factor = edge.alpha_factor as f32;
        let content = fragment.colour;

        if edge.colour_weight >= 1.0 {
            return content.scale_alpha(alpha_factor);
        }

        let border = self.border_colour_at(fragment.masking_position);

        if edge.colour_weight <= 0.0 {
            return border.scale_alpha(alpha_factor);
        }

        let content = content.scale_alpha(alpha_factor);
        let border = border.scale_alpha((1.0 - edge.colour_weight) as f32);
        border.blend_over(content)
    }
}

/// Mask one fragment against `descriptor`.
pub fn evaluate(descriptor: &MaskRegionDescriptor, fragment: &Fragment) -> MaskOutput {
    MaskEvaluator::new(descriptor).evaluate(fragment)
}

/// Resolve the descriptor at `index` in `source`, then mask `fragment` against it.
pub fn evaluate_indexed<S: DescriptorSource + ?Sized>(
    source: &S,
    index: usize,
    fragment: &Fragment,
) -> MaskResult<MaskOutput> {
    let descriptor = source.resolve(index)?;
    Ok(evaluate(descriptor, fragment))
}

#[cfg(test)]
#[path = "../../tests/unit/masking/evaluator.rs"]
mod tests;
