//! Signed distance functions. Positive values are outside, non-positive inside.

use crate::foundation::core::{Point, Rect, Vec2};

/// Signed distance from `position` to an axis-aligned scissor rectangle.
pub fn distance_from_scissor_rect(position: Point, rect: Rect) -> f64 {
    let top_left = Vec2::new(rect.x0 - position.x, rect.y0 - position.y);
    let bottom_right = Vec2::new(position.x - rect.x1, position.y - rect.y1);
    let shrunk = max_vec(bottom_right, top_left);
    shrunk.x.max(shrunk.y)
}

/// Signed distance from `position + offset` to `rect` with corners rounded by `radius`.
///
/// Inside the corner-free body the largest edge offset is returned as-is. In the corner zones
/// the clamped offsets are combined as `(dx^e + dy^e)^(1/e)`, so `exponent == 2` gives circular
/// corners and larger exponents flatten them toward a square.
pub fn distance_from_rounded_rect(
    position: Point,
    rect: Rect,
    offset: Vec2,
    radius: f64,
    exponent: f64,
) -> f64 {
    let p = position + offset;

    let top_left = Vec2::new(rect.x0 - p.x, rect.y0 - p.y);
    let bottom_right = Vec2::new(p.x - rect.x1, p.y - rect.y1);
    let r = Vec2::new(radius, radius);

    let shrunk = max_vec(bottom_right + r, top_left + r);
    let max_dist = shrunk.x.max(shrunk.y);

    if max_dist <= 0.0 {
        return max_dist;
    }

    let dx = shrunk.x.max(0.0);
    let dy = shrunk.y.max(0.0);
    (dx.powf(exponent) + dy.powf(exponent)).powf(1.0 / exponent)
}

/// Distance from `tex_coord` to `tex_rect`, in units of `blend_range` per axis.
///
/// Axes with a non-positive blend range contribute zero.
pub fn distance_from_drawing_rect(tex_coord: Point, tex_rect: Rect, blend_range: Vec2) -> f64 {
    let scale = |v: f64, range: f64| if range > 0.0 { v / range } else { 0.0 };

    let top_left = Vec2::new(
        scale(tex_rect.x0 - tex_coord.x, blend_range.x),
        scale(tex_rect.y0 - tex_coord.y, blend_range.y),
    );
    let bottom_right = Vec2::new(
        scale(tex_coord.x - tex_rect.x1, blend_range.x),
        scale(tex_coord.y - tex_rect.y1, blend_range.y),
    );

    let xy = max_vec(top_left, bottom_right);
    xy.x.max(xy.y)
}

fn max_vec(a: Vec2, b: Vec2) -> Vec2 {
    Vec2::new(a.x.max(b.x), a.y.max(b.y))
}

#[cfg(test)]
#[path = "../../tests/unit/masking/distance.rs"]
mod tests;
