//! Software raster host for masked quads.
//!
//! Stands in for the GPU stage: every pixel centre of the canvas becomes one fragment, is run
//! through the [`MaskEvaluator`], and the straight-alpha result is premultiplied and composited
//! over the clear colour.

use rayon::prelude::*;

use crate::foundation::colour::{Rgba, Rgba8Premul};
use crate::foundation::core::{Canvas, Rect, Vec2};
use crate::foundation::error::{MaskError, MaskResult};
use crate::masking::descriptor::MaskRegionDescriptor;
use crate::masking::evaluator::{MaskEvaluator, MaskOutput};

pub(crate) mod composite;

use composite::{PremulRgba8, over};

/// Rendered frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Tightly packed RGBA8 rows, top to bottom.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied. Always `true` for [`rasterize`] output.
    pub premultiplied: bool,
}

/// Texture-edge feathering context for a quad whose texture spans `tex_rect` in local space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextureEdge {
    /// Texture rectangle, in the quad's local coordinates.
    pub tex_rect: Rect,
    /// Per-axis feathering width.
    pub blend_range: Vec2,
}

/// A single masked draw covering the whole canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaskedQuad {
    /// Target size; pixel centres are the quad's local coordinates.
    pub canvas: Canvas,
    /// Masking record shared by every fragment.
    pub descriptor: MaskRegionDescriptor,
    /// Content colour of every fragment.
    pub colour: Rgba,
    /// Optional texture-edge feathering.
    pub texture_edge: Option<TextureEdge>,
}

/// How [`rasterize`] runs.
#[derive(Clone, Debug, Default)]
pub struct RasterSettings {
    /// Shade rows on a rayon pool.
    pub parallel: bool,
    /// Pool size; `None` lets rayon decide. Must be `>= 1` when set.
    pub threads: Option<usize>,
    /// Straight-alpha background; transparent when `None`.
    pub clear_rgba: Option<[u8; 4]>,
}

/// Per-pixel outcome counts of one raster call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RasterStats {
    /// Rejected by the scissor; the clear colour is kept.
    pub discarded: u64,
    /// Evaluated to zero alpha.
    pub transparent: u64,
    /// Evaluated to non-zero alpha.
    pub covered: u64,
}

impl RasterStats {
    fn merge(self, other: Self) -> Self {
        Self {
            discarded: self.discarded + other.discarded,
            transparent: self.transparent + other.transparent,
            covered: self.covered + other.covered,
        }
    }

    /// Total pixels shaded.
    pub fn total(&self) -> u64 {
        self.discarded + self.transparent + self.covered
    }
}

/// Rasterize `quad` into a premultiplied RGBA8 frame.
pub fn rasterize(quad: &MaskedQuad, settings: &RasterSettings) -> MaskResult<FrameRGBA> {
    rasterize_with_stats(quad, settings).map(|(frame, _)| frame)
}

/// Like [`rasterize`], also returning per-pixel outcome counts.
///
/// Serial and parallel runs produce identical bytes.
#[tracing::instrument(
    skip(quad, settings),
    fields(width = quad.canvas.width, height = quad.canvas.height, parallel = settings.parallel)
)]
pub fn rasterize_with_stats(
    quad: &MaskedQuad,
    settings: &RasterSettings,
) -> MaskResult<(FrameRGBA, RasterStats)> {
    quad.descriptor.validate()?;
    if !quad.colour.is_finite() {
        return Err(MaskError::validation("quad colour must be finite"));
    }
    if let Some(edge) = &quad.texture_edge
        && !(edge.blend_range.x.is_finite() && edge.blend_range.y.is_finite())
    {
        return Err(MaskError::validation("texture blend range must be finite"));
    }

    let Canvas { width, height } = Canvas::new(quad.canvas.width, quad.canvas.height)?;
    let mut data = vec![0u8; quad.canvas.rgba8_len()?];
    let row_bytes = width as usize * 4;

    let clear = settings
        .clear_rgba
        .map(|[r, g, b, a]| Rgba8Premul::from_straight_rgba(r, g, b, a).to_array())
        .unwrap_or([0, 0, 0, 0]);
    let evaluator = MaskEvaluator::new(&quad.descriptor);
    let shade = |(y, row): (usize, &mut [u8])| shade_row(&evaluator, quad, clear, y, row);

    let stats = if settings.parallel {
        let pool = build_thread_pool(settings.threads)?;
        pool.install(|| {
            data.par_chunks_mut(row_bytes)
                .enumerate()
                .map(shade)
                .reduce(RasterStats::default, RasterStats::merge)
        })
    } else {
        data.chunks_mut(row_bytes)
            .enumerate()
            .map(shade)
            .fold(RasterStats::default(), RasterStats::merge)
    };

    tracing::debug!(
        discarded = stats.discarded,
        transparent = stats.transparent,
        covered = stats.covered,
        "masked quad rasterized"
    );

    Ok((
        FrameRGBA {
            width,
            height,
            data,
            premultiplied: true,
        },
        stats,
    ))
}

fn shade_row(
    evaluator: &MaskEvaluator<'_>,
    quad: &MaskedQuad,
    clear: PremulRgba8,
    y: usize,
    row: &mut [u8],
) -> RasterStats {
    let mut stats = RasterStats::default();
    for (x, px) in row.chunks_exact_mut(4).enumerate() {
        let local = Canvas::pixel_centre(x as u32, y as u32);
        let mut fragment = quad.descriptor.fragment_at(local, quad.colour);
        if let Some(edge) = &quad.texture_edge {
            fragment = fragment.with_texture_edge(local, edge.tex_rect, edge.blend_range);
        }

        let out = match evaluator.evaluate(&fragment) {
            MaskOutput::Discard => {
                stats.discarded += 1;
                clear
            }
            MaskOutput::Colour(c) => {
                let src = c.to_premul_rgba8().to_array();
                if src[3] == 0 {
                    stats.transparent += 1;
                } else {
                    stats.covered += 1;
                }
                over(clear, src)
            }
        };
        px.copy_from_slice(&out);
    }
    stats
}

fn build_thread_pool(threads: Option<usize>) -> MaskResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(MaskError::validation(
            "raster 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| MaskError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/mod.rs"]
mod tests;
