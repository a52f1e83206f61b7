//! roundmask evaluates rounded-rectangle masks per fragment.
//!
//! Every drawable in a retained-mode UI can be clipped to a rounded, optionally bordered
//! rectangle with analytic anti-aliasing instead of hardware scissoring. The crate provides:
//!
//! - [`MaskRegionDescriptor`], the read-only per-draw record, usually built from a host-level
//!   [`MaskingInfo`]
//! - [`MaskEvaluator`] / [`evaluate`], turning a [`Fragment`] into a [`MaskOutput`]
//! - [`MaskingBuffer`], a paged push/pop stack of descriptors addressed through
//!   [`DescriptorSource`]
//! - [`rasterize`], a software raster host that shades a [`MaskedQuad`] into a [`FrameRGBA`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod masking;
pub(crate) mod raster;
pub(crate) mod storage;

pub use crate::foundation::colour::{BorderColour, Rgba, Rgba8Premul};
pub use crate::foundation::core::{Affine, Canvas, Point, Rect, Vec2};
pub use crate::foundation::error::{MaskError, MaskResult};

pub use crate::masking::descriptor::{InnerEdge, MaskRegionDescriptor, ScissorRegion};
pub use crate::masking::distance::{
    distance_from_drawing_rect, distance_from_rounded_rect, distance_from_scissor_rect,
};
pub use crate::masking::evaluator::{
    Coverage, EdgeCoverage, MaskEvaluator, MaskOutput, evaluate, evaluate_indexed,
};
pub use crate::masking::fragment::Fragment;
pub use crate::masking::info::MaskingInfo;

pub use crate::raster::composite::{PremulRgba8, over};
pub use crate::raster::{
    FrameRGBA, MaskedQuad, RasterSettings, RasterStats, TextureEdge, rasterize,
    rasterize_with_stats,
};
pub use crate::storage::buffer::{MaskingBuffer, MaskingPage, MaskingSlot, PopOutcome, PushOutcome};
pub use crate::storage::{DescriptorSource, StorageKind};
