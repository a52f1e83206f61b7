//! Indexed descriptor storage.
//!
//! Hosts that batch many draws pack their descriptors into a store and hand fragments an index
//! instead of a whole record. [`DescriptorSource`] is the lookup seam the evaluator resolves
//! through; [`MaskingBuffer`](crate::MaskingBuffer) is the paged stack a renderer writes into.

use crate::foundation::error::{MaskError, MaskResult};
use crate::masking::descriptor::MaskRegionDescriptor;

pub(crate) mod buffer;

/// Indexed lookup of masking descriptors.
pub trait DescriptorSource {
    /// Number of addressable slots.
    fn len(&self) -> usize;

    /// Descriptor stored at `index`, if the slot holds one.
    fn get(&self, index: usize) -> Option<&MaskRegionDescriptor>;

    /// Whether the source has no slots.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Like [`get`](Self::get), but a missing record is a [`MaskError::Lookup`].
    fn resolve(&self, index: usize) -> MaskResult<&MaskRegionDescriptor> {
        self.get(index).ok_or_else(|| {
            MaskError::lookup(format!(
                "no masking descriptor at index {index} (source has {} slots)",
                self.len()
            ))
        })
    }
}

impl DescriptorSource for [MaskRegionDescriptor] {
    fn len(&self) -> usize {
        <[MaskRegionDescriptor]>::len(self)
    }

    fn get(&self, index: usize) -> Option<&MaskRegionDescriptor> {
        <[MaskRegionDescriptor]>::get(self, index)
    }
}

impl DescriptorSource for Vec<MaskRegionDescriptor> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn get(&self, index: usize) -> Option<&MaskRegionDescriptor> {
        self.as_slice().get(index)
    }
}

/// Backing storage flavour, which fixes the number of records per page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    /// Small fixed-size uniform block.
    #[default]
    Uniform,
    /// Large storage buffer.
    Storage,
}

impl StorageKind {
    /// Records per uniform page.
    pub const UNIFORM_PAGE_SIZE: usize = 64;
    /// Records per storage page.
    pub const STORAGE_PAGE_SIZE: usize = 8192;

    /// Records per page for this kind.
    pub fn page_size(self) -> usize {
        match self {
            Self::Uniform => Self::UNIFORM_PAGE_SIZE,
            Self::Storage => Self::STORAGE_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/storage/mod.rs"]
mod tests;
