use crate::foundation::error::{MaskError, MaskResult};
use crate::masking::descriptor::MaskRegionDescriptor;
use crate::storage::{DescriptorSource, StorageKind};

/// Location of a record inside a [`MaskingBuffer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaskingSlot {
    /// Page index.
    pub page: usize,
    /// Offset inside the page; this is the index fragments of the draw carry.
    pub offset: usize,
}

/// Returned by [`MaskingBuffer::push`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PushOutcome {
    /// Where the pushed record landed.
    pub slot: MaskingSlot,
    /// The active page changed; the host must flush its pending batch before binding it.
    pub flush_required: bool,
}

/// Returned by [`MaskingBuffer::pop`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PopOutcome {
    /// The record that is active again, or `None` at the bottom of the stack.
    pub current: Option<MaskingSlot>,
    /// The active page changed; the host must flush its pending batch before binding it.
    pub flush_required: bool,
}

/// One fixed-size page of descriptor slots.
///
/// Slots keep whatever was last written to them, including records from earlier frames, just
/// like a GPU buffer would.
#[derive(Clone, Debug)]
pub struct MaskingPage {
    slots: Vec<Option<MaskRegionDescriptor>>,
}

impl MaskingPage {
    fn new(size: usize) -> Self {
        Self {
            slots: vec![None; size],
        }
    }
}

impl DescriptorSource for MaskingPage {
    fn len(&self) -> usize {
        self.slots.len()
    }

    fn get(&self, index: usize) -> Option<&MaskRegionDescriptor> {
        self.slots.get(index).and_then(Option::as_ref)
    }
}

/// Stack of masking descriptors written into fixed-size pages.
///
/// Every `push` writes to a fresh slot (addition indices only grow during a frame), so records
/// already referenced by queued draws are never overwritten. A draw binds the page holding the
/// current record and addresses it by in-page offset. Crossing a page boundary requires the host
/// to flush; to keep sibling push/pop pairs from bouncing between two pages, the record being
/// pushed over is carried into the new page first.
#[derive(Clone, Debug)]
pub struct MaskingBuffer {
    page_size: usize,
    pages: Vec<MaskingPage>,
    last_indices: Vec<Option<usize>>,
    next_addition_index: usize,
    current_index: Option<usize>,
    flushes: u64,
}

impl MaskingBuffer {
    /// Buffer with pages sized for `kind`.
    pub fn new(kind: StorageKind) -> Self {
        Self::build(kind.page_size())
    }

    /// Buffer with a custom page size. Pages must hold at least two records.
    pub fn with_page_size(page_size: usize) -> MaskResult<Self> {
        if page_size < 2 {
            return Err(MaskError::validation(
                "masking buffer page size must be >= 2",
            ));
        }
        Ok(Self::build(page_size))
    }

    fn build(page_size: usize) -> Self {
        let mut buffer = Self {
            page_size,
            pages: Vec::new(),
            last_indices: Vec::new(),
            next_addition_index: 0,
            current_index: None,
            flushes: 0,
        };
        buffer.ensure_capacity(1);
        buffer
    }

    /// Records per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Pages allocated so far. Pages are kept across [`reset`](Self::reset).
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of pushes on the stack.
    pub fn depth(&self) -> usize {
        self.last_indices.len()
    }

    /// Total flushes requested since construction.
    pub fn flush_count(&self) -> u64 {
        self.flushes
    }

    /// Make `descriptor` the current record.
    pub fn push(&mut self, descriptor: MaskRegionDescriptor) -> PushOutcome {
        let ps = self.page_size;
        self.last_indices.push(self.current_index);

        let current_page = self.current_index.map_or(0, |i| i / ps);
        let mut new_index = self.next_addition_index;
        self.next_addition_index += 1;
        self.ensure_capacity(new_index / ps + 1);

        let flush_required = new_index / ps != current_page;
        if flush_required {
            self.flushes += 1;

            if let Some(current) = self.current_index {
                // A carried copy in the last slot would push the new record onto yet another page.
                if new_index % ps == ps - 1 {
                    new_index += 1;
                    self.next_addition_index += 1;
                    self.ensure_capacity(new_index / ps + 1);
                }

                let carried = self.load(current);
                self.store(new_index, carried);
                if let Some(top) = self.last_indices.last_mut() {
                    *top = Some(new_index);
                }

                new_index += 1;
                self.next_addition_index += 1;
            }

            tracing::debug!(
                from_page = current_page,
                to_page = new_index / ps,
                "masking buffer page transition on push"
            );
        }

        self.store(new_index, Some(descriptor));
        self.current_index = Some(new_index);

        PushOutcome {
            slot: self.slot_of(new_index),
            flush_required,
        }
    }

    /// Restore the record that was current before the matching [`push`](Self::push).
    pub fn pop(&mut self) -> MaskResult<PopOutcome> {
        let ps = self.page_size;
        let previous = self
            .last_indices
            .pop()
            .ok_or_else(|| MaskError::evaluation("masking buffer pop without a matching push"))?;

        let current_page = self.current_index.map_or(0, |i| i / ps);
        let new_page = previous.map_or(0, |i| i / ps);
        let flush_required = new_page != current_page;
        if flush_required {
            self.flushes += 1;
            tracing::debug!(
                from_page = current_page,
                to_page = new_page,
                "masking buffer page transition on pop"
            );
        }

        self.current_index = previous;
        Ok(PopOutcome {
            current: previous.map(|i| self.slot_of(i)),
            flush_required,
        })
    }

    /// Start a new frame. Allocated pages are kept for reuse.
    pub fn reset(&mut self) {
        tracing::debug!(
            pages = self.pages.len(),
            used = self.next_addition_index,
            "masking buffer reset"
        );
        self.next_addition_index = 0;
        self.current_index = None;
        self.last_indices.clear();
    }

    /// Slot of the current record.
    pub fn current_slot(&self) -> Option<MaskingSlot> {
        self.current_index.map(|i| self.slot_of(i))
    }

    /// The current record.
    pub fn current(&self) -> Option<&MaskRegionDescriptor> {
        let slot = self.current_slot()?;
        self.pages.get(slot.page)?.get(slot.offset)
    }

    /// The page a draw using the current record must bind.
    pub fn current_page(&self) -> Option<&MaskingPage> {
        let slot = self.current_slot()?;
        self.pages.get(slot.page)
    }

    /// Page `index`, if allocated.
    pub fn page(&self, index: usize) -> Option<&MaskingPage> {
        self.pages.get(index)
    }

    fn slot_of(&self, index: usize) -> MaskingSlot {
        MaskingSlot {
            page: index / self.page_size,
            offset: index % self.page_size,
        }
    }

    fn load(&self, index: usize) -> Option<MaskRegionDescriptor> {
        let slot = self.slot_of(index);
        self.pages
            .get(slot.page)
            .and_then(|p| p.slots.get(slot.offset))
            .copied()
            .flatten()
    }

    fn store(&mut self, index: usize, value: Option<MaskRegionDescriptor>) {
        let slot = self.slot_of(index);
        if let Some(entry) = self
            .pages
            .get_mut(slot.page)
            .and_then(|p| p.slots.get_mut(slot.offset))
        {
            *entry = value;
        }
    }

    fn ensure_capacity(&mut self, pages: usize) {
        while self.pages.len() < pages {
            self.pages.push(MaskingPage::new(self.page_size));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/storage/buffer.rs"]
mod tests;
