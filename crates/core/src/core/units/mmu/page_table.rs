//! Page Table.
//!
//! A fixed-size array of page entries, one per virtual page. It holds the
//! virtual-to-physical bookkeeping only; choosing frames is left to the
//! replacement policy. Assigning a page to a frame invalidates whichever page
//! held that frame before, so at most one valid entry references any frame.

use serde_json::{Map, Value};
use tracing::debug;

use crate::common::{SimError, SimResult, VirtAddr};

/// Region label for page table errors.
const PAGE_TABLE_REGION: &str = "page table";

/// A single page table entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageTableEntry {
    /// Entry validity flag.
    pub valid: bool,
    /// Bound frame; meaningful only when `valid`.
    pub frame: usize,
    /// Policy-private metadata.
    pub props: Map<String, Value>,
}

/// Page table with its memory geometry.
#[derive(Debug, Clone)]
pub struct PageTable {
    entries: Vec<PageTableEntry>,
    frame_size: usize,
    memory_size: usize,
}

impl PageTable {
    /// Creates a table of `page_count` invalid entries.
    ///
    /// # Arguments
    ///
    /// * `page_count` - Number of virtual pages.
    /// * `frame_size` - Page and frame size in bytes (non-zero).
    /// * `memory_size` - Physical memory size in bytes.
    pub fn new(page_count: usize, frame_size: usize, memory_size: usize) -> Self {
        Self {
            entries: vec![PageTableEntry::default(); page_count],
            frame_size,
            memory_size,
        }
    }

    /// Number of virtual pages.
    pub fn page_count(&self) -> usize {
        self.entries.len()
    }

    /// Page and frame size in bytes.
    pub const fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Physical memory size in bytes.
    pub const fn memory_size(&self) -> usize {
        self.memory_size
    }

    /// Number of physical frames, `memory_size / frame_size`.
    pub const fn frame_count(&self) -> usize {
        self.memory_size / self.frame_size
    }

    /// Splits a virtual address into `(page, offset)`.
    pub const fn page_address(&self, address: VirtAddr) -> (usize, usize) {
        address.split(self.frame_size)
    }

    /// Whether `address` lies inside the virtual address space.
    pub fn contains(&self, address: VirtAddr) -> bool {
        self.page_address(address).0 < self.entries.len()
    }

    /// Returns the entry for `page`, if the page exists.
    pub fn entry(&self, page: usize) -> Option<&PageTableEntry> {
        self.entries.get(page)
    }

    /// All entries in page order.
    pub fn entries(&self) -> &[PageTableEntry] {
        &self.entries
    }

    /// Returns the valid page currently bound to `frame`.
    pub fn page_for_frame(&self, frame: usize) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.valid && e.frame == frame)
    }

    fn check_page(&self, page: usize) -> SimResult<()> {
        if page < self.entries.len() {
            Ok(())
        } else {
            Err(SimError::OutOfBounds {
                region: PAGE_TABLE_REGION,
                address: page as u64,
                size: self.entries.len() as u64,
            })
        }
    }

    /// Binds `page` to `frame`, evicting the page that held `frame`.
    ///
    /// # Errors
    ///
    /// [`SimError::OutOfBounds`] if `page` is not in the table.
    pub fn assign_page_to_frame(&mut self, page: usize, frame: usize) -> SimResult<()> {
        self.check_page(page)?;
        if let Some(old) = self.page_for_frame(frame) {
            self.entries[old].valid = false;
            debug!(page = old, frame, "page evicted");
        }
        let entry = &mut self.entries[page];
        entry.frame = frame;
        entry.valid = true;
        debug!(page, frame, "page assigned");
        Ok(())
    }

    /// Merges `props` into the metadata of `page`. Existing keys are overwritten.
    ///
    /// # Errors
    ///
    /// [`SimError::OutOfBounds`] if `page` is not in the table.
    pub fn assign_props(&mut self, page: usize, props: Map<String, Value>) -> SimResult<()> {
        self.check_page(page)?;
        self.entries[page].props.extend(props);
        Ok(())
    }
}
