//! Memory Management Unit (MMU).
//!
//! This module implements virtual-to-physical address translation over a
//! single-level page table. Translation never raises: an unmapped page (or an
//! address beyond the table) comes back as [`Translation::Fault`] and the
//! processing unit resolves it through the replacement policy.

/// Page table and entry definitions.
pub mod page_table;

use crate::common::{PhysAddr, VirtAddr};

pub use self::page_table::{PageTable, PageTableEntry};

/// Outcome of a translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Translation {
    /// The page is resident; this is the physical address.
    Hit(PhysAddr),
    /// The page is not resident.
    Fault,
}

impl Translation {
    /// Returns the physical address of a hit.
    pub const fn paddr(self) -> Option<PhysAddr> {
        match self {
            Self::Hit(paddr) => Some(paddr),
            Self::Fault => None,
        }
    }
}

/// Memory Management Unit owning exactly one page table.
#[derive(Debug, Clone)]
pub struct Mmu {
    page_table: PageTable,
}

impl Mmu {
    /// Creates an MMU over `page_table`.
    pub const fn new(page_table: PageTable) -> Self {
        Self { page_table }
    }

    /// Read access to the page table.
    pub const fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    /// Write access to the page table.
    pub const fn page_table_mut(&mut self) -> &mut PageTable {
        &mut self.page_table
    }

    /// Translates a virtual address.
    ///
    /// # Examples
    ///
    /// ```
    /// use schedsim_core::common::{PhysAddr, VirtAddr};
    /// use schedsim_core::core::units::mmu::{Mmu, PageTable, Translation};
    ///
    /// let mut mmu = Mmu::new(PageTable::new(8, 4, 16));
    /// assert_eq!(mmu.translate(VirtAddr::new(9)), Translation::Fault);
    ///
    /// mmu.page_table_mut().assign_page_to_frame(2, 3).unwrap();
    /// assert_eq!(mmu.translate(VirtAddr::new(9)), Translation::Hit(PhysAddr::new(13)));
    /// ```
    pub fn translate(&self, vaddr: VirtAddr) -> Translation {
        let table = &self.page_table;
        let (page, offset) = table.page_address(vaddr);
        match table.entry(page) {
            Some(entry) if entry.valid => {
                Translation::Hit(PhysAddr::from_frame(entry.frame, table.frame_size(), offset))
            }
            _ => Translation::Fault,
        }
    }

    /// Frame bound to the page containing `vaddr`, valid or not.
    ///
    /// Stale bindings are returned as stored; callers only ask after a hit.
    pub fn bound_frame(&self, vaddr: VirtAddr) -> usize {
        let (page, _) = self.page_table.page_address(vaddr);
        self.page_table.entry(page).map_or(0, |e| e.frame)
    }
}
