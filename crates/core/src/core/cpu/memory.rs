//! Virtual Memory Access Path.
//!
//! This module connects the processing unit to its paged memory. It performs:
//! 1. **Translation:** Looks the address up through the MMU.
//! 2. **Hit Handling:** Reads the resident byte and updates the replacement policy.
//! 3. **Fault Handling:** Asks the replacement policy for a frame, remaps the page
//!    and copies it in from the backing store before reading.
//! 4. **History:** Records every access as a hit or a miss.

use tracing::debug;

use super::ProcessingUnit;
use crate::common::{PhysAddr, SimError, SimResult, VirtAddr};
use crate::core::units::mmu::Translation;
use crate::core::units::replacement::ReplacementPolicy;
use crate::memory::copy_block;

/// Region label for accesses outside the virtual address space.
const VIRTUAL_REGION: &str = "virtual memory";

/// Result of a virtual read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryAccess {
    /// Byte read.
    pub value: u8,
    /// Physical address the byte was read from.
    pub paddr: PhysAddr,
    /// Frame holding the page.
    pub frame: usize,
    /// Whether the page was resident before the access.
    pub hit: bool,
}

impl ProcessingUnit {
    /// Reads the byte at `address` through the MMU and passes it to `handler`.
    ///
    /// A fault is resolved on the spot, so the read always produces a value.
    ///
    /// # Errors
    ///
    /// [`SimError::OutOfBounds`] if `address` is outside the virtual address
    /// space. Policy state is left untouched in that case.
    pub fn read_data<F>(&mut self, address: VirtAddr, handler: F) -> SimResult<MemoryAccess>
    where
        F: FnOnce(u8),
    {
        let table = self.mmu.page_table();
        if !table.contains(address) {
            return Err(SimError::OutOfBounds {
                region: VIRTUAL_REGION,
                address: address.val(),
                size: (table.page_count() * table.frame_size()) as u64,
            });
        }

        let access = match self.mmu.translate(address) {
            Translation::Hit(paddr) => {
                let value = self.memory.read(paddr.val())?;
                let frame = self.replacer.on_hit(&self.mmu, address);
                self.hits.push(address);
                self.stats.page_hits += 1;
                debug!(tick = self.time(), %address, %paddr, frame, "page hit");
                MemoryAccess { value, paddr, frame, hit: true }
            }
            Translation::Fault => {
                debug!(tick = self.time(), %address, "page fault");
                let frame = self.replacer.on_miss(&self.mmu, address);
                let paddr = self.replace_frame(frame, address)?;
                let value = self.memory.read(paddr.val())?;
                self.misses.push(address);
                self.stats.page_misses += 1;
                MemoryAccess { value, paddr, frame, hit: false }
            }
        };

        self.last_read = Some(address);
        handler(access.value);
        Ok(access)
    }

    /// Maps the page containing `address` to `frame` and loads it from storage.
    ///
    /// Whatever page owned `frame` before is invalidated.
    ///
    /// # Returns
    ///
    /// The physical address `address` now resolves to.
    ///
    /// # Errors
    ///
    /// [`SimError::OutOfBounds`] if the page or frame lies outside the
    /// configured memory.
    pub fn replace_frame(&mut self, frame: usize, address: VirtAddr) -> SimResult<PhysAddr> {
        let table = self.mmu.page_table();
        let frame_size = table.frame_size();
        let (page, offset) = table.page_address(address);
        let evicted = table.page_for_frame(frame).filter(|&old| old != page);

        self.mmu.page_table_mut().assign_page_to_frame(page, frame)?;
        copy_block(
            &self.storage,
            &mut self.memory,
            (page * frame_size) as u64,
            (frame * frame_size) as u64,
            frame_size,
        )?;

        if evicted.is_some() {
            self.stats.evictions += 1;
        }
        Ok(PhysAddr::from_frame(frame, frame_size, offset))
    }
}
