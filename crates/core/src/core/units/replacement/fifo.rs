//! First-In, First-Out (FIFO) Page Replacement Policy.
//!
//! Free frames are handed out lowest-numbered first. Once physical memory is
//! full, the frame assigned longest ago is recycled and becomes the newest.
//! Hits do not affect the order.

use tracing::debug;

use super::{Claim, ReplacementPolicy, UsageOrder};
use crate::common::VirtAddr;
use crate::core::units::mmu::Mmu;

/// FIFO policy state.
#[derive(Debug, Clone, Default)]
pub struct FifoPolicy {
    order: UsageOrder,
}

impl FifoPolicy {
    /// Creates a FIFO policy with no frames in use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame usage order, oldest first.
    pub const fn usage(&self) -> &UsageOrder {
        &self.order
    }
}

impl ReplacementPolicy for FifoPolicy {
    fn on_hit(&mut self, mmu: &Mmu, vaddr: VirtAddr) -> usize {
        mmu.bound_frame(vaddr)
    }

    fn on_miss(&mut self, mmu: &Mmu, vaddr: VirtAddr) -> usize {
        let claim = self.order.claim(mmu);
        match claim {
            Claim::Free(frame) => debug!(frame, %vaddr, "frame used"),
            Claim::Recycled(frame) => debug!(frame, %vaddr, "no free frames, frame reassigned"),
        }
        claim.frame()
    }

    fn log_state(&self) -> String {
        String::new()
    }
}
