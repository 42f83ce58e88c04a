//! Least Frequently Used (LFU) Page Replacement Policy.
//!
//! Hits increment a per-frame use counter and a newly assigned frame starts at
//! one. The victim on a full memory is still the oldest assignment, exactly as
//! in FIFO; the counters are reported through `log_state` but do not steer
//! eviction.

use std::collections::BTreeMap;
use std::fmt::Write;

use tracing::debug;

use super::{ReplacementPolicy, UsageOrder};
use crate::common::VirtAddr;
use crate::core::units::mmu::Mmu;

/// LFU policy state.
#[derive(Debug, Clone, Default)]
pub struct LfuPolicy {
    order: UsageOrder,
    frequency: BTreeMap<usize, u64>,
}

impl LfuPolicy {
    /// Creates an LFU policy with no frames in use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame usage order, oldest first.
    pub const fn usage(&self) -> &UsageOrder {
        &self.order
    }

    /// Use count of `frame`, if it was ever assigned.
    pub fn frequency(&self, frame: usize) -> Option<u64> {
        self.frequency.get(&frame).copied()
    }
}

impl ReplacementPolicy for LfuPolicy {
    fn on_hit(&mut self, mmu: &Mmu, vaddr: VirtAddr) -> usize {
        let frame = mmu.bound_frame(vaddr);
        *self.frequency.entry(frame).or_insert(0) += 1;
        frame
    }

    fn on_miss(&mut self, mmu: &Mmu, vaddr: VirtAddr) -> usize {
        let frame = self.order.claim(mmu).frame();
        let _ = self.frequency.insert(frame, 1);
        debug!(frame, %vaddr, "frame frequency reset");
        frame
    }

    fn log_state(&self) -> String {
        let mut out = String::from("Frequencies: ");
        for (frame, count) in &self.frequency {
            let _ = write!(out, "{frame}: {count}; ");
        }
        out
    }
}
