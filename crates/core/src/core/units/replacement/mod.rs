//! Page Replacement Policies.
//!
//! Implements the algorithms that pick a physical frame on a page fault and
//! track frame usage on hits.
//!
//! # Policies
//!
//! - `Fifo`: First-In, First-Out.
//! - `Lfu`: Least Frequently Used (frequency bookkeeping; eviction in assignment order).

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Frequently Used replacement policy.
pub mod lfu;

use std::collections::VecDeque;

use crate::common::VirtAddr;
use crate::config;
use crate::core::units::mmu::Mmu;

pub use fifo::FifoPolicy;
pub use lfu::LfuPolicy;

/// Trait for page replacement policies.
///
/// Policies own their bookkeeping and are only mutated through these calls.
pub trait ReplacementPolicy {
    /// Updates the policy state when an access hits a resident page.
    ///
    /// # Returns
    ///
    /// The frame holding the page of `vaddr`.
    fn on_hit(&mut self, mmu: &Mmu, vaddr: VirtAddr) -> usize;

    /// Chooses the frame that will receive the page of `vaddr`.
    ///
    /// # Returns
    ///
    /// The target frame. The caller performs the page table update and the copy.
    fn on_miss(&mut self, mmu: &Mmu, vaddr: VirtAddr) -> usize;

    /// Human-readable summary of the policy state.
    fn log_state(&self) -> String;
}

/// Frames in use, oldest assignment first.
///
/// Frame count is computed from the page table on first use and cached.
#[derive(Debug, Clone, Default)]
pub struct UsageOrder {
    used: VecDeque<usize>,
    frame_count: Option<usize>,
}

/// A frame handed out by [`UsageOrder::claim`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim {
    /// A never-used frame.
    Free(usize),
    /// The oldest frame, recycled.
    Recycled(usize),
}

impl Claim {
    /// The claimed frame.
    pub const fn frame(self) -> usize {
        match self {
            Self::Free(f) | Self::Recycled(f) => f,
        }
    }
}

impl UsageOrder {
    /// Cached frame count, if already computed.
    pub const fn frame_count(&self) -> Option<usize> {
        self.frame_count
    }

    /// Frames in assignment order (head is next to be recycled).
    pub const fn frames(&self) -> &VecDeque<usize> {
        &self.used
    }

    /// Claims a frame: the lowest unused one while any remain, otherwise the
    /// oldest assignment, which moves to the tail.
    pub fn claim(&mut self, mmu: &Mmu) -> Claim {
        let frame_count = *self
            .frame_count
            .get_or_insert_with(|| mmu.page_table().frame_count());

        if self.used.len() < frame_count {
            if let Some(frame) = (0..frame_count).find(|f| !self.used.contains(f)) {
                self.used.push_back(frame);
                return Claim::Free(frame);
            }
        }

        let frame = self.used.pop_front().unwrap_or(0);
        self.used.push_back(frame);
        Claim::Recycled(frame)
    }
}

/// Enum dispatch over the built-in replacement policies.
#[derive(Debug, Clone)]
pub enum PolicyDispatch {
    /// First-In, First-Out.
    Fifo(FifoPolicy),
    /// Least Frequently Used.
    Lfu(LfuPolicy),
}

impl PolicyDispatch {
    /// Builds the policy selected in the configuration.
    pub fn from_config(policy: config::ReplacementPolicy) -> Self {
        match policy {
            config::ReplacementPolicy::Fifo => Self::Fifo(FifoPolicy::new()),
            config::ReplacementPolicy::Lfu => Self::Lfu(LfuPolicy::new()),
        }
    }
}

impl ReplacementPolicy for PolicyDispatch {
    fn on_hit(&mut self, mmu: &Mmu, vaddr: VirtAddr) -> usize {
        match self {
            Self::Fifo(p) => p.on_hit(mmu, vaddr),
            Self::Lfu(p) => p.on_hit(mmu, vaddr),
        }
    }

    fn on_miss(&mut self, mmu: &Mmu, vaddr: VirtAddr) -> usize {
        match self {
            Self::Fifo(p) => p.on_miss(mmu, vaddr),
            Self::Lfu(p) => p.on_miss(mmu, vaddr),
        }
    }

    fn log_state(&self) -> String {
        match self {
            Self::Fifo(p) => p.log_state(),
            Self::Lfu(p) => p.log_state(),
        }
    }
}
