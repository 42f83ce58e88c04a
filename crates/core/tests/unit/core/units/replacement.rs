//! Page Replacement Policy Tests.
//!
//! Exercises FIFO and LFU frame selection in isolation against an MMU, and
//! the eviction order end to end through the processing unit.

use pretty_assertions::assert_eq;
use schedsim_core::common::VirtAddr;
use schedsim_core::config::{self, Config};
use schedsim_core::core::ProcessingUnit;
use schedsim_core::core::units::mmu::{Mmu, PageTable};
use schedsim_core::core::units::replacement::{
    Claim, FifoPolicy, LfuPolicy, PolicyDispatch, ReplacementPolicy, UsageOrder,
};

/// Two frames of two bytes, eight pages.
fn small_mmu() -> Mmu {
    Mmu::new(PageTable::new(8, 2, 4))
}

fn small_unit(policy: config::ReplacementPolicy) -> ProcessingUnit {
    let mut config = Config::default();
    config.memory.policy = policy;
    config.memory.memory_size = 4;
    config.memory.frame_size = 2;
    config.memory.page_count = 8;
    ProcessingUnit::new(&config).unwrap()
}

// ══════════════════════════════════════════════════════════
// 1. Usage order
// ══════════════════════════════════════════════════════════

#[test]
fn usage_order_hands_out_free_then_recycles() {
    let mmu = small_mmu();
    let mut order = UsageOrder::default();
    assert_eq!(order.frame_count(), None);
    assert_eq!(order.claim(&mmu), Claim::Free(0));
    assert_eq!(order.frame_count(), Some(2));
    assert_eq!(order.claim(&mmu), Claim::Free(1));
    assert_eq!(order.claim(&mmu), Claim::Recycled(0));
    assert_eq!(order.claim(&mmu), Claim::Recycled(1));
    assert_eq!(order.frames().iter().copied().collect::<Vec<_>>(), vec![0, 1]);
}

// ══════════════════════════════════════════════════════════
// 2. FIFO
// ══════════════════════════════════════════════════════════

#[test]
fn fifo_misses_rotate_through_frames() {
    let mmu = small_mmu();
    let mut fifo = FifoPolicy::new();
    let frames: Vec<usize> = (0..5)
        .map(|page| fifo.on_miss(&mmu, VirtAddr::new(page * 2)))
        .collect();
    assert_eq!(frames, vec![0, 1, 0, 1, 0]);
    assert_eq!(fifo.log_state(), "");
}

#[test]
fn fifo_hit_returns_bound_frame_without_reordering() {
    let mut mmu = small_mmu();
    let mut fifo = FifoPolicy::new();
    let frame = fifo.on_miss(&mmu, VirtAddr::new(6));
    mmu.page_table_mut().assign_page_to_frame(3, frame).unwrap();
    let _ = fifo.on_miss(&mmu, VirtAddr::new(0));

    assert_eq!(fifo.on_hit(&mmu, VirtAddr::new(7)), frame);
    assert_eq!(fifo.usage().frames().front(), Some(&frame));
}

#[test]
fn fifo_evicts_in_assignment_order() {
    let mut unit = small_unit(config::ReplacementPolicy::Fifo);
    for addr in [0, 2, 4] {
        let access = unit.read_data(VirtAddr::new(addr), |_| {}).unwrap();
        assert!(!access.hit);
    }
    let table = unit.mmu().page_table();
    assert!(!table.entry(0).unwrap().valid);
    assert!(table.entry(1).unwrap().valid);
    assert_eq!(table.page_for_frame(0), Some(2));

    let access = unit.read_data(VirtAddr::new(1), |_| {}).unwrap();
    assert!(!access.hit);
    assert_eq!(access.frame, 1);
    assert_eq!(unit.stats.evictions, 2);
}

// ══════════════════════════════════════════════════════════
// 3. LFU
// ══════════════════════════════════════════════════════════

#[test]
fn lfu_counts_hits_per_frame() {
    let mut unit = small_unit(config::ReplacementPolicy::Lfu);
    let _ = unit.read_data(VirtAddr::new(0), |_| {}).unwrap();
    let _ = unit.read_data(VirtAddr::new(1), |_| {}).unwrap();
    let _ = unit.read_data(VirtAddr::new(0), |_| {}).unwrap();
    let _ = unit.read_data(VirtAddr::new(2), |_| {}).unwrap();

    let PolicyDispatch::Lfu(lfu) = unit.replacer() else {
        panic!("expected LFU policy");
    };
    assert_eq!(lfu.frequency(0), Some(3));
    assert_eq!(lfu.frequency(1), Some(1));
    assert_eq!(unit.replacer().log_state(), "Frequencies: 0: 3; 1: 1; ");
}

#[test]
fn lfu_evicts_oldest_not_least_used() {
    let mut unit = small_unit(config::ReplacementPolicy::Lfu);
    let _ = unit.read_data(VirtAddr::new(0), |_| {}).unwrap();
    for _ in 0..5 {
        let _ = unit.read_data(VirtAddr::new(0), |_| {}).unwrap();
    }
    let _ = unit.read_data(VirtAddr::new(2), |_| {}).unwrap();
    let access = unit.read_data(VirtAddr::new(4), |_| {}).unwrap();

    assert_eq!(access.frame, 0);
    let PolicyDispatch::Lfu(lfu) = unit.replacer() else {
        panic!("expected LFU policy");
    };
    assert_eq!(lfu.frequency(0), Some(1));
}

#[test]
fn lfu_log_state_starts_empty() {
    assert_eq!(LfuPolicy::new().log_state(), "Frequencies: ");
}
