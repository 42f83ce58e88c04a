//! Processing Unit Definition and Initialization.
//!
//! This module defines the `ProcessingUnit`, the container for the whole
//! simulated machine state. It coordinates the following:
//! 1. **Execution Slot:** The tick counter and the single current unit of work.
//! 2. **Scheduling:** The active scheduling policy and its waiting queue.
//! 3. **Virtual Memory:** MMU, replacement policy, physical memory and backing store.
//! 4. **Read Queue:** Pending virtual reads, one serviced per tick.
//! 5. **Statistics:** Counters reported at the end of a run.

/// Per-tick orchestration.
pub mod execution;

/// Virtual memory access path.
pub mod memory;

/// Processing-unit observer hooks.
pub mod observer;

/// Tick counter and current-unit slot.
pub mod slot;

/// Synthetic memory traffic generator.
pub mod traffic;

use std::collections::VecDeque;
use std::fmt;

use tracing::debug;

use crate::common::{SimResult, VirtAddr};
use crate::config::Config;
use crate::core::units::mmu::{Mmu, PageTable};
use crate::core::units::replacement::PolicyDispatch;
use crate::core::units::sched::{SchedulerDispatch, SchedulingPolicy};
use crate::memory::Memory;
use crate::process::ProcessRef;
use crate::stats::SimStats;

pub use self::execution::TickStatus;
pub use self::memory::MemoryAccess;
pub use self::observer::{NoopObserver, Observer};
pub use self::slot::ExecutionSlot;
pub use self::traffic::TrafficGenerator;

/// Callback receiving the byte produced by a queued read.
pub type ReadHandler = Box<dyn FnOnce(u8)>;

/// A pending virtual read.
pub struct ReadRequest {
    /// Address to read.
    pub address: VirtAddr,
    /// Optional consumer of the value.
    pub handler: Option<ReadHandler>,
}

impl fmt::Debug for ReadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadRequest")
            .field("address", &self.address)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

/// The simulated machine: one CPU, its scheduler and its paged memory.
#[derive(Debug)]
pub struct ProcessingUnit {
    slot: ExecutionSlot,
    scheduler: SchedulerDispatch,
    mmu: Mmu,
    replacer: PolicyDispatch,
    memory: Memory,
    storage: Memory,
    read_queue: VecDeque<ReadRequest>,
    hits: Vec<VirtAddr>,
    misses: Vec<VirtAddr>,
    last_read: Option<VirtAddr>,
    traffic: TrafficGenerator,
    /// Run statistics.
    pub stats: SimStats,
}

impl ProcessingUnit {
    /// Builds a processing unit from a validated configuration.
    ///
    /// # Errors
    ///
    /// [`crate::common::SimError::InvalidConfig`] if `config.validate()` fails.
    pub fn new(config: &Config) -> SimResult<Self> {
        config.validate()?;
        let mem = &config.memory;
        debug!(
            scheduler = ?config.scheduler.policy,
            replacement = ?mem.policy,
            memory_size = mem.memory_size,
            frame_size = mem.frame_size,
            page_count = mem.page_count,
            "processing unit created"
        );

        Ok(Self {
            slot: ExecutionSlot::new(),
            scheduler: SchedulerDispatch::from_config(&config.scheduler),
            mmu: Mmu::new(PageTable::new(mem.page_count, mem.frame_size, mem.memory_size)),
            replacer: PolicyDispatch::from_config(mem.policy),
            memory: Memory::physical(mem.memory_size),
            storage: Memory::storage(mem.virtual_size()),
            read_queue: VecDeque::new(),
            hits: Vec::new(),
            misses: Vec::new(),
            last_read: None,
            traffic: TrafficGenerator::new(mem.traffic, mem.traffic_seed, mem.virtual_size() as u64),
            stats: SimStats::default(),
        })
    }

    /// Current tick.
    pub const fn time(&self) -> u64 {
        self.slot.time()
    }

    /// The unit holding the CPU, if any.
    pub const fn current(&self) -> Option<&ProcessRef> {
        self.slot.current()
    }

    /// Execution slot (tick counter and current unit).
    pub const fn slot(&self) -> &ExecutionSlot {
        &self.slot
    }

    /// Active scheduling policy.
    pub const fn scheduler(&self) -> &SchedulerDispatch {
        &self.scheduler
    }

    /// Units waiting for the CPU, in policy queue order.
    pub fn queue(&self) -> &VecDeque<ProcessRef> {
        self.scheduler.queue()
    }

    /// Memory management unit.
    pub const fn mmu(&self) -> &Mmu {
        &self.mmu
    }

    /// Active replacement policy.
    pub const fn replacer(&self) -> &PolicyDispatch {
        &self.replacer
    }

    /// Physical memory.
    pub const fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Backing store.
    pub const fn storage(&self) -> &Memory {
        &self.storage
    }

    /// Addresses whose reads hit, in order.
    pub fn hits(&self) -> &[VirtAddr] {
        &self.hits
    }

    /// Addresses whose reads faulted, in order.
    pub fn misses(&self) -> &[VirtAddr] {
        &self.misses
    }

    /// Address read during the current tick, if any.
    pub const fn last_read(&self) -> Option<VirtAddr> {
        self.last_read
    }

    /// Number of reads still queued.
    pub fn pending_reads(&self) -> usize {
        self.read_queue.len()
    }

    /// Hands a newly arrived unit to the scheduling policy.
    pub fn add_process(&mut self, process: ProcessRef) {
        debug!(tick = self.time(), process = %process.borrow().name(), "process queued");
        self.scheduler.add_to_queue(process);
    }

    /// Dispatches `process` onto the CPU.
    ///
    /// # Errors
    ///
    /// [`crate::common::SimError::InvalidOperation`] if a unit is already current.
    pub fn run_process(&mut self, process: ProcessRef) -> SimResult<()> {
        self.slot.run_process(process)
    }

    /// Preempts the current unit and returns it to the scheduling policy.
    ///
    /// # Errors
    ///
    /// [`crate::common::SimError::InvalidOperation`] if no unit is current.
    pub fn stop_process(&mut self) -> SimResult<()> {
        let process = self.slot.stop_process()?;
        self.scheduler.stop_process(process);
        Ok(())
    }

    /// Removes the finished current unit and notifies the scheduling policy.
    ///
    /// # Errors
    ///
    /// [`crate::common::SimError::InvalidOperation`] if no unit is current.
    pub fn drop_process(&mut self) -> SimResult<ProcessRef> {
        let process = self.slot.release()?;
        self.scheduler.drop_process(&process);
        Ok(process)
    }

    /// Queues a read of `address` for a later tick.
    pub fn queue_read(&mut self, address: VirtAddr) {
        self.read_queue.push_back(ReadRequest { address, handler: None });
    }

    /// Queues a read of `address` whose value is passed to `handler`.
    pub fn queue_read_with<F>(&mut self, address: VirtAddr, handler: F)
    where
        F: FnOnce(u8) + 'static,
    {
        self.read_queue.push_back(ReadRequest {
            address,
            handler: Some(Box::new(handler)),
        });
    }
}
