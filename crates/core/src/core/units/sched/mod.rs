//! CPU Scheduling Policies.
//!
//! A scheduling policy owns the queue of waiting units of work and makes every
//! dispatch decision, once per processing-unit tick.
//!
//! # Policies
//!
//! - `RoundRobin`: FIFO queue, preempts the current unit after a quantum.
//! - `Fcfs`: First come, first served.
//! - `Fcls`: First come, last served (stack order).
//! - `Sjf`: Shortest job first.
//!
//! Operations on an empty queue are no-ops.

/// First come, first served.
pub mod fcfs;

/// First come, last served.
pub mod fcls;

/// Round-robin with quantum preemption.
pub mod round_robin;

/// Shortest job first.
pub mod sjf;

use std::collections::VecDeque;

use crate::common::SimResult;
use crate::config::{SchedulerConfig, SchedulingPolicy as PolicyKind};
use crate::core::cpu::ExecutionSlot;
use crate::process::ProcessRef;

pub use fcfs::Fcfs;
pub use fcls::Fcls;
pub use round_robin::RoundRobin;
pub use sjf::Sjf;

/// Trait for CPU scheduling policies.
pub trait SchedulingPolicy {
    /// Appends a newly arrived unit to the queue.
    fn add_to_queue(&mut self, process: ProcessRef);

    /// Makes this tick's dispatch decision.
    ///
    /// May first preempt the current unit (policy-specific), then starts the
    /// next queued unit if the CPU is free.
    ///
    /// # Errors
    ///
    /// Propagates slot invariant violations and queue corruption.
    fn tick(&mut self, slot: &mut ExecutionSlot) -> SimResult<()>;

    /// Notification that the current unit finished and left the CPU.
    fn drop_process(&mut self, process: &ProcessRef);

    /// Re-queues a preempted unit.
    fn stop_process(&mut self, process: ProcessRef);

    /// Units waiting for the CPU, in queue order.
    fn queue(&self) -> &VecDeque<ProcessRef>;
}

/// Enum dispatch over the built-in scheduling policies.
#[derive(Debug)]
pub enum SchedulerDispatch {
    /// Round-robin.
    RoundRobin(RoundRobin),
    /// First come, first served.
    Fcfs(Fcfs),
    /// First come, last served.
    Fcls(Fcls),
    /// Shortest job first.
    Sjf(Sjf),
}

impl SchedulerDispatch {
    /// Builds the policy selected in the configuration.
    pub fn from_config(config: &SchedulerConfig) -> Self {
        match config.policy {
            PolicyKind::RoundRobin => Self::RoundRobin(RoundRobin::new(config.quantum)),
            PolicyKind::Fcfs => Self::Fcfs(Fcfs::new()),
            PolicyKind::Fcls => Self::Fcls(Fcls::new()),
            PolicyKind::Sjf => Self::Sjf(Sjf::new()),
        }
    }

    fn inner(&self) -> &dyn SchedulingPolicy {
        match self {
            Self::RoundRobin(p) => p,
            Self::Fcfs(p) => p,
            Self::Fcls(p) => p,
            Self::Sjf(p) => p,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn SchedulingPolicy {
        match self {
            Self::RoundRobin(p) => p,
            Self::Fcfs(p) => p,
            Self::Fcls(p) => p,
            Self::Sjf(p) => p,
        }
    }
}

impl SchedulingPolicy for SchedulerDispatch {
    fn add_to_queue(&mut self, process: ProcessRef) {
        self.inner_mut().add_to_queue(process);
    }

    fn tick(&mut self, slot: &mut ExecutionSlot) -> SimResult<()> {
        self.inner_mut().tick(slot)
    }

    fn drop_process(&mut self, process: &ProcessRef) {
        self.inner_mut().drop_process(process);
    }

    fn stop_process(&mut self, process: ProcessRef) {
        self.inner_mut().stop_process(process);
    }

    fn queue(&self) -> &VecDeque<ProcessRef> {
        self.inner().queue()
    }
}
