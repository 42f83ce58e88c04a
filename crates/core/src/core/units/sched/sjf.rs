//! Shortest Job First (non-preemptive).
//!
//! When the CPU is free, the queued unit with the least remaining work runs
//! next. Ties go to the unit found first in queue order.

use std::collections::VecDeque;

use super::SchedulingPolicy;
use crate::common::{SimError, SimResult};
use crate::core::cpu::ExecutionSlot;
use crate::process::{self, ProcessRef};

/// SJF policy state.
#[derive(Debug, Default)]
pub struct Sjf {
    queue: VecDeque<ProcessRef>,
    busy: bool,
}

impl Sjf {
    /// Creates an idle policy with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this policy has a unit on the CPU.
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// First unit with the minimal remaining work.
    fn shortest(&self) -> Option<ProcessRef> {
        let mut best: Option<(u64, &ProcessRef)> = None;
        for candidate in &self.queue {
            let work = candidate.borrow().remaining_work();
            if best.is_none_or(|(least, _)| work < least) {
                best = Some((work, candidate));
            }
        }
        best.map(|(_, p)| p.clone())
    }

    /// Removes `selected` from the queue by identity.
    fn take(&mut self, selected: &ProcessRef) -> SimResult<ProcessRef> {
        self.queue
            .iter()
            .position(|p| process::same(p, selected))
            .and_then(|index| self.queue.remove(index))
            .ok_or_else(|| {
                SimError::QueueConsistency(format!(
                    "process '{}' not found in queue",
                    selected.borrow().name()
                ))
            })
    }
}

impl SchedulingPolicy for Sjf {
    fn add_to_queue(&mut self, process: ProcessRef) {
        self.queue.push_back(process);
    }

    fn tick(&mut self, slot: &mut ExecutionSlot) -> SimResult<()> {
        if !self.busy {
            if let Some(selected) = self.shortest() {
                let process = self.take(&selected)?;
                self.busy = true;
                slot.run_process(process)?;
            }
        }
        Ok(())
    }

    fn drop_process(&mut self, _process: &ProcessRef) {
        self.busy = false;
    }

    fn stop_process(&mut self, process: ProcessRef) {
        self.queue.push_back(process);
        self.busy = false;
    }

    fn queue(&self) -> &VecDeque<ProcessRef> {
        &self.queue
    }
}
