//! First Come, First Served.
//!
//! Units run to completion in arrival order.

use std::collections::VecDeque;

use super::SchedulingPolicy;
use crate::common::SimResult;
use crate::core::cpu::ExecutionSlot;
use crate::process::ProcessRef;

/// FCFS policy state.
#[derive(Debug, Default)]
pub struct Fcfs {
    queue: VecDeque<ProcessRef>,
    busy: bool,
}

impl Fcfs {
    /// Creates an idle policy with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this policy has a unit on the CPU.
    pub const fn is_busy(&self) -> bool {
        self.busy
    }
}

impl SchedulingPolicy for Fcfs {
    fn add_to_queue(&mut self, process: ProcessRef) {
        self.queue.push_back(process);
    }

    fn tick(&mut self, slot: &mut ExecutionSlot) -> SimResult<()> {
        if !self.busy {
            if let Some(process) = self.queue.pop_front() {
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
