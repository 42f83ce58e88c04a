//! First Come, Last Served.
//!
//! The queue is a stack: the most recently queued unit runs next, and a
//! preempted unit goes back on top.

use std::collections::VecDeque;

use super::SchedulingPolicy;
use crate::common::SimResult;
use crate::core::cpu::ExecutionSlot;
use crate::process::ProcessRef;

/// FCLS policy state. The back of `queue` is the top of the stack.
#[derive(Debug, Default)]
pub struct Fcls {
    queue: VecDeque<ProcessRef>,
    busy: bool,
}

impl Fcls {
    /// Creates an idle policy with an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this policy has a unit on the CPU.
    pub const fn is_busy(&self) -> bool {
        self.busy
    }
}

impl SchedulingPolicy for Fcls {
    fn add_to_queue(&mut self, process: ProcessRef) {
        self.queue.push_back(process);
    }

    fn tick(&mut self, slot: &mut ExecutionSlot) -> SimResult<()> {
        if !self.busy {
            if let Some(process) = self.queue.pop_back() {
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
