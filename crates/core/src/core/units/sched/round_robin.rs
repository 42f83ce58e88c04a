//! Round-Robin.
//!
//! FIFO dispatch with a fixed time slice. When the current unit has held the
//! CPU for `quantum` ticks it is stopped and sent to the back of the queue,
//! and the head of the queue starts on the same tick.

use std::collections::VecDeque;

use super::SchedulingPolicy;
use crate::common::SimResult;
use crate::core::cpu::ExecutionSlot;
use crate::process::ProcessRef;

/// Round-robin policy state.
#[derive(Debug)]
pub struct RoundRobin {
    queue: VecDeque<ProcessRef>,
    busy: bool,
    last_start_time: u64,
    quantum: u64,
}

impl RoundRobin {
    /// Creates a round-robin policy with the given time slice.
    pub const fn new(quantum: u64) -> Self {
        Self {
            queue: VecDeque::new(),
            busy: false,
            last_start_time: 0,
            quantum,
        }
    }

    /// Time slice in ticks.
    pub const fn quantum(&self) -> u64 {
        self.quantum
    }

    /// Tick on which the current slice began.
    pub const fn last_start_time(&self) -> u64 {
        self.last_start_time
    }
}

impl SchedulingPolicy for RoundRobin {
    fn add_to_queue(&mut self, process: ProcessRef) {
        self.queue.push_back(process);
    }

    fn tick(&mut self, slot: &mut ExecutionSlot) -> SimResult<()> {
        let time = slot.time();
        if slot.is_occupied() && time.saturating_sub(self.last_start_time) >= self.quantum {
            self.last_start_time = time;
            let preempted = slot.stop_process()?;
            self.stop_process(preempted);
        }
        if !self.busy {
            if let Some(process) = self.queue.pop_front() {
                self.busy = true;
                slot.run_process(process)?;
                self.last_start_time = time;
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
