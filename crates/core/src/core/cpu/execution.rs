//! Tick Orchestration.
//!
//! One call to [`ProcessingUnit::tick`] is one simulated time step. The steps
//! always run in this order:
//! 1. **Read Service:** Clear the last read, then service at most one queued read.
//! 2. **Scheduling:** Let the policy preempt and dispatch.
//! 3. **Advance:** Increment the tick counter, then issue any synthetic read.
//! 4. **Observe:** Run the `on_tick` hook.
//! 5. **Execute:** Tick the current unit and retire it if it completed.

use tracing::{info, warn};

use super::{Observer, ProcessingUnit, ReadRequest};
use crate::common::SimResult;
use crate::core::units::sched::SchedulingPolicy;
use crate::process::RuntimeData;

/// Whether the processing unit had a unit of work this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// No unit held the CPU.
    Idle,
    /// A unit was started or ticked.
    Busy,
}

impl ProcessingUnit {
    /// Advances the processing unit by one tick.
    ///
    /// # Errors
    ///
    /// Propagates memory bounds violations from the read path and slot or
    /// queue invariant violations from the scheduling policy.
    pub fn tick(&mut self, observer: &mut dyn Observer) -> SimResult<TickStatus> {
        self.last_read = None;
        if let Some(ReadRequest { address, handler }) = self.read_queue.pop_front() {
            let _ = match handler {
                Some(handler) => self.read_data(address, handler)?,
                None => self.read_data(address, |_| {})?,
            };
        }

        self.scheduler.tick(&mut self.slot)?;
        self.slot.advance();
        self.stats.ticks += 1;
        self.stats.dispatches = self.slot.dispatches();
        self.stats.preemptions = self.slot.preemptions();

        if self.traffic.is_due(self.slot.is_occupied()) {
            let address = self.traffic.next_address();
            let _ = self.read_data(address, |_| {})?;
        }

        observer.on_tick(self);

        let Some(process) = self.slot.current().cloned() else {
            self.stats.idle_ticks += 1;
            return Ok(TickStatus::Idle);
        };
        self.stats.busy_ticks += 1;

        let tick = self.time();
        let code = process.borrow_mut().tick(RuntimeData { tick });
        match code {
            Some(0) => {
                info!(tick, process = %process.borrow().name(), "process finished");
                self.scheduler.drop_process(&process);
                observer.on_process_end(&process, self);
                let _ = self.slot.release()?;
                self.stats.processes_finished += 1;
            }
            Some(code) => {
                warn!(tick, process = %process.borrow().name(), code, "process returned error code");
                self.stats.lifecycle_errors += 1;
            }
            None => {}
        }
        Ok(TickStatus::Busy)
    }
}
