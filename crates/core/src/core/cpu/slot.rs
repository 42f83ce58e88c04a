//! CPU execution slot.
//!
//! The slot is the part of the processing unit a scheduling policy drives: the
//! tick counter and the single "current" unit of work. It lives next to the
//! policy inside the processing unit rather than behind it, so a policy can
//! start and preempt units without re-borrowing the whole processing unit.

use tracing::info;

use crate::common::{SimError, SimResult};
use crate::process::{ProcessRef, RuntimeData};

/// Tick counter and current unit of work.
#[derive(Debug, Default)]
pub struct ExecutionSlot {
    time: u64,
    current: Option<ProcessRef>,
    dispatches: u64,
    preemptions: u64,
}

impl ExecutionSlot {
    /// Creates an empty slot at tick 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current tick.
    pub const fn time(&self) -> u64 {
        self.time
    }

    /// The unit holding the CPU, if any.
    pub const fn current(&self) -> Option<&ProcessRef> {
        self.current.as_ref()
    }

    /// Whether a unit holds the CPU.
    pub const fn is_occupied(&self) -> bool {
        self.current.is_some()
    }

    /// Number of successful `run_process` calls.
    pub const fn dispatches(&self) -> u64 {
        self.dispatches
    }

    /// Number of successful `stop_process` calls.
    pub const fn preemptions(&self) -> u64 {
        self.preemptions
    }

    pub(crate) const fn advance(&mut self) {
        self.time += 1;
    }

    const fn runtime(&self) -> RuntimeData {
        RuntimeData { tick: self.time }
    }

    /// Puts `process` on the CPU and invokes its `run` hook.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidOperation`] if another unit is already current.
    pub fn run_process(&mut self, process: ProcessRef) -> SimResult<()> {
        if self.current.is_some() {
            return Err(SimError::InvalidOperation("another process is already running"));
        }
        info!(tick = self.time, process = %process.borrow().name(), "running process");
        process.borrow_mut().run(self.runtime());
        self.current = Some(process);
        self.dispatches += 1;
        Ok(())
    }

    /// Takes the current unit off the CPU after invoking its `stop` hook.
    ///
    /// The caller is responsible for handing the unit back to its policy.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidOperation`] if no unit is current.
    pub fn stop_process(&mut self) -> SimResult<ProcessRef> {
        let process = self
            .current
            .take()
            .ok_or(SimError::InvalidOperation("attempted to stop null process"))?;
        info!(tick = self.time, process = %process.borrow().name(), "stopping process");
        process.borrow_mut().stop(self.runtime());
        self.preemptions += 1;
        Ok(process)
    }

    /// Takes the current unit off the CPU without any lifecycle hook.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidOperation`] if no unit is current.
    pub fn release(&mut self) -> SimResult<ProcessRef> {
        let process = self
            .current
            .take()
            .ok_or(SimError::InvalidOperation("attempted to drop null process"))?;
        info!(tick = self.time, process = %process.borrow().name(), "dropping process");
        Ok(process)
    }
}
