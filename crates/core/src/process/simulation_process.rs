//! Burst-driven unit of work.
//!
//! A `SimulationProcess` needs `burst_time` active ticks to finish. It records
//! the tick it was first dispatched and the tick it finished so observers can
//! compute turnaround figures.

use tracing::debug;

use super::{LifecycleEvent, Process, ProcessStatus, RuntimeData};

/// Return code of a tick that found the unit inactive.
const LIFECYCLE_ERROR_CODE: i32 = 1;

/// A unit of work with a fixed burst.
#[derive(Debug, Clone)]
pub struct SimulationProcess {
    name: String,
    status: ProcessStatus,
    /// Total active ticks required.
    pub burst_time: u64,
    /// Active ticks consumed so far.
    pub running_time: u64,
    /// Tick of the first dispatch.
    pub start_time: Option<u64>,
    /// Tick on which the last unit of work was consumed.
    pub finish_time: Option<u64>,
}

impl SimulationProcess {
    /// Creates a waiting process with `burst_time` ticks of work.
    pub fn new(name: impl Into<String>, burst_time: u64) -> Self {
        Self {
            name: name.into(),
            status: ProcessStatus::Waiting,
            burst_time,
            running_time: 0,
            start_time: None,
            finish_time: None,
        }
    }

    /// Ticks of work left.
    pub const fn burst_time_left(&self) -> u64 {
        self.burst_time.saturating_sub(self.running_time)
    }

    /// Ticks from first dispatch to finish, or 0 while unfinished.
    pub fn execution_time(&self) -> u64 {
        match (self.start_time, self.finish_time) {
            (Some(start), Some(finish)) => finish.saturating_sub(start),
            _ => 0,
        }
    }

    /// Ticks elapsed between the finish and `tick`, or 0 while unfinished.
    pub fn relative_time(&self, tick: u64) -> u64 {
        self.finish_time.map_or(0, |finish| tick.saturating_sub(finish))
    }

    fn transition(&mut self, event: LifecycleEvent) {
        let next = self.status.on(event);
        if next != self.status {
            debug!(process = %self.name, from = %self.status, to = %next, "lifecycle transition");
        }
        self.status = next;
    }
}

impl Process for SimulationProcess {
    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> ProcessStatus {
        self.status
    }

    fn remaining_work(&self) -> u64 {
        self.burst_time_left()
    }

    fn run(&mut self, runtime: RuntimeData) {
        if self.start_time.is_none() {
            self.start_time = Some(runtime.tick);
        }
        self.transition(LifecycleEvent::Dispatched);
    }

    fn tick(&mut self, runtime: RuntimeData) -> Option<i32> {
        if !self.status.is_active() {
            self.transition(LifecycleEvent::Faulted);
            return Some(LIFECYCLE_ERROR_CODE);
        }
        if self.running_time < self.burst_time {
            self.running_time += 1;
        }
        if self.burst_time_left() == 0 {
            self.finish_time = Some(runtime.tick);
            self.transition(LifecycleEvent::Completed);
            return Some(0);
        }
        None
    }

    fn stop(&mut self, _runtime: RuntimeData) {
        self.transition(LifecycleEvent::Preempted);
    }
}
