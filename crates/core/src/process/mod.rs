//! Units of work.
//!
//! This module defines what the scheduler schedules. It provides:
//! 1. **Lifecycle:** The `{run, tick, stop}` hook trait and the status state machine.
//! 2. **Shared Handles:** `ProcessRef`, the reference held by the arrival list,
//!    the policy queues, and the processing unit's current slot.
//! 3. **Burst Processes:** `SimulationProcess`, a unit with a fixed amount of work.

/// Burst-driven unit of work.
pub mod simulation_process;

/// Lifecycle status state machine.
pub mod status;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub use simulation_process::SimulationProcess;
pub use status::{LifecycleEvent, ProcessStatus};

/// Per-call context handed to lifecycle hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeData {
    /// Processing unit tick at the time of the call.
    pub tick: u64,
}

/// A schedulable unit of work.
///
/// The processing unit is the only caller of `run`, `tick` and `stop`.
pub trait Process: fmt::Debug {
    /// Display name.
    fn name(&self) -> &str;

    /// Current lifecycle status.
    fn status(&self) -> ProcessStatus;

    /// Work left before the unit finishes. Units that do not track work report 0.
    fn remaining_work(&self) -> u64 {
        0
    }

    /// Called when the unit is dispatched onto the CPU.
    fn run(&mut self, runtime: RuntimeData);

    /// Called once per tick while the unit is current.
    ///
    /// Returns `None` while work remains, `Some(0)` on completion and a
    /// nonzero code on a lifecycle error.
    fn tick(&mut self, runtime: RuntimeData) -> Option<i32>;

    /// Called when the unit is preempted.
    fn stop(&mut self, runtime: RuntimeData);
}

/// Shared handle to a unit of work.
pub type ProcessRef = Rc<RefCell<dyn Process>>;

/// Typed handle to a burst-driven unit, coercible to [`ProcessRef`].
pub type SimulationProcessRef = Rc<RefCell<SimulationProcess>>;

/// Wraps a unit of work into a [`ProcessRef`].
pub fn shared<P: Process + 'static>(process: P) -> ProcessRef {
    Rc::new(RefCell::new(process))
}

/// Identity comparison of two handles.
pub fn same(a: &ProcessRef, b: &ProcessRef) -> bool {
    Rc::ptr_eq(a, b)
}
