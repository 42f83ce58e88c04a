//! Unit-of-work lifecycle state machine.
//!
//! Every status change of a unit of work goes through [`ProcessStatus::on`],
//! driven by the lifecycle hook the processing unit invoked. Scheduling
//! policies never change a status directly.

use std::fmt;

/// Lifecycle status of a unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessStatus {
    /// Queued or preempted; not holding the CPU.
    #[default]
    Waiting,
    /// Holding the CPU.
    Active,
    /// All work done. Only a fault leaves this status.
    Finished,
    /// Ticked while not active. Terminal until the unit is started again.
    Error,
}

/// Events that move a unit of work through its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The processing unit dispatched the unit (`run` hook).
    Dispatched,
    /// The processing unit preempted the unit (`stop` hook).
    Preempted,
    /// A tick consumed the last unit of remaining work.
    Completed,
    /// A tick arrived while the unit was not active.
    Faulted,
}

impl ProcessStatus {
    /// Returns the status reached from `self` on `event`.
    ///
    /// A fault moves any status to `Error`. `Finished` absorbs every other event.
    pub const fn on(self, event: LifecycleEvent) -> Self {
        match (self, event) {
            (_, LifecycleEvent::Faulted) => Self::Error,
            (Self::Finished, _) => Self::Finished,
            (_, LifecycleEvent::Dispatched) => Self::Active,
            (_, LifecycleEvent::Preempted) => Self::Waiting,
            (Self::Active, LifecycleEvent::Completed) => Self::Finished,
            (_, LifecycleEvent::Completed) => Self::Error,
        }
    }

    /// Whether the unit may be ticked.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Waiting => "WAITING",
            Self::Active => "ACTIVE",
            Self::Finished => "FINISHED",
            Self::Error => "ERROR",
        };
        f.write_str(s)
    }
}
