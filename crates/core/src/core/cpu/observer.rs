//! Hooks for watching a processing unit from outside.

use super::ProcessingUnit;
use crate::process::ProcessRef;

/// Receives processing-unit events.
///
/// Observers only get shared references, so they can inspect the queue and
/// memory state but cannot change them.
pub trait Observer {
    /// Called every tick after the scheduling decision and the counter advance.
    fn on_tick(&mut self, _unit: &ProcessingUnit) {}

    /// Called exactly once per unit, on the tick it completes.
    fn on_process_end(&mut self, _process: &ProcessRef, _unit: &ProcessingUnit) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {}
