//! Simulated machine.
//!
//! This module contains the processing unit and the units it is built from:
//! the scheduling policies, the MMU and the page replacement policies.

/// Processing unit and its tick orchestration.
pub mod cpu;

/// Policy and translation units (scheduler, MMU, replacement).
pub mod units;

pub use self::cpu::ProcessingUnit;
