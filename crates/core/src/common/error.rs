//! Simulation error definitions.
//!
//! This module defines the error type shared by every fallible operation of the
//! simulator. It covers:
//! 1. **Memory Faults:** Accesses outside physical memory, the backing store, or the page table.
//! 2. **Invariant Violations:** Run/stop/drop requests that break single occupancy of the CPU.
//! 3. **Queue Corruption:** A scheduling policy losing track of its own selection.
//! 4. **Setup Errors:** Rejected configuration and unreadable scenario files.
//!
//! A unit of work reporting a nonzero return code is *not* an error here: the
//! processing unit logs it and keeps the unit resident.

use thiserror::Error;

/// Errors raised by the simulation core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// An address exceeded the configured size of a memory region.
    #[error("{region} address {address:#x} out of bounds (size {size:#x})")]
    OutOfBounds {
        /// Region that rejected the access (`"memory"`, `"storage"`, `"page table"`, `"virtual memory"`).
        region: &'static str,
        /// The offending address or index.
        address: u64,
        /// Size of the region.
        size: u64,
    },

    /// A run/stop/drop request was issued in a state that violates the
    /// "exactly one current unit" invariant.
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),

    /// A scheduling policy's selection was missing from its own queue.
    #[error("queue consistency violated: {0}")]
    QueueConsistency(String),

    /// The configuration cannot describe a working machine.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A scenario file could not be read or parsed.
    #[error("scenario error: {0}")]
    Scenario(String),
}

/// Convenience alias used throughout the crate.
pub type SimResult<T> = Result<T, SimError>;
