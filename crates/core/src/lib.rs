//! Tick-driven CPU scheduler and paged virtual memory simulator.
//!
//! This crate simulates a single processing unit with the following:
//! 1. **Scheduling:** Round-robin, FCFS, FCLS and SJF policies over units of work.
//! 2. **Memory:** Page table, MMU, FIFO/LFU frame replacement, physical memory and backing store.
//! 3. **Units of Work:** A lifecycle state machine and a burst-driven process.
//! 4. **Simulation:** Arrival-driven driver, natural termination, scenario loading and statistics.

/// Common types (addresses, errors).
pub mod common;
/// Simulator configuration (defaults, enums, hierarchical config structures).
pub mod config;
/// Processing unit and its policy units.
pub mod core;
/// Physical memory and backing store buffers.
pub mod memory;
/// Units of work and their lifecycle.
pub mod process;
/// Simulation driver and scenario loader.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// The simulated machine.
pub use crate::core::ProcessingUnit;
/// Top-level driver; register units with `set_process` and call `run`.
pub use crate::sim::Simulation;
