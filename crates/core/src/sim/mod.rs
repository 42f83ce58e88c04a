//! Simulation driver and scenario loading.
//!
//! Provides the tick loop that feeds arriving units to the processing unit,
//! detects natural termination, and the JSON scenario format used to set a
//! run up from a file.

/// JSON scenario files.
pub mod loader;

/// Tick loop, termination and stop handling.
pub mod simulator;

pub use self::loader::{ProcessSpec, Scenario};
pub use self::simulator::{Arrival, Simulation, StopHandle};
