//! Common utilities and types used throughout the simulator.
//!
//! This module provides the building blocks shared by all components:
//! 1. **Address Types:** Strong types for virtual and physical addresses.
//! 2. **Error Handling:** The crate-wide error enum and result alias.

/// Address type definitions (physical and virtual addresses).
pub mod addr;

/// Error types.
pub mod error;

pub use addr::{PhysAddr, VirtAddr};
pub use error::{SimError, SimResult};
