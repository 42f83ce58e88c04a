//! Simulated memory regions.
//!
//! Physical memory and the backing store share one bounds-checked buffer type.

/// Byte buffer and block copy.
pub mod buffer;

pub use buffer::{Memory, copy_block};
