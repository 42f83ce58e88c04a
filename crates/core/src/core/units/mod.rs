//! Processing unit building blocks.

/// Page table and address translation.
pub mod mmu;

/// Page replacement policies.
pub mod replacement;

/// CPU scheduling policies.
pub mod sched;
