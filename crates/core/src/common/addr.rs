//! Physical and Virtual Address types.
//!
//! This module defines strong types for physical and virtual addresses to prevent
//! accidental mixing of address spaces. It provides the following:
//! 1. **Type Safety:** Distinguishes between virtual and physical address spaces at compile time.
//! 2. **Page Arithmetic:** Splits a virtual address into page number and in-page offset.
//! 3. **MMU Integration:** Acts as the primary interface for memory translation operations.

use std::fmt;

/// A virtual address issued by a unit of work.
///
/// Virtual addresses must be translated to physical addresses through the
/// Memory Management Unit before physical memory can be accessed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtAddr(pub u64);

/// A physical address in simulated main memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhysAddr(pub u64);

impl VirtAddr {
    /// Creates a new virtual address from a raw value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw address value.
    #[inline(always)]
    pub const fn val(&self) -> u64 {
        self.0
    }

    /// Splits the address into `(page, offset)` for the given frame size.
    ///
    /// `page = floor(addr / frame_size)`, `offset = addr mod frame_size`.
    /// `frame_size` must be non-zero; configuration validation guarantees it.
    #[inline]
    pub const fn split(&self, frame_size: usize) -> (usize, usize) {
        let fs = frame_size as u64;
        ((self.0 / fs) as usize, (self.0 % fs) as usize)
    }
}

impl PhysAddr {
    /// Creates a new physical address from a raw value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw address value.
    #[inline(always)]
    pub const fn val(&self) -> u64 {
        self.0
    }

    /// Builds the physical address of `offset` inside `frame`.
    #[inline]
    pub const fn from_frame(frame: usize, frame_size: usize, offset: usize) -> Self {
        Self((frame * frame_size + offset) as u64)
    }
}

impl fmt::Display for VirtAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::Display for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<u64> for VirtAddr {
    fn from(addr: u64) -> Self {
        Self(addr)
    }
}
