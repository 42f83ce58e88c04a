//! Byte-addressable memory buffer.
//!
//! This module provides the storage behind both physical memory and the backing
//! store. Every byte starts out as `address mod 256`, so data moved between the
//! two regions is recognisable in traces and tests. All accesses are bounds
//! checked against the configured size.

use crate::common::{SimError, SimResult};

/// Region label for physical memory.
pub const MEMORY_REGION: &str = "memory";

/// Region label for the backing store.
pub const STORAGE_REGION: &str = "storage";

/// A bounds-checked byte array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    region: &'static str,
    data: Vec<u8>,
}

impl Memory {
    /// Creates a buffer of `size` bytes labelled `region`.
    pub fn new(region: &'static str, size: usize) -> Self {
        Self {
            region,
            data: (0..size).map(|i| (i % 256) as u8).collect(),
        }
    }

    /// Creates physical memory of `size` bytes.
    pub fn physical(size: usize) -> Self {
        Self::new(MEMORY_REGION, size)
    }

    /// Creates a backing store of `size` bytes.
    pub fn storage(size: usize) -> Self {
        Self::new(STORAGE_REGION, size)
    }

    /// Returns the size of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` when the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Region label used in errors.
    pub const fn region(&self) -> &'static str {
        self.region
    }

    /// Raw view of the contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    fn out_of_bounds(&self, address: u64) -> SimError {
        SimError::OutOfBounds {
            region: self.region,
            address,
            size: self.data.len() as u64,
        }
    }

    fn index(&self, address: u64) -> SimResult<usize> {
        usize::try_from(address)
            .ok()
            .filter(|&i| i < self.data.len())
            .ok_or_else(|| self.out_of_bounds(address))
    }

    /// Reads a single byte.
    ///
    /// # Errors
    ///
    /// [`SimError::OutOfBounds`] if `address >= len()`.
    pub fn read(&self, address: u64) -> SimResult<u8> {
        let i = self.index(address)?;
        Ok(self.data[i])
    }

    /// Writes a single byte.
    ///
    /// # Errors
    ///
    /// [`SimError::OutOfBounds`] if `address >= len()`.
    pub fn write(&mut self, address: u64, value: u8) -> SimResult<()> {
        let i = self.index(address)?;
        self.data[i] = value;
        Ok(())
    }

    /// Reads `len` contiguous bytes starting at `address`.
    ///
    /// # Errors
    ///
    /// [`SimError::OutOfBounds`] if the range does not fit.
    pub fn read_slice(&self, address: u64, len: usize) -> SimResult<&[u8]> {
        let start = usize::try_from(address).map_err(|_| self.out_of_bounds(address))?;
        let end = start
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| self.out_of_bounds(address.saturating_add(len as u64)))?;
        Ok(&self.data[start..end])
    }

    /// Writes `data` contiguously starting at `address`.
    ///
    /// # Errors
    ///
    /// [`SimError::OutOfBounds`] if the range does not fit.
    pub fn write_slice(&mut self, address: u64, data: &[u8]) -> SimResult<()> {
        let start = usize::try_from(address).map_err(|_| self.out_of_bounds(address))?;
        let end = start
            .checked_add(data.len())
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| self.out_of_bounds(address.saturating_add(data.len() as u64)))?;
        self.data[start..end].copy_from_slice(data);
        Ok(())
    }
}

/// Copies `size` bytes from `source[src_addr..]` into `dest[dst_addr..]`.
///
/// # Errors
///
/// [`SimError::OutOfBounds`] if either range does not fit its buffer. The
/// destination is left untouched in that case.
pub fn copy_block(
    source: &Memory,
    dest: &mut Memory,
    src_addr: u64,
    dst_addr: u64,
    size: usize,
) -> SimResult<()> {
    let block = source.read_slice(src_addr, size)?;
    dest.write_slice(dst_addr, block)
}
