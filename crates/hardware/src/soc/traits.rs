//! Memory access trait.
//!
//! This module defines the `MemoryBus` trait implemented by RAM. It provides:
//! 1. **Bounds:** `contains` for range checks before an access.
//! 2. **Access:** Byte, half, word and double-word little-endian reads and writes.
//! 3. **Bulk:** Slice reads and writes for host calls and image loading.
//!
//! Reads take `&self`; a load never changes memory state. Every access
//! outside the mapped range returns a [`MemoryFault`] instead of panicking.

use crate::common::error::{AccessKind, MemoryFault};

/// Byte-addressable, little-endian memory.
pub trait MemoryBus {
    /// True if `[addr, addr + size)` lies entirely inside mapped memory.
    fn contains(&self, addr: u64, size: u64) -> bool;

    /// Reads one byte.
    ///
    /// # Errors
    ///
    /// [`MemoryFault`] when the byte is unmapped.
    fn read_u8(&self, addr: u64) -> Result<u8, MemoryFault>;
    /// Reads two bytes.
    ///
    /// # Errors
    ///
    /// [`MemoryFault`] when any byte is unmapped.
    fn read_u16(&self, addr: u64) -> Result<u16, MemoryFault>;
    /// Reads four bytes.
    ///
    /// # Errors
    ///
    /// [`MemoryFault`] when any byte is unmapped.
    fn read_u32(&self, addr: u64) -> Result<u32, MemoryFault>;
    /// Reads eight bytes.
    ///
    /// # Errors
    ///
    /// [`MemoryFault`] when any byte is unmapped.
    fn read_u64(&self, addr: u64) -> Result<u64, MemoryFault>;

    /// Writes one byte.
    ///
    /// # Errors
    ///
    /// [`MemoryFault`] when the byte is unmapped.
    fn write_u8(&mut self, addr: u64, val: u8) -> Result<(), MemoryFault>;
    /// Writes two bytes.
    ///
    /// # Errors
    ///
    /// [`MemoryFault`] when any byte is unmapped.
    fn write_u16(&mut self, addr: u64, val: u16) -> Result<(), MemoryFault>;
    /// Writes four bytes.
    ///
    /// # Errors
    ///
    /// [`MemoryFault`] when any byte is unmapped.
    fn write_u32(&mut self, addr: u64, val: u32) -> Result<(), MemoryFault>;
    /// Writes eight bytes.
    ///
    /// # Errors
    ///
    /// [`MemoryFault`] when any byte is unmapped.
    fn write_u64(&mut self, addr: u64, val: u64) -> Result<(), MemoryFault>;

    /// Reads `len` bytes starting at `addr` (default: byte by byte).
    ///
    /// # Errors
    ///
    /// [`MemoryFault`] covering the whole request when any byte is unmapped.
    fn read_bytes(&self, addr: u64, len: u64) -> Result<Vec<u8>, MemoryFault> {
        if !self.contains(addr, len) {
            return Err(MemoryFault {
                addr,
                size: len,
                kind: AccessKind::Load,
            });
        }
        (0..len).map(|i| self.read_u8(addr + i)).collect()
    }

    /// Writes `data` starting at `addr` (default: byte by byte).
    ///
    /// # Errors
    ///
    /// [`MemoryFault`] covering the whole request when any byte is unmapped;
    /// nothing is written in that case.
    fn write_bytes(&mut self, addr: u64, data: &[u8]) -> Result<(), MemoryFault> {
        if !self.contains(addr, data.len() as u64) {
            return Err(MemoryFault {
                addr,
                size: data.len() as u64,
                kind: AccessKind::Store,
            });
        }
        for (i, byte) in data.iter().enumerate() {
            self.write_u8(addr + i as u64, *byte)?;
        }
        Ok(())
    }
}
