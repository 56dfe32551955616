//! Physical RAM.
//!
//! A single contiguous `Vec<u8>` mapped at a configurable base address.
//! Accesses may be unaligned; they only have to stay inside the region.

use std::ops::Range;

use crate::common::error::{AccessKind, MemoryFault};
use crate::config::MemoryConfig;
use crate::soc::traits::MemoryBus;

/// Flat little-endian RAM.
#[derive(Clone, PartialEq, Eq)]
pub struct Memory {
    /// Backing bytes, zero-initialised.
    data: Vec<u8>,
    /// Physical address of `data[0]`.
    base: u64,
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory")
            .field("base", &format_args!("{:#x}", self.base))
            .field("size", &self.data.len())
            .finish()
    }
}

impl Memory {
    /// Creates zeroed RAM of `size` bytes at `base`.
    pub fn new(base: u64, size: usize) -> Self {
        Self {
            data: vec![0; size],
            base,
        }
    }

    /// Creates RAM from a validated memory configuration.
    pub fn from_config(config: &MemoryConfig) -> Self {
        Self::new(config.ram_base, config.ram_size)
    }

    /// Base address.
    pub const fn base(&self) -> u64 {
        self.base
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// One past the last mapped address.
    pub fn end(&self) -> u64 {
        self.base + self.data.len() as u64
    }

    /// Maps an access onto an index range of the backing store.
    fn span(&self, addr: u64, size: u64, kind: AccessKind) -> Result<Range<usize>, MemoryFault> {
        let fault = MemoryFault { addr, size, kind };
        let offset = addr.checked_sub(self.base).ok_or(fault)?;
        let end = offset.checked_add(size).ok_or(fault)?;
        if end > self.data.len() as u64 {
            return Err(fault);
        }
        Ok(offset as usize..end as usize)
    }

    fn read_array<const N: usize>(&self, addr: u64) -> Result<[u8; N], MemoryFault> {
        let span = self.span(addr, N as u64, AccessKind::Load)?;
        let mut out = [0; N];
        out.copy_from_slice(&self.data[span]);
        Ok(out)
    }

    fn write_array<const N: usize>(&mut self, addr: u64, bytes: [u8; N]) -> Result<(), MemoryFault> {
        let span = self.span(addr, N as u64, AccessKind::Store)?;
        self.data[span].copy_from_slice(&bytes);
        Ok(())
    }
}

impl MemoryBus for Memory {
    fn contains(&self, addr: u64, size: u64) -> bool {
        self.span(addr, size, AccessKind::Load).is_ok()
    }

    fn read_u8(&self, addr: u64) -> Result<u8, MemoryFault> {
        self.read_array::<1>(addr).map(|b| b[0])
    }

    fn read_u16(&self, addr: u64) -> Result<u16, MemoryFault> {
        self.read_array(addr).map(u16::from_le_bytes)
    }

    fn read_u32(&self, addr: u64) -> Result<u32, MemoryFault> {
        self.read_array(addr).map(u32::from_le_bytes)
    }

    fn read_u64(&self, addr: u64) -> Result<u64, MemoryFault> {
        self.read_array(addr).map(u64::from_le_bytes)
    }

    fn write_u8(&mut self, addr: u64, val: u8) -> Result<(), MemoryFault> {
        self.write_array(addr, [val])
    }

    fn write_u16(&mut self, addr: u64, val: u16) -> Result<(), MemoryFault> {
        self.write_array(addr, val.to_le_bytes())
    }

    fn write_u32(&mut self, addr: u64, val: u32) -> Result<(), MemoryFault> {
        self.write_array(addr, val.to_le_bytes())
    }

    fn write_u64(&mut self, addr: u64, val: u64) -> Result<(), MemoryFault> {
        self.write_array(addr, val.to_le_bytes())
    }

    fn read_bytes(&self, addr: u64, len: u64) -> Result<Vec<u8>, MemoryFault> {
        let span = self.span(addr, len, AccessKind::Load)?;
        Ok(self.data[span].to_vec())
    }

    fn write_bytes(&mut self, addr: u64, data: &[u8]) -> Result<(), MemoryFault> {
        let span = self.span(addr, data.len() as u64, AccessKind::Store)?;
        self.data[span].copy_from_slice(data);
        Ok(())
    }
}
