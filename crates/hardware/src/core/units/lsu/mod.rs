//! Load/Store Unit (LSU).
//!
//! Width-dispatched accesses over any [`MemoryBus`]. Loads extend their
//! value to 64 bits, sign or zero according to the operation; stores write
//! the low bytes of the value.

use crate::common::error::MemoryFault;
use crate::core::pipeline::signals::MemWidth;
use crate::soc::traits::MemoryBus;

/// Load/Store Unit.
#[derive(Debug, Clone, Copy)]
pub struct Lsu;

impl Lsu {
    /// Loads `width` bytes at `addr`.
    ///
    /// # Errors
    ///
    /// [`MemoryFault`] when any byte is unmapped.
    pub fn load<B: MemoryBus + ?Sized>(
        bus: &B,
        addr: u64,
        width: MemWidth,
        signed: bool,
    ) -> Result<u64, MemoryFault> {
        Ok(match (width, signed) {
            (MemWidth::Nop, _) => 0,
            (MemWidth::Byte, true) => bus.read_u8(addr)? as i8 as i64 as u64,
            (MemWidth::Byte, false) => u64::from(bus.read_u8(addr)?),
            (MemWidth::Half, true) => bus.read_u16(addr)? as i16 as i64 as u64,
            (MemWidth::Half, false) => u64::from(bus.read_u16(addr)?),
            (MemWidth::Word, true) => bus.read_u32(addr)? as i32 as i64 as u64,
            (MemWidth::Word, false) => u64::from(bus.read_u32(addr)?),
            (MemWidth::Double, _) => bus.read_u64(addr)?,
        })
    }

    /// Stores the low `width` bytes of `value` at `addr`.
    ///
    /// # Errors
    ///
    /// [`MemoryFault`] when any byte is unmapped; memory is unchanged then.
    pub fn store<B: MemoryBus + ?Sized>(
        bus: &mut B,
        addr: u64,
        width: MemWidth,
        value: u64,
    ) -> Result<(), MemoryFault> {
        match width {
            MemWidth::Nop => Ok(()),
            MemWidth::Byte => bus.write_u8(addr, value as u8),
            MemWidth::Half => bus.write_u16(addr, value as u16),
            MemWidth::Word => bus.write_u32(addr, value as u32),
            MemWidth::Double => bus.write_u64(addr, value),
        }
    }
}
