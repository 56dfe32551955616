//! General-Purpose Register File.
//!
//! This module implements the 32-entry integer register file. It provides:
//! 1. **Storage:** Thirty-two 64-bit registers `x0`-`x31`.
//! 2. **Invariant Enforcement:** `x0` reads as zero and silently discards writes.
//! 3. **Observability:** A copy of the full register state for diffing and a
//!    paired hexadecimal dump through `Display`.

use std::fmt;

use crate::common::constants::NUM_GPRS;

/// General-purpose register file.
///
/// Register `x0` is a sink: writes to it are accepted and dropped, reads
/// always return zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [u64; NUM_GPRS],
}

impl RegisterFile {
    /// Creates a register file with every register cleared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Register `x0` and out-of-range
    ///   indices read as 0.
    #[inline]
    pub fn read(&self, idx: usize) -> u64 {
        if idx == 0 {
            0
        } else {
            self.regs.get(idx).copied().unwrap_or(0)
        }
    }

    /// Writes a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Writes to `x0` are ignored.
    /// * `val` - The 64-bit value to write.
    #[inline]
    pub fn write(&mut self, idx: usize, val: u64) {
        if idx == 0 {
            return;
        }
        if let Some(slot) = self.regs.get_mut(idx) {
            *slot = val;
        }
    }

    /// Returns a copy of all 32 registers, `x0` included.
    pub const fn snapshot(&self) -> [u64; NUM_GPRS] {
        self.regs
    }
}

impl fmt::Display for RegisterFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..NUM_GPRS).step_by(2) {
            writeln!(
                f,
                "x{:<2}={:#018x} x{:<2}={:#018x}",
                i,
                self.regs[i],
                i + 1,
                self.regs[i + 1]
            )?;
        }
        Ok(())
    }
}
