//! Error taxonomy for the simulator.
//!
//! This module defines every error the simulator can surface. It provides:
//! 1. **Decode errors:** Unrecognized 32-bit words and illegal compressed half-words.
//! 2. **Memory faults:** Accesses that fall outside the modelled RAM.
//! 3. **Configuration errors:** Parameters rejected before any state is built.
//! 4. **Faults:** Errors attached to an in-flight micro-op, raised only if it retires.
//! 5. **`SimError`:** The single error type that escapes the controller loop.
//!
//! Stalls, flushes and budget exhaustion are ordinary control flow and never
//! appear here.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::sim::loader::LoadError;

/// Kind of memory access, used to label faults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum AccessKind {
    /// Instruction fetch.
    Fetch,
    /// Data load (also used by host calls reading guest buffers).
    Load,
    /// Data store or image load.
    Store,
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fetch => "fetch",
            Self::Load => "load",
            Self::Store => "store",
        })
    }
}

/// The decoder rejected an instruction encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// No operation matches the (opcode, funct3, funct7) combination.
    #[error("unrecognized instruction word {0:#010x}")]
    Unrecognized(u32),
    /// The 16-bit encoding is reserved or uses an unsupported extension.
    #[error("illegal compressed instruction {0:#06x}")]
    IllegalCompressed(u16),
}

impl DecodeError {
    /// Returns the raw encoding that failed to decode, widened to 32 bits.
    pub const fn word(&self) -> u32 {
        match *self {
            Self::Unrecognized(w) => w,
            Self::IllegalCompressed(h) => h as u32,
        }
    }
}

/// An access touched bytes outside the modelled memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("{kind} of {size} bytes at {addr:#x} is outside memory")]
pub struct MemoryFault {
    /// First byte address of the access.
    pub addr: u64,
    /// Access width in bytes.
    pub size: u64,
    /// What kind of access faulted.
    pub kind: AccessKind,
}

impl MemoryFault {
    /// Returns the same fault relabelled with a different access kind.
    pub const fn with_kind(self, kind: AccessKind) -> Self {
        Self { kind, ..self }
    }
}

/// A construction-time parameter was rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigurationError {
    /// Pipeline width outside `1..=32`.
    #[error("pipeline width {0} is outside 1..=32")]
    Width(usize),
    /// Fetch buffer ratio not a finite value in `1.0..=4.0`.
    #[error("fetch buffer ratio {0} must be a finite value in 1.0..=4.0")]
    FetchBufferRatio(f64),
    /// Saturating counter width outside `1..=8`.
    #[error("predictor counter width {0} must be between 1 and 8 bits")]
    CounterBits(u8),
    /// Initial counter value does not fit in the counter width.
    #[error("initial counter value {value} does not fit in {bits} bits")]
    InitialCounter {
        /// Requested initial value.
        value: u8,
        /// Configured counter width.
        bits: u8,
    },
    /// Pattern table index width outside `1..=20`.
    #[error("predictor table index width {0} is outside 1..=20 bits")]
    TableBits(usize),
    /// Global history longer than 63 bits.
    #[error("global history length {0} is outside 1..=63 bits")]
    HistoryBits(usize),
    /// A table size that must be a power of two is not.
    #[error("{name} must be a non-zero power of two, got {value}")]
    NotPowerOfTwo {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: usize,
    },
    /// Return address stack depth of zero.
    #[error("return address stack depth must be non-zero")]
    RasSize,
    /// RAM size of zero or above [`MAX_RAM_SIZE`](crate::common::constants::MAX_RAM_SIZE).
    #[error("memory size {0} is outside 1..=4 GiB")]
    MemorySize(usize),
    /// RAM region wraps the 64-bit address space.
    #[error("memory region at {base:#x} of {size} bytes wraps the address space")]
    MemoryRange {
        /// Configured base address.
        base: u64,
        /// Configured size.
        size: usize,
    },
    /// Max-cycle budget of zero.
    #[error("max cycle budget must be non-zero")]
    CycleBudget,
    /// The configuration document could not be parsed.
    #[error("invalid configuration document: {0}")]
    Parse(String),
}

/// An error carried by an in-flight micro-op.
///
/// Wrong-path micro-ops are squashed together with their fault, so a fault
/// becomes a [`SimError`] only when the micro-op reaches Writeback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Fault {
    /// The fetched word could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// The fetch itself left memory.
    #[error(transparent)]
    Memory(#[from] MemoryFault),
}

impl Fault {
    /// Converts the fault into the error raised when its micro-op retires.
    pub const fn at(self, pc: u64) -> SimError {
        match self {
            Self::Decode(source) => SimError::IllegalInstruction { pc, source },
            Self::Memory(source) => SimError::MemoryFault { pc, source },
        }
    }
}

/// Errors that propagate out of the simulator.
#[derive(Debug, Error)]
pub enum SimError {
    /// A retiring instruction could not be decoded.
    #[error("illegal instruction at pc {pc:#x}: {source}")]
    IllegalInstruction {
        /// Address of the instruction.
        pc: u64,
        /// Decoder diagnosis.
        source: DecodeError,
    },
    /// A retiring instruction accessed memory out of range.
    #[error("memory fault at pc {pc:#x}: {source}")]
    MemoryFault {
        /// Address of the instruction.
        pc: u64,
        /// Faulting access.
        source: MemoryFault,
    },
    /// The configuration was rejected.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// The program image could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Result alias used throughout the simulator.
pub type SimResult<T> = Result<T, SimError>;
