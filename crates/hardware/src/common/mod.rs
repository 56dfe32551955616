//! Common types shared across the simulator.
//!
//! This module provides the building blocks used by every other layer:
//! 1. **Constants:** Instruction sizes, field masks and architectural limits.
//! 2. **Error Handling:** The decode/memory/configuration error taxonomy.
//! 3. **Register Management:** The general-purpose register file.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error taxonomy and the top-level `SimError`.
pub mod error;

/// General-purpose register file.
pub mod reg;

pub use error::{
    AccessKind, ConfigurationError, DecodeError, Fault, MemoryFault, SimError, SimResult,
};
pub use reg::RegisterFile;
