//! Memory subsystem.
//!
//! The simulated machine has a single flat RAM region. This module provides:
//! 1. **Traits:** `MemoryBus`, the access interface used by fetch, the LSU,
//!    host calls and the program loader.
//! 2. **Memory:** The RAM device itself.

/// Flat RAM device.
pub mod memory;

/// Memory access trait.
pub mod traits;

pub use memory::Memory;
pub use traits::MemoryBus;
