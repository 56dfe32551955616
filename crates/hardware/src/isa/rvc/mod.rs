//! RISC-V Compressed Extension (C).
//!
//! 16-bit encodings are expanded into the equivalent 32-bit word at fetch,
//! so every later stage sees a single encoding. Only the integer forms are
//! legal here; compressed floating-point loads and stores are rejected.
//!
//! # Structure
//!
//! - `constants`: Quadrant and funct3 definitions.
//! - `expand`: 16-bit to 32-bit expansion.

/// Compressed instruction quadrant and funct3 constants.
pub mod constants;

/// Expansion of 16-bit encodings into 32-bit equivalents.
pub mod expand;

pub use expand::expand;
