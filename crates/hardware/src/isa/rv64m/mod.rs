//! RISC-V Multiply/Divide Extension (M).
//!
//! M operations share `OP_REG` / `OP_REG_32` with the base set and are
//! selected by `funct7 == M_EXTENSION`.

/// Function codes identifying each multiply/divide operation.
pub mod funct3;
/// The funct7 selector of the extension.
pub mod opcodes;
