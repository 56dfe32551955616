//! RISC-V Base Integer Instruction Set (I).
//!
//! # Structure
//!
//! - `opcodes`: Major opcodes (bits 6-0).
//! - `funct3`: Minor opcodes, grouped by the major opcode they refine.
//! - `funct7`: Upper selector bits of R-type and shift-immediate encodings.

/// Function code 3 definitions, one submodule per major opcode.
pub mod funct3;
/// Function code 7 definitions.
pub mod funct7;
/// Major opcodes of the base integer set.
pub mod opcodes;
