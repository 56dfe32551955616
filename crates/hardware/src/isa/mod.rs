//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the encodings, the operation table and the decoder for the
//! integer subset executed by the pipeline.
//!
//! # Extensions
//!
//! * `rv64i`: Base Integer Instruction Set (64-bit).
//! * `rv64m`: Standard Extension for Integer Multiplication and Division.
//! * `rvc`: Standard Extension for Compressed Instructions (integer forms).
//! * `privileged`: The SYSTEM opcode (ECALL, EBREAK) and host call numbers.

/// Application Binary Interface (ABI) register names and indices.
pub mod abi;

/// Decoding of 32-bit words into [`decode::Decoded`] operations.
pub mod decode;

/// Compact disassembler used by pipeline snapshots and traces.
pub mod disasm;

/// Bit-field extraction for 32-bit instruction words.
pub mod instruction;

/// Operation enumeration and its static property table.
pub mod op;

/// SYSTEM opcode encodings and host call numbers.
pub mod privileged;

/// Base integer instruction set encodings.
pub mod rv64i;

/// Integer multiply/divide extension encodings.
pub mod rv64m;

/// Compressed instruction extension (16-bit encodings).
pub mod rvc;
