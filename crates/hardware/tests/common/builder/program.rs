//! Program image builder.
//!
//! Assembles a mix of 32-bit and compressed instructions into a
//! [`Program`] at the default RAM base, with helpers for the host-call
//! epilogues most tests end with.

use rvwide_core::sim::loader::Program;

use super::instruction::{addi, ecall};

/// Default load address, the RAM base of `Config::default()`.
pub const BASE: u64 = 0x8000_0000;

const REG_A0: u32 = 10;
const REG_A7: u32 = 17;
const SYS_EXIT: i32 = 93;

/// Fluent image builder.
#[derive(Debug, Default, Clone)]
pub struct ProgramBuilder {
    bytes: Vec<u8>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one 32-bit instruction.
    pub fn inst(mut self, word: u32) -> Self {
        self.bytes.extend_from_slice(&word.to_le_bytes());
        self
    }

    /// Appends 32-bit instructions.
    pub fn insts(mut self, words: &[u32]) -> Self {
        for w in words {
            self.bytes.extend_from_slice(&w.to_le_bytes());
        }
        self
    }

    /// Appends one compressed instruction.
    pub fn compressed(mut self, half: u16) -> Self {
        self.bytes.extend_from_slice(&half.to_le_bytes());
        self
    }

    /// Appends raw data bytes.
    pub fn data(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    /// Appends `exit(a0)`.
    pub fn exit(self) -> Self {
        self.inst(addi(REG_A7, 0, SYS_EXIT)).inst(ecall())
    }

    /// Appends `exit(code)`.
    pub fn exit_with(self, code: i32) -> Self {
        self.inst(addi(REG_A0, 0, code)).exit()
    }

    /// Address of the next appended byte.
    pub fn here(&self) -> u64 {
        BASE + self.bytes.len() as u64
    }

    /// Byte offset of the next appended byte.
    pub fn offset(&self) -> i32 {
        self.bytes.len() as i32
    }

    pub fn build(self) -> Program {
        Program::from_bytes(BASE, self.bytes)
    }
}

/// Program of 32-bit words followed by `exit(a0)`.
pub fn program(words: &[u32]) -> Program {
    ProgramBuilder::new().insts(words).exit().build()
}
