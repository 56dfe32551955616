//! RISC-V Base Integer (I) function codes (funct7, bits 31-25).

/// Default operation (ADD, SRL, SLL, ...).
pub const BASE: u32 = 0b000_0000;

/// Alternate operation (SUB, SRA).
pub const ALT: u32 = 0b010_0000;

/// Upper six bits of a 64-bit shift-immediate (`imm[11:6]`) for SRAI.
///
/// RV64 shift immediates use a 6-bit shamt, so only bits 31-26 select the
/// operation.
pub const SHIFT_ALT_6: u32 = 0b01_0000;
