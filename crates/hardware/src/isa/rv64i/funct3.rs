//! RISC-V Base Integer (I) function codes (funct3, bits 14-12).
//!
//! The same bit pattern means different things under different major
//! opcodes, so the codes are grouped by the opcode they refine.

/// Codes under `OP_LOAD`.
pub mod load {
    /// Load byte (signed).
    pub const LB: u32 = 0b000;
    /// Load half-word (signed).
    pub const LH: u32 = 0b001;
    /// Load word (signed).
    pub const LW: u32 = 0b010;
    /// Load double-word.
    pub const LD: u32 = 0b011;
    /// Load byte unsigned.
    pub const LBU: u32 = 0b100;
    /// Load half-word unsigned.
    pub const LHU: u32 = 0b101;
    /// Load word unsigned.
    pub const LWU: u32 = 0b110;
}

/// Codes under `OP_STORE`.
pub mod store {
    /// Store byte.
    pub const SB: u32 = 0b000;
    /// Store half-word.
    pub const SH: u32 = 0b001;
    /// Store word.
    pub const SW: u32 = 0b010;
    /// Store double-word.
    pub const SD: u32 = 0b011;
}

/// Codes under `OP_BRANCH`.
pub mod branch {
    /// Branch if equal.
    pub const BEQ: u32 = 0b000;
    /// Branch if not equal.
    pub const BNE: u32 = 0b001;
    /// Branch if less than (signed).
    pub const BLT: u32 = 0b100;
    /// Branch if greater or equal (signed).
    pub const BGE: u32 = 0b101;
    /// Branch if less than (unsigned).
    pub const BLTU: u32 = 0b110;
    /// Branch if greater or equal (unsigned).
    pub const BGEU: u32 = 0b111;
}

/// Codes under `OP_IMM`, `OP_REG` and their 32-bit forms.
pub mod alu {
    /// Add / subtract.
    pub const ADD_SUB: u32 = 0b000;
    /// Shift left logical.
    pub const SLL: u32 = 0b001;
    /// Set less than (signed).
    pub const SLT: u32 = 0b010;
    /// Set less than unsigned.
    pub const SLTU: u32 = 0b011;
    /// Bitwise XOR.
    pub const XOR: u32 = 0b100;
    /// Shift right logical / arithmetic.
    pub const SRL_SRA: u32 = 0b101;
    /// Bitwise OR.
    pub const OR: u32 = 0b110;
    /// Bitwise AND.
    pub const AND: u32 = 0b111;
}

/// Code under `OP_JALR`.
pub const JALR: u32 = 0b000;

/// Code under `OP_MISC_MEM` for FENCE.
pub const FENCE: u32 = 0b000;
