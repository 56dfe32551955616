//! RISC-V Compressed (C) Extension constants.
//!
//! Compressed encodings are split into three quadrants by bits 1-0, then by
//! the funct3 field in bits 15-13.

/// Quadrant 0 (bits 1:0 = 00).
pub const QUADRANT_0: u16 = 0b00;
/// Quadrant 1 (bits 1:0 = 01).
pub const QUADRANT_1: u16 = 0b01;
/// Quadrant 2 (bits 1:0 = 10).
pub const QUADRANT_2: u16 = 0b10;

/// Base of the register window addressed by 3-bit `rd'`/`rs1'`/`rs2'` fields (x8-x15).
pub const CREG_BASE: u32 = 8;

/// Quadrant 0 funct3 values.
pub mod q0 {
    /// C.ADDI4SPN.
    pub const C_ADDI4SPN: u16 = 0b000;
    /// C.LW.
    pub const C_LW: u16 = 0b010;
    /// C.LD.
    pub const C_LD: u16 = 0b011;
    /// C.SW.
    pub const C_SW: u16 = 0b110;
    /// C.SD.
    pub const C_SD: u16 = 0b111;
}

/// Quadrant 1 funct3 values.
pub mod q1 {
    /// C.ADDI (C.NOP when rd is x0).
    pub const C_ADDI: u16 = 0b000;
    /// C.ADDIW.
    pub const C_ADDIW: u16 = 0b001;
    /// C.LI.
    pub const C_LI: u16 = 0b010;
    /// C.LUI, or C.ADDI16SP when rd is x2.
    pub const C_LUI_ADDI16SP: u16 = 0b011;
    /// C.SRLI, C.SRAI, C.ANDI and the register-register group.
    pub const C_MISC_ALU: u16 = 0b100;
    /// C.J.
    pub const C_J: u16 = 0b101;
    /// C.BEQZ.
    pub const C_BEQZ: u16 = 0b110;
    /// C.BNEZ.
    pub const C_BNEZ: u16 = 0b111;
}

/// Quadrant 2 funct3 values.
pub mod q2 {
    /// C.SLLI.
    pub const C_SLLI: u16 = 0b000;
    /// C.LWSP.
    pub const C_LWSP: u16 = 0b010;
    /// C.LDSP.
    pub const C_LDSP: u16 = 0b011;
    /// C.JR, C.MV, C.EBREAK, C.JALR and C.ADD.
    pub const C_MISC_ALU: u16 = 0b100;
    /// C.SWSP.
    pub const C_SWSP: u16 = 0b110;
    /// C.SDSP.
    pub const C_SDSP: u16 = 0b111;
}
