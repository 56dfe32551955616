//! Compressed instruction expansion.
//!
//! Converts a 16-bit RVC encoding into the 32-bit word with the same effect.
//! Reserved encodings and the floating-point forms yield
//! [`DecodeError::IllegalCompressed`].

use super::constants::{CREG_BASE, QUADRANT_0, QUADRANT_1, QUADRANT_2, q0, q1, q2};
use crate::common::error::DecodeError;
use crate::isa::abi::{REG_RA, REG_SP, REG_ZERO};
use crate::isa::privileged::opcodes::EBREAK;
use crate::isa::rv64i::funct3::{alu, branch, load, store};
use crate::isa::rv64i::{funct3, funct7, opcodes};

/// Expands a 16-bit RVC instruction into its 32-bit equivalent.
///
/// # Errors
///
/// Returns [`DecodeError::IllegalCompressed`] for reserved encodings (including
/// the all-zero half-word), floating-point forms and quadrant 3, which is not a
/// compressed encoding at all.
pub fn expand(inst: u16) -> Result<u32, DecodeError> {
    let illegal = DecodeError::IllegalCompressed(inst);
    let c = u32::from(inst);
    let f3 = (inst >> 13) & 0x7;

    let word = match (inst & 0x3, f3) {
        (QUADRANT_0, q0::C_ADDI4SPN) => {
            let imm = bits(c, 6, 1) << 2 | bits(c, 5, 1) << 3 | bits(c, 11, 2) << 4 | bits(c, 7, 4) << 6;
            if imm == 0 {
                return Err(illegal);
            }
            enc_i(imm as i32, REG_SP as u32, alu::ADD_SUB, creg(c, 2), opcodes::OP_IMM)
        }
        (QUADRANT_0, q0::C_LW) => {
            let imm = word_offset(c);
            enc_i(imm as i32, creg(c, 7), load::LW, creg(c, 2), opcodes::OP_LOAD)
        }
        (QUADRANT_0, q0::C_LD) => {
            let imm = double_offset(c);
            enc_i(imm as i32, creg(c, 7), load::LD, creg(c, 2), opcodes::OP_LOAD)
        }
        (QUADRANT_0, q0::C_SW) => {
            let imm = word_offset(c);
            enc_s(imm as i32, creg(c, 2), creg(c, 7), store::SW)
        }
        (QUADRANT_0, q0::C_SD) => {
            let imm = double_offset(c);
            enc_s(imm as i32, creg(c, 2), creg(c, 7), store::SD)
        }

        (QUADRANT_1, q1::C_ADDI) => {
            let rd = bits(c, 7, 5);
            enc_i(imm6(c), rd, alu::ADD_SUB, rd, opcodes::OP_IMM)
        }
        (QUADRANT_1, q1::C_ADDIW) => {
            let rd = bits(c, 7, 5);
            if rd == REG_ZERO as u32 {
                return Err(illegal);
            }
            enc_i(imm6(c), rd, alu::ADD_SUB, rd, opcodes::OP_IMM_32)
        }
        (QUADRANT_1, q1::C_LI) => {
            let rd = bits(c, 7, 5);
            enc_i(imm6(c), REG_ZERO as u32, alu::ADD_SUB, rd, opcodes::OP_IMM)
        }
        (QUADRANT_1, q1::C_LUI_ADDI16SP) => {
            let rd = bits(c, 7, 5);
            if rd == REG_SP as u32 {
                let imm = sign_extend(
                    bits(c, 6, 1) << 4
                        | bits(c, 2, 1) << 5
                        | bits(c, 5, 1) << 6
                        | bits(c, 3, 2) << 7
                        | bits(c, 12, 1) << 9,
                    10,
                );
                if imm == 0 {
                    return Err(illegal);
                }
                enc_i(imm, REG_SP as u32, alu::ADD_SUB, REG_SP as u32, opcodes::OP_IMM)
            } else {
                let imm = imm6(c);
                if imm == 0 {
                    return Err(illegal);
                }
                ((imm as u32) << 12) | (rd << 7) | opcodes::OP_LUI
            }
        }
        (QUADRANT_1, q1::C_MISC_ALU) => {
            let rd = creg(c, 7);
            match bits(c, 10, 2) {
                0 => enc_i(shamt6(c) as i32, rd, alu::SRL_SRA, rd, opcodes::OP_IMM),
                1 => {
                    (funct7::ALT << 25) | enc_i(shamt6(c) as i32, rd, alu::SRL_SRA, rd, opcodes::OP_IMM)
                }
                2 => enc_i(imm6(c), rd, alu::AND, rd, opcodes::OP_IMM),
                _ => {
                    let rs2 = creg(c, 2);
                    let (f7, f3, opcode) = match (bits(c, 12, 1), bits(c, 5, 2)) {
                        (0, 0) => (funct7::ALT, alu::ADD_SUB, opcodes::OP_REG),
                        (0, 1) => (funct7::BASE, alu::XOR, opcodes::OP_REG),
                        (0, 2) => (funct7::BASE, alu::OR, opcodes::OP_REG),
                        (0, 3) => (funct7::BASE, alu::AND, opcodes::OP_REG),
                        (1, 0) => (funct7::ALT, alu::ADD_SUB, opcodes::OP_REG_32),
                        (1, 1) => (funct7::BASE, alu::ADD_SUB, opcodes::OP_REG_32),
                        _ => return Err(illegal),
                    };
                    enc_r(f7, rs2, rd, f3, rd, opcode)
                }
            }
        }
        (QUADRANT_1, q1::C_J) => {
            let offset = sign_extend(
                bits(c, 3, 3) << 1
                    | bits(c, 11, 1) << 4
                    | bits(c, 2, 1) << 5
                    | bits(c, 7, 1) << 6
                    | bits(c, 6, 1) << 7
                    | bits(c, 9, 2) << 8
                    | bits(c, 8, 1) << 10
                    | bits(c, 12, 1) << 11,
                12,
            );
            enc_j(offset, REG_ZERO as u32)
        }
        (QUADRANT_1, q1::C_BEQZ | q1::C_BNEZ) => {
            let offset = sign_extend(
                bits(c, 3, 2) << 1
                    | bits(c, 10, 2) << 3
                    | bits(c, 2, 1) << 5
                    | bits(c, 5, 2) << 6
                    | bits(c, 12, 1) << 8,
                9,
            );
            let f3 = if f3 == q1::C_BEQZ { branch::BEQ } else { branch::BNE };
            enc_b(offset, REG_ZERO as u32, creg(c, 7), f3)
        }

        (QUADRANT_2, q2::C_SLLI) => {
            let rd = bits(c, 7, 5);
            enc_i(shamt6(c) as i32, rd, alu::SLL, rd, opcodes::OP_IMM)
        }
        (QUADRANT_2, q2::C_LWSP) => {
            let rd = bits(c, 7, 5);
            if rd == REG_ZERO as u32 {
                return Err(illegal);
            }
            let imm = bits(c, 12, 1) << 5 | bits(c, 4, 3) << 2 | bits(c, 2, 2) << 6;
            enc_i(imm as i32, REG_SP as u32, load::LW, rd, opcodes::OP_LOAD)
        }
        (QUADRANT_2, q2::C_LDSP) => {
            let rd = bits(c, 7, 5);
            if rd == REG_ZERO as u32 {
                return Err(illegal);
            }
            let imm = bits(c, 12, 1) << 5 | bits(c, 5, 2) << 3 | bits(c, 2, 3) << 6;
            enc_i(imm as i32, REG_SP as u32, load::LD, rd, opcodes::OP_LOAD)
        }
        (QUADRANT_2, q2::C_MISC_ALU) => {
            let rs1 = bits(c, 7, 5);
            let rs2 = bits(c, 2, 5);
            match (bits(c, 12, 1), rs1, rs2) {
                // C.JR
                (0, 0, 0) => return Err(illegal),
                (0, _, 0) => enc_i(0, rs1, funct3::JALR, REG_ZERO as u32, opcodes::OP_JALR),
                // C.MV
                (0, _, _) => enc_r(funct7::BASE, rs2, REG_ZERO as u32, alu::ADD_SUB, rs1, opcodes::OP_REG),
                (_, 0, 0) => EBREAK,
                // C.JALR
                (_, _, 0) => enc_i(0, rs1, funct3::JALR, REG_RA as u32, opcodes::OP_JALR),
                // C.ADD
                _ => enc_r(funct7::BASE, rs2, rs1, alu::ADD_SUB, rs1, opcodes::OP_REG),
            }
        }
        (QUADRANT_2, q2::C_SWSP) => {
            let imm = bits(c, 9, 4) << 2 | bits(c, 7, 2) << 6;
            enc_s(imm as i32, bits(c, 2, 5), REG_SP as u32, store::SW)
        }
        (QUADRANT_2, q2::C_SDSP) => {
            let imm = bits(c, 10, 3) << 3 | bits(c, 7, 3) << 6;
            enc_s(imm as i32, bits(c, 2, 5), REG_SP as u32, store::SD)
        }

        _ => return Err(illegal),
    };
    Ok(word)
}

/// Extracts `len` bits of `c` starting at bit `lo`.
#[inline(always)]
const fn bits(c: u32, lo: u32, len: u32) -> u32 {
    (c >> lo) & ((1 << len) - 1)
}

/// Register from a 3-bit field at `lo`, mapped into x8-x15.
#[inline(always)]
const fn creg(c: u32, lo: u32) -> u32 {
    CREG_BASE + bits(c, lo, 3)
}

/// Sign-extended 6-bit immediate `imm[5] = bit 12, imm[4:0] = bits 6:2`.
const fn imm6(c: u32) -> i32 {
    sign_extend(shamt6(c), 6)
}

/// Unsigned 6-bit field `bit 12 : bits 6:2`.
const fn shamt6(c: u32) -> u32 {
    bits(c, 12, 1) << 5 | bits(c, 2, 5)
}

/// Word-scaled offset of C.LW / C.SW.
const fn word_offset(c: u32) -> u32 {
    bits(c, 6, 1) << 2 | bits(c, 10, 3) << 3 | bits(c, 5, 1) << 6
}

/// Double-word-scaled offset of C.LD / C.SD.
const fn double_offset(c: u32) -> u32 {
    bits(c, 10, 3) << 3 | bits(c, 5, 2) << 6
}

const fn enc_i(imm: i32, rs1: u32, f3: u32, rd: u32, opcode: u32) -> u32 {
    ((imm as u32 & 0xFFF) << 20) | (rs1 << 15) | (f3 << 12) | (rd << 7) | opcode
}

const fn enc_s(imm: i32, rs2: u32, rs1: u32, f3: u32) -> u32 {
    let imm = imm as u32;
    (((imm >> 5) & 0x7F) << 25)
        | (rs2 << 20)
        | (rs1 << 15)
        | (f3 << 12)
        | ((imm & 0x1F) << 7)
        | opcodes::OP_STORE
}

const fn enc_r(f7: u32, rs2: u32, rs1: u32, f3: u32, rd: u32, opcode: u32) -> u32 {
    (f7 << 25) | (rs2 << 20) | (rs1 << 15) | (f3 << 12) | (rd << 7) | opcode
}

const fn enc_b(offset: i32, rs2: u32, rs1: u32, f3: u32) -> u32 {
    let o = offset as u32;
    (((o >> 12) & 1) << 31)
        | (((o >> 5) & 0x3F) << 25)
        | (rs2 << 20)
        | (rs1 << 15)
        | (f3 << 12)
        | (((o >> 1) & 0xF) << 8)
        | (((o >> 11) & 1) << 7)
        | opcodes::OP_BRANCH
}

const fn enc_j(offset: i32, rd: u32) -> u32 {
    let o = offset as u32;
    (((o >> 20) & 1) << 31)
        | (((o >> 1) & 0x3FF) << 21)
        | (((o >> 11) & 1) << 20)
        | (((o >> 12) & 0xFF) << 12)
        | (rd << 7)
        | opcodes::OP_JAL
}

/// Sign-extends the low `bits` of `val`.
const fn sign_extend(val: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((val << shift) as i32) >> shift
}
