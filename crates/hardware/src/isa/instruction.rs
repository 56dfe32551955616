//! Instruction field extraction.
//!
//! Provides the [`InstructionBits`] trait, which pulls register indices,
//! function codes and sign-extended immediates out of a 32-bit word for
//! every base format (R, I, S, B, U, J).

use crate::common::constants::{OPCODE_MASK, RD_SHIFT, REG_MASK, RS1_SHIFT, RS2_SHIFT};

/// Bit position of the funct3 field.
const FUNCT3_SHIFT: u32 = 12;
/// Bit mask of the funct3 field after shifting.
const FUNCT3_MASK: u32 = 0x7;
/// Bit position of the funct7 field.
const FUNCT7_SHIFT: u32 = 25;
/// Bit mask of the funct7 field after shifting.
const FUNCT7_MASK: u32 = 0x7F;
/// Bits 31-12 of a U-type word, kept in place.
const U_IMM_MASK: u32 = 0xFFFF_F000;

/// Trait for extracting instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Major opcode (bits 6-0).
    fn opcode(&self) -> u32;

    /// Destination register (bits 11-7).
    fn rd(&self) -> usize;

    /// First source register (bits 19-15).
    fn rs1(&self) -> usize;

    /// Second source register (bits 24-20).
    fn rs2(&self) -> usize;

    /// Minor opcode (bits 14-12).
    fn funct3(&self) -> u32;

    /// Upper selector (bits 31-25).
    fn funct7(&self) -> u32;

    /// I-type immediate: `imm[11:0]` in bits 31-20, sign-extended.
    fn imm_i(&self) -> i64;

    /// S-type immediate: `imm[11:5] | imm[4:0]` split around `rs2`/`rs1`.
    fn imm_s(&self) -> i64;

    /// B-type immediate: a signed, even offset of 13 bits.
    fn imm_b(&self) -> i64;

    /// U-type immediate: bits 31-12 in place, sign-extended from bit 31.
    fn imm_u(&self) -> i64;

    /// J-type immediate: a signed, even offset of 21 bits.
    fn imm_j(&self) -> i64;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> RD_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        ((self >> RS1_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        ((self >> RS2_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> FUNCT3_SHIFT) & FUNCT3_MASK
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        (self >> FUNCT7_SHIFT) & FUNCT7_MASK
    }

    #[inline]
    fn imm_i(&self) -> i64 {
        i64::from((*self as i32) >> 20)
    }

    #[inline]
    fn imm_s(&self) -> i64 {
        let low = (self >> 7) & 0x1F;
        let high = (self >> 25) & 0x7F;
        sign_extend((high << 5) | low, 12)
    }

    #[inline]
    fn imm_b(&self) -> i64 {
        let bit_11 = (self >> 7) & 1;
        let bits_4_1 = (self >> 8) & 0xF;
        let bits_10_5 = (self >> 25) & 0x3F;
        let bit_12 = (self >> 31) & 1;
        sign_extend(
            (bit_12 << 12) | (bit_11 << 11) | (bits_10_5 << 5) | (bits_4_1 << 1),
            13,
        )
    }

    #[inline]
    fn imm_u(&self) -> i64 {
        i64::from((self & U_IMM_MASK) as i32)
    }

    #[inline]
    fn imm_j(&self) -> i64 {
        let bits_19_12 = (self >> 12) & 0xFF;
        let bit_11 = (self >> 20) & 1;
        let bits_10_1 = (self >> 21) & 0x3FF;
        let bit_20 = (self >> 31) & 1;
        sign_extend(
            (bit_20 << 20) | (bits_19_12 << 12) | (bit_11 << 11) | (bits_10_1 << 1),
            21,
        )
    }
}

/// Sign-extends the low `bits` of `val` to 64 bits.
#[inline]
const fn sign_extend(val: u32, bits: u32) -> i64 {
    let shift = 32 - bits;
    (((val << shift) as i32) >> shift) as i64
}
