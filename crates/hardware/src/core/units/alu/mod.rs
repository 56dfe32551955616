//! Arithmetic Logic Unit (ALU).
//!
//! Integer ALU used by the Execute stage and by the sequential reference
//! model, so both compute every result with the same code.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub and the M extension (Mul*, Div*, Rem*)
//! - [`logic`]:      Or, And, Xor, Slt, Sltu
//! - [`shifts`]:     Sll, Srl, Sra

/// Integer arithmetic operations (add, subtract, multiply, divide).
pub mod arithmetic;

/// Bitwise logical and comparison operations.
pub mod logic;

/// Shift operations.
pub mod shifts;

use crate::core::pipeline::signals::AluOp;

/// Integer ALU.
#[derive(Debug, Clone, Copy)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// With `is32` set the operation is the word (`*W`) form: inputs are
    /// truncated to 32 bits and the result is sign-extended from bit 31.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvwide_core::core::units::alu::Alu;
    /// use rvwide_core::core::pipeline::signals::AluOp;
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 42, 8, false), 50);
    /// assert_eq!(Alu::execute(AluOp::Add, 0x7FFF_FFFF, 1, true), 0xFFFF_FFFF_8000_0000);
    /// assert_eq!(Alu::execute(AluOp::Slt, -5_i64 as u64, 10, false), 1);
    /// assert_eq!(Alu::execute(AluOp::Div, 7, 0, false), u64::MAX);
    /// ```
    pub const fn execute(op: AluOp, a: u64, b: u64, is32: bool) -> u64 {
        match op {
            AluOp::Add => arithmetic::add(a, b, is32),
            AluOp::Sub => arithmetic::sub(a, b, is32),
            AluOp::Mul => arithmetic::mul(a, b, is32),
            AluOp::Mulh => arithmetic::mulh(a, b),
            AluOp::Mulhsu => arithmetic::mulhsu(a, b),
            AluOp::Mulhu => arithmetic::mulhu(a, b),
            AluOp::Div => arithmetic::div(a, b, is32),
            AluOp::Divu => arithmetic::divu(a, b, is32),
            AluOp::Rem => arithmetic::rem(a, b, is32),
            AluOp::Remu => arithmetic::remu(a, b, is32),
            AluOp::Or => a | b,
            AluOp::And => a & b,
            AluOp::Xor => a ^ b,
            AluOp::Slt => logic::slt(a, b),
            AluOp::Sltu => logic::sltu(a, b),
            AluOp::Sll => shifts::sll(a, b, is32),
            AluOp::Srl => shifts::srl(a, b, is32),
            AluOp::Sra => shifts::sra(a, b, is32),
        }
    }
}

/// Sign-extends the low 32 bits of `v` to 64 bits.
#[inline(always)]
pub(crate) const fn sext32(v: u64) -> u64 {
    v as i32 as i64 as u64
}
