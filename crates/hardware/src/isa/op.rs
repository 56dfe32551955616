//! Operation enumeration and static property table.
//!
//! Every executable operation is a variant of [`Op`]. Its properties (format,
//! class, mnemonic and the [`ControlSignals`] the pipeline needs) live in a
//! single `static` table indexed by the variant, so decoding an instruction
//! reduces to finding its `Op` and the rest is a table lookup.

use std::fmt;

use serde::Serialize;

use crate::core::pipeline::signals::{
    AluOp, BranchCond, ControlSignals, MemWidth, OpASrc, OpBSrc, SystemOp,
};

/// An executable integer operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Op {
    Lui,
    Auipc,
    Jal,
    Jalr,
    Beq,
    Bne,
    Blt,
    Bge,
    Bltu,
    Bgeu,
    Lb,
    Lh,
    Lw,
    Ld,
    Lbu,
    Lhu,
    Lwu,
    Sb,
    Sh,
    Sw,
    Sd,
    Addi,
    Slti,
    Sltiu,
    Xori,
    Ori,
    Andi,
    Slli,
    Srli,
    Srai,
    Add,
    Sub,
    Sll,
    Slt,
    Sltu,
    Xor,
    Srl,
    Sra,
    Or,
    And,
    Addiw,
    Slliw,
    Srliw,
    Sraiw,
    Addw,
    Subw,
    Sllw,
    Srlw,
    Sraw,
    Mul,
    Mulh,
    Mulhsu,
    Mulhu,
    Div,
    Divu,
    Rem,
    Remu,
    Mulw,
    Divw,
    Divuw,
    Remw,
    Remuw,
    Fence,
    Ecall,
    Ebreak,
}

impl Op {
    /// Number of operations; the length of [`OP_TABLE`].
    pub const COUNT: usize = Self::Ebreak as usize + 1;

    /// Static properties of the operation.
    #[inline]
    pub fn info(self) -> &'static OpInfo {
        &OP_TABLE[self as usize]
    }

    /// Assembly mnemonic.
    #[inline]
    pub fn mnemonic(self) -> &'static str {
        self.info().mnemonic
    }

    /// Encoding format.
    #[inline]
    pub fn format(self) -> Format {
        self.info().format
    }

    /// Instruction-mix class.
    #[inline]
    pub fn class(self) -> OpClass {
        self.info().class
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Base encoding format of an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// Register-register.
    R,
    /// Register-immediate, loads and JALR.
    I,
    /// Stores.
    S,
    /// Conditional branches.
    B,
    /// Upper immediate.
    U,
    /// JAL.
    J,
    /// Operand-less system and fence instructions.
    Sys,
}

/// Instruction-mix category reported by the metrics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum OpClass {
    /// Integer ALU, including upper-immediate forms.
    Alu,
    /// Multiply and divide.
    MulDiv,
    /// Loads.
    Load,
    /// Stores.
    Store,
    /// Conditional branches.
    Branch,
    /// JAL and JALR.
    Jump,
    /// ECALL, EBREAK and FENCE.
    System,
}

/// Static properties of one operation.
#[derive(Clone, Copy, Debug)]
pub struct OpInfo {
    /// The operation this row describes.
    pub op: Op,
    /// Assembly mnemonic.
    pub mnemonic: &'static str,
    /// Encoding format.
    pub format: Format,
    /// Instruction-mix class.
    pub class: OpClass,
    /// Pipeline control signals.
    pub ctrl: ControlSignals,
}

const fn row(op: Op, mnemonic: &'static str, format: Format, ctrl: ControlSignals) -> OpInfo {
    let class = if ctrl.mem_read {
        OpClass::Load
    } else if ctrl.mem_write {
        OpClass::Store
    } else if ctrl.branch {
        OpClass::Branch
    } else if ctrl.jump {
        OpClass::Jump
    } else if !matches!(ctrl.system, SystemOp::None) {
        OpClass::System
    } else if matches!(
        ctrl.alu,
        AluOp::Mul
            | AluOp::Mulh
            | AluOp::Mulhsu
            | AluOp::Mulhu
            | AluOp::Div
            | AluOp::Divu
            | AluOp::Rem
            | AluOp::Remu
    ) {
        OpClass::MulDiv
    } else {
        OpClass::Alu
    };
    OpInfo {
        op,
        mnemonic,
        format,
        class,
        ctrl,
    }
}

const fn reg_reg(alu: AluOp) -> ControlSignals {
    ControlSignals {
        reg_write: true,
        alu,
        a_src: OpASrc::Reg1,
        b_src: OpBSrc::Reg2,
        ..ControlSignals::NOP
    }
}

const fn reg_imm(alu: AluOp) -> ControlSignals {
    ControlSignals {
        reg_write: true,
        alu,
        ..ControlSignals::NOP
    }
}

const fn word(mut ctrl: ControlSignals) -> ControlSignals {
    ctrl.is_rv32 = true;
    ctrl
}

const fn upper(a_src: OpASrc) -> ControlSignals {
    ControlSignals {
        reg_write: true,
        a_src,
        ..ControlSignals::NOP
    }
}

const fn load(width: MemWidth, signed_load: bool) -> ControlSignals {
    ControlSignals {
        reg_write: true,
        mem_read: true,
        width,
        signed_load,
        ..ControlSignals::NOP
    }
}

const fn store(width: MemWidth) -> ControlSignals {
    ControlSignals {
        mem_write: true,
        width,
        ..ControlSignals::NOP
    }
}

const fn branch(cond: BranchCond) -> ControlSignals {
    ControlSignals {
        branch: true,
        cond,
        b_src: OpBSrc::Reg2,
        ..ControlSignals::NOP
    }
}

const fn jump(a_src: OpASrc) -> ControlSignals {
    ControlSignals {
        reg_write: true,
        jump: true,
        a_src,
        ..ControlSignals::NOP
    }
}

const fn system(system: SystemOp) -> ControlSignals {
    ControlSignals {
        a_src: OpASrc::Zero,
        b_src: OpBSrc::Zero,
        system,
        ..ControlSignals::NOP
    }
}

/// Properties of every [`Op`], indexed by `op as usize`.
pub static OP_TABLE: [OpInfo; Op::COUNT] = {
    use AluOp as A;
    use Format::{B, I, J, R, S, Sys, U};
    use MemWidth as W;

    [
        row(Op::Lui, "lui", U, upper(OpASrc::Zero)),
        row(Op::Auipc, "auipc", U, upper(OpASrc::Pc)),
        row(Op::Jal, "jal", J, jump(OpASrc::Pc)),
        row(Op::Jalr, "jalr", I, jump(OpASrc::Reg1)),
        row(Op::Beq, "beq", B, branch(BranchCond::Eq)),
        row(Op::Bne, "bne", B, branch(BranchCond::Ne)),
        row(Op::Blt, "blt", B, branch(BranchCond::Lt)),
        row(Op::Bge, "bge", B, branch(BranchCond::Ge)),
        row(Op::Bltu, "bltu", B, branch(BranchCond::Ltu)),
        row(Op::Bgeu, "bgeu", B, branch(BranchCond::Geu)),
        row(Op::Lb, "lb", I, load(W::Byte, true)),
        row(Op::Lh, "lh", I, load(W::Half, true)),
        row(Op::Lw, "lw", I, load(W::Word, true)),
        row(Op::Ld, "ld", I, load(W::Double, true)),
        row(Op::Lbu, "lbu", I, load(W::Byte, false)),
        row(Op::Lhu, "lhu", I, load(W::Half, false)),
        row(Op::Lwu, "lwu", I, load(W::Word, false)),
        row(Op::Sb, "sb", S, store(W::Byte)),
        row(Op::Sh, "sh", S, store(W::Half)),
        row(Op::Sw, "sw", S, store(W::Word)),
        row(Op::Sd, "sd", S, store(W::Double)),
        row(Op::Addi, "addi", I, reg_imm(A::Add)),
        row(Op::Slti, "slti", I, reg_imm(A::Slt)),
        row(Op::Sltiu, "sltiu", I, reg_imm(A::Sltu)),
        row(Op::Xori, "xori", I, reg_imm(A::Xor)),
        row(Op::Ori, "ori", I, reg_imm(A::Or)),
        row(Op::Andi, "andi", I, reg_imm(A::And)),
        row(Op::Slli, "slli", I, reg_imm(A::Sll)),
        row(Op::Srli, "srli", I, reg_imm(A::Srl)),
        row(Op::Srai, "srai", I, reg_imm(A::Sra)),
        row(Op::Add, "add", R, reg_reg(A::Add)),
        row(Op::Sub, "sub", R, reg_reg(A::Sub)),
        row(Op::Sll, "sll", R, reg_reg(A::Sll)),
        row(Op::Slt, "slt", R, reg_reg(A::Slt)),
        row(Op::Sltu, "sltu", R, reg_reg(A::Sltu)),
        row(Op::Xor, "xor", R, reg_reg(A::Xor)),
        row(Op::Srl, "srl", R, reg_reg(A::Srl)),
        row(Op::Sra, "sra", R, reg_reg(A::Sra)),
        row(Op::Or, "or", R, reg_reg(A::Or)),
        row(Op::And, "and", R, reg_reg(A::And)),
        row(Op::Addiw, "addiw", I, word(reg_imm(A::Add))),
        row(Op::Slliw, "slliw", I, word(reg_imm(A::Sll))),
        row(Op::Srliw, "srliw", I, word(reg_imm(A::Srl))),
        row(Op::Sraiw, "sraiw", I, word(reg_imm(A::Sra))),
        row(Op::Addw, "addw", R, word(reg_reg(A::Add))),
        row(Op::Subw, "subw", R, word(reg_reg(A::Sub))),
        row(Op::Sllw, "sllw", R, word(reg_reg(A::Sll))),
        row(Op::Srlw, "srlw", R, word(reg_reg(A::Srl))),
        row(Op::Sraw, "sraw", R, word(reg_reg(A::Sra))),
        row(Op::Mul, "mul", R, reg_reg(A::Mul)),
        row(Op::Mulh, "mulh", R, reg_reg(A::Mulh)),
        row(Op::Mulhsu, "mulhsu", R, reg_reg(A::Mulhsu)),
        row(Op::Mulhu, "mulhu", R, reg_reg(A::Mulhu)),
        row(Op::Div, "div", R, reg_reg(A::Div)),
        row(Op::Divu, "divu", R, reg_reg(A::Divu)),
        row(Op::Rem, "rem", R, reg_reg(A::Rem)),
        row(Op::Remu, "remu", R, reg_reg(A::Remu)),
        row(Op::Mulw, "mulw", R, word(reg_reg(A::Mul))),
        row(Op::Divw, "divw", R, word(reg_reg(A::Div))),
        row(Op::Divuw, "divuw", R, word(reg_reg(A::Divu))),
        row(Op::Remw, "remw", R, word(reg_reg(A::Rem))),
        row(Op::Remuw, "remuw", R, word(reg_reg(A::Remu))),
        row(Op::Fence, "fence", Sys, system(SystemOp::Fence)),
        row(Op::Ecall, "ecall", Sys, system(SystemOp::Ecall)),
        row(Op::Ebreak, "ebreak", Sys, system(SystemOp::Ebreak)),
    ]
};
