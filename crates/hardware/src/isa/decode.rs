//! RISC-V Instruction Decoder.
//!
//! Maps a 32-bit encoding onto an [`Op`] and extracts the operand fields its
//! format defines. Fields a format does not define are zeroed, so a consumer
//! can treat `rs1 == 0` as "no dependency" without consulting the format.
//! Compressed encodings are expanded by [`crate::isa::rvc`] before they reach
//! this module.

use crate::common::error::DecodeError;
use crate::core::pipeline::signals::ControlSignals;
use crate::isa::instruction::InstructionBits;
use crate::isa::op::{Format, Op, OpInfo};
use crate::isa::privileged::opcodes::{EBREAK, ECALL, OP_SYSTEM};
use crate::isa::rv64i::funct3::{alu, branch, load, store};
use crate::isa::rv64i::{funct3, funct7, opcodes};
use crate::isa::rv64m::funct3 as m;
use crate::isa::rv64m::opcodes::M_EXTENSION;

/// Mask of a 6-bit RV64 shift amount.
const SHAMT_MASK_64: u32 = 0x3F;
/// Mask of a 5-bit RV32/word shift amount.
const SHAMT_MASK_32: u32 = 0x1F;

/// A decoded instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// The 32-bit encoding (compressed forms are already expanded).
    pub raw: u32,
    /// Operation.
    pub op: Op,
    /// Destination register, 0 when the format has none.
    pub rd: usize,
    /// First source register, 0 when the format has none.
    pub rs1: usize,
    /// Second source register, 0 when the format has none.
    pub rs2: usize,
    /// Sign-extended immediate (shift amount for shift-immediates).
    pub imm: i64,
}

impl Decoded {
    /// Static properties of the operation.
    #[inline]
    pub fn info(&self) -> &'static OpInfo {
        self.op.info()
    }

    /// Control signals of the operation.
    #[inline]
    pub fn ctrl(&self) -> ControlSignals {
        self.op.info().ctrl
    }

    /// Assembly mnemonic.
    #[inline]
    pub fn mnemonic(&self) -> &'static str {
        self.op.mnemonic()
    }

    /// Source registers the operation actually reads, `None` when unused or x0.
    pub fn sources(&self) -> [Option<usize>; 2] {
        let ctrl = self.ctrl();
        let pick = |reads: bool, reg: usize| (reads && reg != 0).then_some(reg);
        [
            pick(ctrl.reads_rs1(), self.rs1),
            pick(ctrl.reads_rs2(), self.rs2),
        ]
    }

    /// Destination register when the operation writes a non-zero register.
    pub fn dest(&self) -> Option<usize> {
        (self.ctrl().reg_write && self.rd != 0).then_some(self.rd)
    }
}

/// Decodes a 32-bit instruction word.
///
/// # Errors
///
/// Returns [`DecodeError::Unrecognized`] for any encoding outside RV64IM
/// plus ECALL, EBREAK and FENCE. CSR access and privileged returns are
/// rejected too.
pub fn decode(raw: u32) -> Result<Decoded, DecodeError> {
    let op = identify(raw).ok_or(DecodeError::Unrecognized(raw))?;

    let (rd, rs1, rs2, imm) = match op.format() {
        Format::R => (raw.rd(), raw.rs1(), raw.rs2(), 0),
        Format::I => (raw.rd(), raw.rs1(), 0, immediate_i(op, raw)),
        Format::S => (0, raw.rs1(), raw.rs2(), raw.imm_s()),
        Format::B => (0, raw.rs1(), raw.rs2(), raw.imm_b()),
        Format::U => (raw.rd(), 0, 0, raw.imm_u()),
        Format::J => (raw.rd(), 0, 0, raw.imm_j()),
        Format::Sys => (0, 0, 0, 0),
    };

    Ok(Decoded {
        raw,
        op,
        rd,
        rs1,
        rs2,
        imm,
    })
}

/// I-type immediates, with shift-immediates reduced to their shift amount.
fn immediate_i(op: Op, raw: u32) -> i64 {
    match op {
        Op::Slli | Op::Srli | Op::Srai => i64::from((raw >> 20) & SHAMT_MASK_64),
        Op::Slliw | Op::Srliw | Op::Sraiw => i64::from((raw >> 20) & SHAMT_MASK_32),
        _ => raw.imm_i(),
    }
}

fn identify(raw: u32) -> Option<Op> {
    let f3 = raw.funct3();
    let f7 = raw.funct7();

    let op = match raw.opcode() {
        opcodes::OP_LUI => Op::Lui,
        opcodes::OP_AUIPC => Op::Auipc,
        opcodes::OP_JAL => Op::Jal,
        opcodes::OP_JALR if f3 == funct3::JALR => Op::Jalr,
        opcodes::OP_BRANCH => match f3 {
            branch::BEQ => Op::Beq,
            branch::BNE => Op::Bne,
            branch::BLT => Op::Blt,
            branch::BGE => Op::Bge,
            branch::BLTU => Op::Bltu,
            branch::BGEU => Op::Bgeu,
            _ => return None,
        },
        opcodes::OP_LOAD => match f3 {
            load::LB => Op::Lb,
            load::LH => Op::Lh,
            load::LW => Op::Lw,
            load::LD => Op::Ld,
            load::LBU => Op::Lbu,
            load::LHU => Op::Lhu,
            load::LWU => Op::Lwu,
            _ => return None,
        },
        opcodes::OP_STORE => match f3 {
            store::SB => Op::Sb,
            store::SH => Op::Sh,
            store::SW => Op::Sw,
            store::SD => Op::Sd,
            _ => return None,
        },
        opcodes::OP_IMM => {
            let upper6 = raw >> 26;
            match (f3, upper6) {
                (alu::ADD_SUB, _) => Op::Addi,
                (alu::SLT, _) => Op::Slti,
                (alu::SLTU, _) => Op::Sltiu,
                (alu::XOR, _) => Op::Xori,
                (alu::OR, _) => Op::Ori,
                (alu::AND, _) => Op::Andi,
                (alu::SLL, 0) => Op::Slli,
                (alu::SRL_SRA, 0) => Op::Srli,
                (alu::SRL_SRA, funct7::SHIFT_ALT_6) => Op::Srai,
                _ => return None,
            }
        }
        opcodes::OP_IMM_32 => match (f3, f7) {
            (alu::ADD_SUB, _) => Op::Addiw,
            (alu::SLL, funct7::BASE) => Op::Slliw,
            (alu::SRL_SRA, funct7::BASE) => Op::Srliw,
            (alu::SRL_SRA, funct7::ALT) => Op::Sraiw,
            _ => return None,
        },
        opcodes::OP_REG => match (f7, f3) {
            (funct7::BASE, alu::ADD_SUB) => Op::Add,
            (funct7::ALT, alu::ADD_SUB) => Op::Sub,
            (funct7::BASE, alu::SLL) => Op::Sll,
            (funct7::BASE, alu::SLT) => Op::Slt,
            (funct7::BASE, alu::SLTU) => Op::Sltu,
            (funct7::BASE, alu::XOR) => Op::Xor,
            (funct7::BASE, alu::SRL_SRA) => Op::Srl,
            (funct7::ALT, alu::SRL_SRA) => Op::Sra,
            (funct7::BASE, alu::OR) => Op::Or,
            (funct7::BASE, alu::AND) => Op::And,
            (M_EXTENSION, m::MUL) => Op::Mul,
            (M_EXTENSION, m::MULH) => Op::Mulh,
            (M_EXTENSION, m::MULHSU) => Op::Mulhsu,
            (M_EXTENSION, m::MULHU) => Op::Mulhu,
            (M_EXTENSION, m::DIV) => Op::Div,
            (M_EXTENSION, m::DIVU) => Op::Divu,
            (M_EXTENSION, m::REM) => Op::Rem,
            (M_EXTENSION, m::REMU) => Op::Remu,
            _ => return None,
        },
        opcodes::OP_REG_32 => match (f7, f3) {
            (funct7::BASE, alu::ADD_SUB) => Op::Addw,
            (funct7::ALT, alu::ADD_SUB) => Op::Subw,
            (funct7::BASE, alu::SLL) => Op::Sllw,
            (funct7::BASE, alu::SRL_SRA) => Op::Srlw,
            (funct7::ALT, alu::SRL_SRA) => Op::Sraw,
            (M_EXTENSION, m::MUL) => Op::Mulw,
            (M_EXTENSION, m::DIV) => Op::Divw,
            (M_EXTENSION, m::DIVU) => Op::Divuw,
            (M_EXTENSION, m::REM) => Op::Remw,
            (M_EXTENSION, m::REMU) => Op::Remuw,
            _ => return None,
        },
        opcodes::OP_MISC_MEM if f3 == funct3::FENCE => Op::Fence,
        OP_SYSTEM => match raw {
            ECALL => Op::Ecall,
            EBREAK => Op::Ebreak,
            _ => return None,
        },
        _ => return None,
    };
    Some(op)
}
