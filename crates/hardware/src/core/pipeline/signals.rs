//! Pipeline control signals and operation types.
//!
//! This module defines the signals that steer a micro-op through the
//! pipeline. It provides:
//! 1. **Operation Classification:** The integer ALU operation to perform.
//! 2. **Operand Selection:** Sources for ALU inputs (registers, PC or immediate).
//! 3. **Memory Control:** Access widths and sign-extension requirements.
//! 4. **Control Flow:** Branch conditions and the system instruction class.
//!
//! Every signal is `Copy` and const-constructible so the operation table in
//! [`crate::isa::op`] can be a `static`.

/// Integer ALU operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// Integer addition (also address generation and link values).
    #[default]
    Add,
    /// Integer subtraction.
    Sub,
    /// Shift left logical.
    Sll,
    /// Set less than (signed).
    Slt,
    /// Set less than unsigned.
    Sltu,
    /// Bitwise XOR.
    Xor,
    /// Shift right logical.
    Srl,
    /// Shift right arithmetic.
    Sra,
    /// Bitwise OR.
    Or,
    /// Bitwise AND.
    And,
    /// Multiply, low bits.
    Mul,
    /// Multiply high, signed × signed.
    Mulh,
    /// Multiply high, signed × unsigned.
    Mulhsu,
    /// Multiply high, unsigned × unsigned.
    Mulhu,
    /// Divide (signed).
    Div,
    /// Divide (unsigned).
    Divu,
    /// Remainder (signed).
    Rem,
    /// Remainder (unsigned).
    Remu,
}

/// Memory access width for load and store operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemWidth {
    /// No memory operation.
    #[default]
    Nop,
    /// 8-bit byte access.
    Byte,
    /// 16-bit half-word access.
    Half,
    /// 32-bit word access.
    Word,
    /// 64-bit double-word access.
    Double,
}

impl MemWidth {
    /// Number of bytes moved by an access of this width.
    pub const fn bytes(self) -> u64 {
        match self {
            Self::Nop => 0,
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
            Self::Double => 8,
        }
    }
}

/// Source for ALU operand A.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpASrc {
    /// Use `rs1` register value.
    #[default]
    Reg1,
    /// Use the micro-op's program counter.
    Pc,
    /// Use zero.
    Zero,
}

/// Source for ALU operand B.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpBSrc {
    /// Use the sign-extended immediate.
    #[default]
    Imm,
    /// Use `rs2` register value.
    Reg2,
    /// Use zero.
    Zero,
}

/// Comparison performed by a conditional branch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BranchCond {
    /// Equal.
    #[default]
    Eq,
    /// Not equal.
    Ne,
    /// Less than (signed).
    Lt,
    /// Greater or equal (signed).
    Ge,
    /// Less than (unsigned).
    Ltu,
    /// Greater or equal (unsigned).
    Geu,
}

impl BranchCond {
    /// Evaluates the condition on two register values.
    #[inline]
    pub const fn evaluate(self, a: u64, b: u64) -> bool {
        match self {
            Self::Eq => a == b,
            Self::Ne => a != b,
            Self::Lt => (a as i64) < (b as i64),
            Self::Ge => (a as i64) >= (b as i64),
            Self::Ltu => a < b,
            Self::Geu => a >= b,
        }
    }
}

/// System instruction class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SystemOp {
    /// Not a system instruction.
    #[default]
    None,
    /// Environment call, serviced by the host at Writeback.
    Ecall,
    /// Breakpoint; halts the run.
    Ebreak,
    /// Memory ordering fence; a no-op in this model.
    Fence,
}

/// Control signals for pipeline stage execution.
///
/// Produced once per operation by the decoder and carried unchanged by the
/// micro-op through every later stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// Enable write to the destination register.
    pub reg_write: bool,
    /// Enable memory read operation (load).
    pub mem_read: bool,
    /// Enable memory write operation (store).
    pub mem_write: bool,
    /// Instruction is a conditional branch.
    pub branch: bool,
    /// Comparison for conditional branches.
    pub cond: BranchCond,
    /// Instruction is an unconditional jump (`JAL`/`JALR`).
    pub jump: bool,
    /// Instruction uses 32-bit operands and sign-extends its result.
    pub is_rv32: bool,
    /// Width of memory access.
    pub width: MemWidth,
    /// Load should be sign-extended.
    pub signed_load: bool,
    /// ALU operation to perform.
    pub alu: AluOp,
    /// Source selection for ALU operand A.
    pub a_src: OpASrc,
    /// Source selection for ALU operand B.
    pub b_src: OpBSrc,
    /// System instruction class.
    pub system: SystemOp,
}

impl ControlSignals {
    /// Signals of an operation that does nothing.
    pub const NOP: Self = Self {
        reg_write: false,
        mem_read: false,
        mem_write: false,
        branch: false,
        cond: BranchCond::Eq,
        jump: false,
        is_rv32: false,
        width: MemWidth::Nop,
        signed_load: false,
        alu: AluOp::Add,
        a_src: OpASrc::Reg1,
        b_src: OpBSrc::Imm,
        system: SystemOp::None,
    };

    /// True for anything that can redirect the program counter.
    #[inline]
    pub const fn is_control(&self) -> bool {
        self.branch || self.jump
    }

    /// True if operand A reads `rs1`.
    #[inline]
    pub const fn reads_rs1(&self) -> bool {
        matches!(self.a_src, OpASrc::Reg1) || self.branch || self.mem_write
    }

    /// True if the operation reads `rs2`.
    #[inline]
    pub const fn reads_rs2(&self) -> bool {
        matches!(self.b_src, OpBSrc::Reg2) || self.branch || self.mem_write
    }
}
