//! Per-operation semantics.
//!
//! [`ComputeUnit::compute`] is the pure function the Execute stage applies
//! to every micro-op: operand selection, the ALU, branch comparison and
//! target generation. [`ComputeUnit::execute`] wraps it with register
//! access, memory and host calls to retire one instruction sequentially;
//! the reference model is built on it. Both models therefore share one
//! definition of every operation.

use serde::Serialize;

use crate::common::error::{SimError, SimResult};
use crate::core::cpu::{Cpu, Halt};
use crate::core::pipeline::signals::{OpASrc, OpBSrc, SystemOp};
use crate::core::units::alu::Alu;
use crate::core::units::lsu::Lsu;
use crate::isa::decode::Decoded;
use crate::isa::op::Op;
use crate::sim::host;

/// Resolved control transfer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BranchOutcome {
    /// Whether control leaves the fall-through path.
    pub taken: bool,
    /// Destination when taken.
    pub target: u64,
}

impl BranchOutcome {
    /// Address of the next instruction on the architectural path.
    #[inline]
    pub const fn next_pc(&self, pc: u64, size: u64) -> u64 {
        if self.taken {
            self.target
        } else {
            pc.wrapping_add(size)
        }
    }
}

/// Output of [`ComputeUnit::compute`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ComputeResult {
    /// ALU output: the destination value, the link address of a jump, or the
    /// effective address of a load or store.
    pub alu_result: u64,
    /// Value a store writes.
    pub store_value: u64,
    /// Outcome of a branch or jump.
    pub branch: Option<BranchOutcome>,
}

impl ComputeResult {
    /// Address of the next instruction on the architectural path.
    #[inline]
    pub fn next_pc(&self, pc: u64, size: u64) -> u64 {
        self.branch
            .map_or(pc.wrapping_add(size), |b| b.next_pc(pc, size))
    }
}

/// Stateless per-operation semantics.
#[derive(Debug, Clone, Copy)]
pub struct ComputeUnit;

impl ComputeUnit {
    /// Computes the result of `d` at `pc` from its source operand values.
    ///
    /// `size` is the instruction length (2 or 4); jumps link to `pc + size`.
    pub fn compute(d: &Decoded, pc: u64, size: u64, rs1: u64, rs2: u64) -> ComputeResult {
        let ctrl = d.ctrl();
        let imm = d.imm as u64;
        let link = pc.wrapping_add(size);

        let branch = match d.op {
            Op::Jal => Some(BranchOutcome {
                taken: true,
                target: pc.wrapping_add(imm),
            }),
            Op::Jalr => Some(BranchOutcome {
                taken: true,
                target: rs1.wrapping_add(imm) & !1,
            }),
            _ if ctrl.branch => Some(BranchOutcome {
                taken: ctrl.cond.evaluate(rs1, rs2),
                target: pc.wrapping_add(imm),
            }),
            _ => None,
        };

        let alu_result = if ctrl.jump {
            link
        } else {
            let a = match ctrl.a_src {
                OpASrc::Reg1 => rs1,
                OpASrc::Pc => pc,
                OpASrc::Zero => 0,
            };
            let b = match ctrl.b_src {
                OpBSrc::Imm => imm,
                OpBSrc::Reg2 => rs2,
                OpBSrc::Zero => 0,
            };
            Alu::execute(ctrl.alu, a, b, ctrl.is_rv32)
        };

        ComputeResult {
            alu_result,
            store_value: rs2,
            branch,
        }
    }

    /// Retires `d` against `cpu` in one step: reads registers at `cpu.pc`,
    /// computes, performs memory access and host calls, writes the
    /// destination and advances the PC.
    ///
    /// # Errors
    ///
    /// [`SimError::MemoryFault`] for an out-of-range load, store or host
    /// call buffer.
    pub fn execute(cpu: &mut Cpu, d: &Decoded, size: u64) -> SimResult<()> {
        let pc = cpu.pc;
        let ctrl = d.ctrl();
        let res = Self::compute(d, pc, size, cpu.regs.read(d.rs1), cpu.regs.read(d.rs2));
        let fault = |source| SimError::MemoryFault { pc, source };

        let value = if ctrl.mem_read {
            Lsu::load(&cpu.bus, res.alu_result, ctrl.width, ctrl.signed_load).map_err(fault)?
        } else {
            if ctrl.mem_write {
                Lsu::store(&mut cpu.bus, res.alu_result, ctrl.width, res.store_value)
                    .map_err(fault)?;
            }
            res.alu_result
        };

        match ctrl.system {
            SystemOp::Ecall => host::service(cpu).map_err(fault)?,
            SystemOp::Ebreak => cpu.halt = Some(Halt::Breakpoint),
            SystemOp::Fence | SystemOp::None => {}
        }

        if ctrl.reg_write {
            cpu.regs.write(d.rd, value);
        }
        cpu.pc = res.next_pc(pc, size);
        Ok(())
    }
}
