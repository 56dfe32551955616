//! Writeback (WB) Stage.
//!
//! This module implements the final stage of the instruction pipeline.
//! It commits results to the register file in lane order, raises the fault
//! of a retiring faulted micro-op, services host calls and updates the
//! retirement statistics. A fused head commits nothing and counts towards
//! committed micro-ops only.

use tracing::info;

use crate::common::error::{SimError, SimResult};
use crate::core::cpu::{Cpu, Halt};
use crate::core::pipeline::latches::{FusionRole, PipelineBuffer};
use crate::core::pipeline::signals::SystemOp;
use crate::core::pipeline::traits::PipelineLatch;
use crate::sim::host;
use crate::stats::SimStats;

/// Executes the writeback stage of the pipeline.
///
/// Stops at the first micro-op that halts the machine; nothing younger retires.
///
/// # Errors
///
/// The fault of a retiring faulted micro-op, or [`SimError::MemoryFault`]
/// when a host call reads outside memory.
pub fn wb_stage(cpu: &mut Cpu, mem_wb: &mut PipelineBuffer, stats: &mut SimStats) -> SimResult<()> {
    for lane in 0..mem_wb.width() {
        let op = mem_wb.take(lane);
        if !op.valid {
            continue;
        }
        if let Some(fault) = op.fault {
            return Err(fault.at(op.pc));
        }
        let Some(d) = op.decoded else {
            continue;
        };

        if let Some(rd) = op.dest() {
            cpu.regs.write(rd, op.result);
        }
        stats.uops_committed += 1;
        if op.fusion == FusionRole::Head {
            stats.fused_pairs += 1;
        } else {
            stats.instructions_retired += 1;
            stats.record_class(d.op.class());
        }

        match d.ctrl().system {
            SystemOp::Ecall => host::service(cpu)
                .map_err(|source| SimError::MemoryFault { pc: op.pc, source })?,
            SystemOp::Ebreak => cpu.halt = Some(Halt::Breakpoint),
            SystemOp::Fence | SystemOp::None => {}
        }

        if let Some(halt) = cpu.halt {
            info!(pc = op.pc, ?halt, cycle = stats.cycles, "halted");
            let _ = mem_wb.flush();
            return Ok(());
        }
    }
    Ok(())
}
