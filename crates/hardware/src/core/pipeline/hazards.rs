//! Hazard Detection, Forwarding and Control Resolution.
//!
//! This module implements the logic for maintaining pipeline consistency. It provides:
//! 1. **Structural stalls:** Load-use dependencies that hold the front end for a cycle.
//! 2. **Operand Forwarding:** Resolves Read-After-Write (RAW) hazards by bypassing the register file.
//! 3. **Control Resolution:** Compares executed transfers with their predictions,
//!    trains the predictor and squashes the wrong path.
//!
//! The units are stateless: each call inspects the latches it is handed.

use tracing::debug;

use crate::core::pipeline::latches::{MicroOp, PipelineBuffer};
use crate::core::pipeline::traits::PipelineLatch;
use crate::core::units::bru::{BranchPredictor, BranchPredictorWrapper};
use crate::isa::abi::{REG_RA, REG_ZERO};
use crate::isa::op::Op;
use crate::stats::SimStats;

/// Penalty of a misprediction repaired in Decode.
pub const DECODE_REDIRECT_PENALTY: u64 = 1;
/// Penalty of a misprediction repaired after Execute.
pub const EXECUTE_REDIRECT_PENALTY: u64 = 2;

/// Result of a forwarding query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForwardResult {
    /// The youngest in-flight producer has the value.
    Hit(u64),
    /// No in-flight producer; the register file is current.
    Miss,
    /// The youngest producer is a load whose data has not returned.
    Stall,
}

/// Front-end correction after a misprediction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Redirect {
    /// Correct next PC.
    pub target: u64,
    /// Cycles lost relative to a correct prediction.
    pub penalty: u64,
}

/// Operand forwarding.
#[derive(Debug, Clone, Copy)]
pub struct DataHazardUnit;

impl DataHazardUnit {
    /// Finds the youngest in-flight value of register `reg`.
    ///
    /// Producers are scanned youngest first: EX/MEM from the last lane down,
    /// then MEM/WB. Register 0 is never forwarded, and a load is only
    /// eligible once its data has returned.
    pub fn forward(reg: usize, ex_mem: &PipelineBuffer, mem_wb: &PipelineBuffer) -> ForwardResult {
        if reg == REG_ZERO {
            return ForwardResult::Miss;
        }
        let producer = ex_mem
            .iter()
            .rev()
            .chain(mem_wb.iter().rev())
            .find(|op| op.dest() == Some(reg));

        match producer {
            Some(op) if op.data_ready => ForwardResult::Hit(op.result),
            Some(_) => ForwardResult::Stall,
            None => ForwardResult::Miss,
        }
    }
}

/// Load-use detection.
#[derive(Debug, Clone, Copy)]
pub struct StructuralHazardUnit;

impl StructuralHazardUnit {
    /// Checks whether the decode window must wait a cycle.
    ///
    /// The window is the first `width` entries of the fetch buffer. A stall
    /// is needed when one of them reads a register whose youngest in-flight
    /// producer is a load still in EX/MEM. Registers written by an older
    /// entry of the window are skipped; that entry is the producer.
    pub fn must_stall(if_id: &PipelineBuffer, ex_mem: &PipelineBuffer, width: usize) -> bool {
        let mut written = [false; 32];
        for op in if_id.iter().take(width) {
            let Some(d) = op.decoded else {
                continue;
            };
            for reg in d.sources().into_iter().flatten() {
                if written[reg] {
                    continue;
                }
                let producer = ex_mem.iter().rev().find(|p| p.dest() == Some(reg));
                if producer.is_some_and(MicroOp::is_pending_load) {
                    debug!(pc = op.pc, reg, "load-use stall");
                    return true;
                }
            }
            if let Some(rd) = d.dest() {
                written[rd] = true;
            }
        }
        false
    }
}

/// Branch resolution after Execute.
#[derive(Debug, Clone, Copy)]
pub struct ControlHazardUnit;

impl ControlHazardUnit {
    /// Resolves every transfer in EX/MEM in program order.
    ///
    /// Each resolved transfer trains the predictor. The first one whose
    /// actual next PC differs from the path being fetched squashes the
    /// younger lanes of EX/MEM and all of ID/EX and IF/ID, and yields the
    /// redirect. Transfers younger than it are squashed unresolved.
    pub fn resolve(
        ex_mem: &mut PipelineBuffer,
        id_ex: &mut PipelineBuffer,
        if_id: &mut PipelineBuffer,
        bp: &mut BranchPredictorWrapper,
        stats: &mut SimStats,
    ) -> Option<Redirect> {
        for lane in 0..ex_mem.width() {
            let op = ex_mem.slot(lane);
            if !op.valid || op.fault.is_some() {
                continue;
            }
            let (Some(d), Some(outcome)) = (op.decoded, op.outcome) else {
                continue;
            };
            let actual = op.actual_next();

            Self::train(bp, op);
            if actual == op.prediction.next_pc {
                stats.branch_predictions += 1;
            } else {
                stats.branch_mispredictions += 1;
            }

            if actual != op.expected_next {
                debug!(
                    pc = op.pc,
                    op = d.mnemonic(),
                    taken = outcome.taken,
                    target = actual,
                    "execute redirect"
                );
                let squashed = ex_mem.flush_from(lane + 1) + id_ex.flush() + if_id.flush();
                stats.flushes += 1;
                stats.squashed += squashed as u64;
                return Some(Redirect {
                    target: actual,
                    penalty: EXECUTE_REDIRECT_PENALTY,
                });
            }
        }
        None
    }

    /// Trains the predictor with one resolved transfer.
    fn train(bp: &mut BranchPredictorWrapper, op: &MicroOp) {
        let (Some(d), Some(outcome)) = (op.decoded, op.outcome) else {
            return;
        };
        if d.ctrl().jump && d.rd == REG_RA {
            bp.on_call(op.pc, op.pc.wrapping_add(op.size), outcome.target);
        } else if is_return(d.op, d.rd, d.rs1) {
            bp.on_return();
            bp.update_btb(op.pc, outcome.target);
        } else if d.ctrl().jump {
            bp.update_btb(op.pc, outcome.target);
        } else {
            bp.train_branch(
                op.pc,
                op.prediction.history,
                outcome.taken,
                outcome.taken.then_some(outcome.target),
            );
        }
    }
}

/// True for `jalr x0, 0(ra)` style returns.
pub fn is_return(op: Op, rd: usize, rs1: usize) -> bool {
    op == Op::Jalr && rs1 == REG_RA && rd == REG_ZERO
}
