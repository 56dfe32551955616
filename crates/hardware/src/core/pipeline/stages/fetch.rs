//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the instruction pipeline.
//! It fills the free slots of the fetch buffer from a block of
//! `4 × width` bytes starting at the architectural PC, expanding compressed
//! instructions and advancing by each instruction's real size. With dynamic
//! branch fetching it also predicts every control transfer and follows
//! predicted-taken targets.

use tracing::trace;

use crate::common::constants::{FETCH_BYTES_PER_LANE, INSTRUCTION_SIZE_16, INSTRUCTION_SIZE_32};
use crate::common::error::Fault;
use crate::config::PipelineConfig;
use crate::core::Cpu;
use crate::core::pipeline::hazards::is_return;
use crate::core::pipeline::latches::{MicroOp, PipelineBuffer};
use crate::core::units::bru::{BranchPredictor, BranchPredictorWrapper};
use crate::isa::decode::{Decoded, decode};
use crate::stats::SimStats;

/// Executes the instruction fetch stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - CPU state; `cpu.pc` is the next fetch address and is advanced.
/// * `if_id` - The fetch buffer.
/// * `bp` - Branch predictor consulted for control transfers.
/// * `config` - Pipeline configuration.
/// * `next_seq` - Program-order sequence counter.
/// * `stats` - Statistics sink.
///
/// # Behavior
///
/// - Stops at a full buffer or when the next instruction would cross the block
/// - Stops after a predicted-taken transfer (later lanes are shadow-killed)
/// - Stops after a faulting fetch, which is recorded on its micro-op
pub fn fetch_stage(
    cpu: &mut Cpu,
    if_id: &mut PipelineBuffer,
    bp: &BranchPredictorWrapper,
    config: &PipelineConfig,
    next_seq: &mut u64,
    stats: &mut SimStats,
) {
    if_id.compact();
    let block_end = cpu
        .pc
        .wrapping_add(FETCH_BYTES_PER_LANE * config.width as u64);
    let mut pc = cpu.pc;

    while if_id.occupancy() < if_id.width() {
        let mut op = match cpu.fetch(pc) {
            Ok((raw, size)) => {
                if pc.wrapping_add(size) > block_end {
                    break;
                }
                let mut op = MicroOp::fetched(*next_seq, pc, raw, size);
                match decode(raw) {
                    Ok(d) => op.decoded = Some(d),
                    Err(e) => op.fault = Some(Fault::Decode(e)),
                }
                op
            }
            Err(fault) => {
                let size = match fault {
                    Fault::Decode(_) => INSTRUCTION_SIZE_16,
                    Fault::Memory(_) => INSTRUCTION_SIZE_32,
                };
                let mut op = MicroOp::fetched(*next_seq, pc, 0, size);
                op.fault = Some(fault);
                op
            }
        };

        let target = match op.decoded {
            Some(d) if config.dynamic_branch_fetching => predict(bp, &d, pc),
            _ => None,
        };
        op.prediction.history = bp.history();
        if let Some(next_pc) = target {
            op.prediction.taken = true;
            op.prediction.next_pc = next_pc;
            op.expected_next = next_pc;
        }

        let faulted = op.fault.is_some();
        let next_pc = op.expected_next;
        trace!(pc, seq = *next_seq, raw = op.raw, size = op.size, "fetch");
        if !if_id.push(op) {
            break;
        }
        *next_seq += 1;
        stats.uops_fetched += 1;
        pc = next_pc;

        if target.is_some() || faulted {
            break;
        }
    }

    cpu.pc = pc;
}

/// Predicted target of a control transfer, `None` for fall-through.
fn predict(bp: &BranchPredictorWrapper, d: &Decoded, pc: u64) -> Option<u64> {
    let ctrl = d.ctrl();
    if ctrl.branch {
        match bp.predict_branch(pc) {
            (true, hint) => hint,
            (false, _) => None,
        }
    } else if is_return(d.op, d.rd, d.rs1) {
        bp.predict_return().or_else(|| bp.predict_btb(pc))
    } else if ctrl.jump {
        bp.predict_btb(pc)
    } else {
        None
    }
}
