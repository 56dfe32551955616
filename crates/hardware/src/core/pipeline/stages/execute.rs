//! Execute (EX) Stage.
//!
//! This module implements the third stage of the instruction pipeline.
//! Every valid lane of ID/EX is computed by the shared [`ComputeUnit`] with
//! its operands resolved from the decode-time register read, a forwarded
//! value or, for cascaded and fused lanes, the result an older lane produced
//! earlier in this same cycle. Lanes run in order so that result is ready.
//!
//! Branch outcomes are only recorded here; the control hazard unit acts on
//! them once the whole bundle has executed.

use tracing::trace;

use crate::core::pipeline::latches::{Bypass, Latches};
use crate::core::units::compute::ComputeUnit;

/// Executes the execute stage of the pipeline.
///
/// Moves ID/EX into EX/MEM lane by lane. Bubbles and faulted micro-ops pass
/// through untouched.
pub fn execute_stage(latches: &mut Latches) {
    for lane in 0..latches.id_ex.width() {
        let mut op = latches.id_ex.take(lane);
        if let Some(d) = op.decoded.filter(|_| op.valid && op.fault.is_none()) {
            let rs1 = operand(op.fwd_rs1, op.rs1_val, latches);
            let rs2 = operand(op.fwd_rs2, op.rs2_val, latches);
            let res = ComputeUnit::compute(&d, op.pc, op.size, rs1, rs2);

            op.result = res.alu_result;
            op.store_value = res.store_value;
            op.outcome = res.branch;
            op.data_ready = !d.ctrl().mem_read;
            trace!(pc = op.pc, lane, op = d.mnemonic(), result = op.result, "execute");
        }
        latches.ex_mem.put(lane, op);
    }
}

/// Value of one operand.
fn operand(bypass: Option<Bypass>, reg: u64, latches: &Latches) -> u64 {
    match bypass {
        None => reg,
        Some(Bypass::Value(v)) => v,
        Some(Bypass::Lane(lane)) => latches.ex_mem.slot(lane).result,
    }
}
