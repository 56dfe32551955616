//! Instruction Decode (ID) Stage.
//!
//! This module implements the issue logic of the pipeline. Up to `width`
//! micro-ops leave the fetch buffer per cycle, in order, each with its
//! source operands resolved from the register file, the forwarding network
//! or (with cascaded execution) an older lane of the same bundle.
//!
//! Issue stops early (a bundle split) when:
//! 1. A slot reads a register written by an older slot of the bundle that
//!    cannot cascade into it.
//! 2. A slot writes a register already written by an older slot (WAW).
//! 3. A forwarding query finds a load whose data has not returned.
//!
//! `ECALL`, `EBREAK` and faulted micro-ops close their bundle. With early
//! branch resolution, transfers whose operands are known here are resolved
//! and a mispredicted fetch path is squashed.

use tracing::{debug, trace};

use crate::common::RegisterFile;
use crate::common::constants::NUM_GPRS;
use crate::config::PipelineConfig;
use crate::core::pipeline::fusion::is_fusible;
use crate::core::pipeline::hazards::{
    DECODE_REDIRECT_PENALTY, DataHazardUnit, ForwardResult, Redirect,
};
use crate::core::pipeline::latches::{Bypass, FusionRole, Latches, MicroOp};
use crate::core::pipeline::signals::SystemOp;
use crate::core::units::compute::ComputeUnit;
use crate::isa::decode::Decoded;
use crate::stats::SimStats;

/// Youngest writer of a register within the bundle being built.
#[derive(Clone, Copy, Debug)]
struct Writer {
    lane: usize,
    is_load: bool,
}

/// How one source operand reaches Execute.
#[derive(Clone, Copy, Debug)]
enum Source {
    RegFile,
    Forwarded(u64),
    Cascaded(usize),
}

/// Issue state of the bundle being built.
#[derive(Debug)]
struct Bundle {
    writers: [Option<Writer>; NUM_GPRS],
    cascade: bool,
}

impl Bundle {
    /// Resolves register `reg` for a consumer in `lane`, `None` if the
    /// consumer has to wait for the next cycle.
    fn source(&self, reg: usize, lane: usize, latches: &Latches) -> Option<Source> {
        if let Some(w) = self.writers[reg] {
            return (self.cascade && !w.is_load && w.lane + 1 == lane)
                .then_some(Source::Cascaded(w.lane));
        }
        match DataHazardUnit::forward(reg, &latches.ex_mem, &latches.mem_wb) {
            ForwardResult::Hit(v) => Some(Source::Forwarded(v)),
            ForwardResult::Miss => Some(Source::RegFile),
            ForwardResult::Stall => None,
        }
    }

    /// Resolves both operands of `d`, `None` on a dependency that splits the bundle.
    fn operands(&self, d: &Decoded, lane: usize, latches: &Latches) -> Option<[Source; 2]> {
        if d.dest().is_some_and(|rd| self.writers[rd].is_some()) {
            return None;
        }
        let [s1, s2] = d.sources();
        let resolve = |reg: Option<usize>| match reg {
            Some(r) => self.source(r, lane, latches),
            None => Some(Source::RegFile),
        };
        Some([resolve(s1)?, resolve(s2)?])
    }

    fn record(&mut self, d: &Decoded, lane: usize) {
        if let Some(rd) = d.dest() {
            self.writers[rd] = Some(Writer {
                lane,
                is_load: d.ctrl().mem_read,
            });
        }
    }
}

/// Executes the instruction decode stage of the pipeline.
///
/// Returns a redirect when early branch resolution repaired a misprediction;
/// the caller must point the PC at its target and suppress fetch this cycle.
pub fn decode_stage(
    regs: &RegisterFile,
    latches: &mut Latches,
    config: &PipelineConfig,
    stats: &mut SimStats,
) -> Option<Redirect> {
    let width = config.width;
    let available = latches.if_id.occupancy();
    let mut bundle = Bundle {
        writers: [None; NUM_GPRS],
        cascade: config.cascaded_execution,
    };
    let mut issued = 0;
    let mut consumed = 0;
    let mut split = false;
    let mut redirect = None;

    while issued < width && consumed < available {
        let mut op = latches.if_id.slot(consumed).clone();
        let Some(d) = op.decoded.filter(|_| op.fault.is_none()) else {
            latches.id_ex.put(issued, op);
            issued += 1;
            consumed += 1;
            break;
        };

        let Some(sources) = bundle.operands(&d, issued, latches) else {
            split = true;
            break;
        };

        let tail = latches
            .if_id
            .get(consumed + 1)
            .filter(|_| config.macro_op_fusion && issued + 2 <= width && consumed + 1 < available)
            .filter(|t| t.fault.is_none())
            .and_then(|t| t.decoded.map(|td| (t.clone(), td)))
            .filter(|(_, td)| is_fusible(&d, td));

        read_operands(&mut op, &d, sources, regs, stats);

        if let Some((mut tail_op, td)) = tail {
            op.fusion = FusionRole::Head;
            tail_op.fusion = FusionRole::Tail;
            tail_op.rs1_val = regs.read(td.rs1);
            tail_op.fwd_rs1 = Some(Bypass::Lane(issued));
            trace!(head = op.pc, tail = tail_op.pc, "fused pair");
            latches.id_ex.put(issued, op);
            latches.id_ex.put(issued + 1, tail_op);
            bundle.record(&td, issued + 1);
            issued += 2;
            consumed += 2;
            continue;
        }

        if config.early_branch_resolution && d.ctrl().is_control() {
            redirect = resolve_early(&mut op, &d);
        }

        let closes = matches!(d.ctrl().system, SystemOp::Ecall | SystemOp::Ebreak);
        trace!(pc = op.pc, lane = issued, op = d.mnemonic(), "issue");
        bundle.record(&d, issued);
        latches.id_ex.put(issued, op);
        issued += 1;
        consumed += 1;
        if redirect.is_some() || closes {
            break;
        }
    }

    if split && issued < width {
        stats.bundle_splits += 1;
        debug!(issued, "bundle split");
    }
    if let Some(r) = redirect {
        let squashed = latches.if_id.flush_from(consumed);
        stats.squashed += squashed as u64;
        stats.flushes += 1;
        stats.early_redirects += 1;
        debug!(target = r.target, squashed, "decode redirect");
    }

    for idx in 0..consumed {
        let _ = latches.if_id.take(idx);
    }
    latches.if_id.compact();
    stats.uops_issued += issued as u64;
    redirect
}

/// Reads register-file values and applies the chosen bypasses.
fn read_operands(
    op: &mut MicroOp,
    d: &Decoded,
    sources: [Source; 2],
    regs: &RegisterFile,
    stats: &mut SimStats,
) {
    op.rs1_val = regs.read(d.rs1);
    op.rs2_val = regs.read(d.rs2);
    let [b1, b2] = sources.map(|s| match s {
        Source::RegFile => None,
        Source::Forwarded(v) => {
            stats.forwarded_operands += 1;
            Some(Bypass::Value(v))
        }
        Source::Cascaded(lane) => {
            stats.cascaded_operands += 1;
            Some(Bypass::Lane(lane))
        }
    });
    op.fwd_rs1 = b1;
    op.fwd_rs2 = b2;
}

/// Resolves a transfer whose operands are already known.
///
/// On a mismatch with the fetched path the op records the repaired path and
/// the redirect is returned.
fn resolve_early(op: &mut MicroOp, d: &Decoded) -> Option<Redirect> {
    let value = |bypass: Option<Bypass>, reg: u64| match bypass {
        None => Some(reg),
        Some(Bypass::Value(v)) => Some(v),
        Some(Bypass::Lane(_)) => None,
    };
    let rs1 = value(op.fwd_rs1, op.rs1_val)?;
    let rs2 = value(op.fwd_rs2, op.rs2_val)?;
    let actual = ComputeUnit::compute(d, op.pc, op.size, rs1, rs2).next_pc(op.pc, op.size);
    if actual == op.expected_next {
        return None;
    }
    op.expected_next = actual;
    op.redirected = true;
    Some(Redirect {
        target: actual,
        penalty: DECODE_REDIRECT_PENALTY,
    })
}
