//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the pipeline model. It provides:
//! 1. **Cycle and IPC:** Total cycles, ISA-retired instructions and
//!    pipeline-committed micro-ops, with derived IPC and CPI.
//! 2. **Instruction mix:** Counts by operation class.
//! 3. **Branch prediction:** Resolved transfers, mispredictions and accuracy.
//! 4. **Hazards:** Load-use stalls, bundle splits, redirect cycles, flushes,
//!    forwarded and cascaded operands and fused pairs.
//!
//! Counters only grow. [`SimStats::snapshot`] freezes them into a
//! serializable [`MetricsSnapshot`].

use std::fmt::Write as _;

use serde::Serialize;

use crate::isa::op::OpClass;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// ISA instructions retired (a fused pair counts once).
    pub instructions_retired: u64,
    /// Micro-ops committed by Writeback (a fused pair counts twice).
    pub uops_committed: u64,
    /// Micro-ops placed in the fetch buffer.
    pub uops_fetched: u64,
    /// Micro-ops issued by Decode.
    pub uops_issued: u64,

    /// Count of ALU instructions retired.
    pub inst_alu: u64,
    /// Count of multiply/divide instructions retired.
    pub inst_muldiv: u64,
    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of conditional branches retired.
    pub inst_branch: u64,
    /// Count of jumps retired.
    pub inst_jump: u64,
    /// Count of system instructions retired.
    pub inst_system: u64,

    /// Resolved transfers whose fetch-time prediction was correct.
    pub branch_predictions: u64,
    /// Resolved transfers whose fetch-time prediction was wrong.
    pub branch_mispredictions: u64,
    /// Mispredictions repaired in Decode.
    pub early_redirects: u64,

    /// Cycles the front end stalled on a load-use dependency.
    pub stalls_data: u64,
    /// Cycles Decode issued fewer ops than it held because of a dependency.
    pub bundle_splits: u64,
    /// Cycles fetch was suppressed by a redirect.
    pub stalls_control: u64,
    /// Number of redirects that squashed the younger path.
    pub flushes: u64,
    /// Micro-ops squashed by flushes.
    pub squashed: u64,

    /// Operands bypassed from EX/MEM or MEM/WB.
    pub forwarded_operands: u64,
    /// Operands read from an older lane in the same cycle.
    pub cascaded_operands: u64,
    /// Fused pairs retired.
    pub fused_pairs: u64,
}

/// Section names for selective stats output.
///
/// Pass an empty slice to [`SimStats::render_sections`] to render all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "pipeline", "instruction_mix", "branch"];

/// Frozen view of [`SimStats`] with derived rates.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    /// Cycles elapsed.
    pub cycles: u64,
    /// ISA instructions retired.
    pub instructions_retired: u64,
    /// Micro-ops committed.
    pub uops_committed: u64,
    /// Retired instructions per cycle.
    pub ipc: f64,
    /// Cycles per retired instruction.
    pub cpi: f64,
    /// Load-use stall cycles.
    pub stalls_data: u64,
    /// Redirect cycles.
    pub stalls_control: u64,
    /// Bundle splits.
    pub bundle_splits: u64,
    /// Flushes.
    pub flushes: u64,
    /// Squashed micro-ops.
    pub squashed: u64,
    /// Resolved branches and jumps.
    pub branch_lookups: u64,
    /// Mispredicted branches and jumps.
    pub branch_mispredictions: u64,
    /// Fraction of transfers predicted correctly, 1.0 when none resolved.
    pub branch_accuracy: f64,
    /// Fraction of transfers mispredicted.
    pub mispredict_rate: f64,
    /// Forwarded operands.
    pub forwarded_operands: u64,
    /// Cascaded operands.
    pub cascaded_operands: u64,
    /// Fused pairs.
    pub fused_pairs: u64,
}

impl SimStats {
    /// Counts one retired ISA instruction of class `class`.
    pub fn record_class(&mut self, class: OpClass) {
        let counter = match class {
            OpClass::Alu => &mut self.inst_alu,
            OpClass::MulDiv => &mut self.inst_muldiv,
            OpClass::Load => &mut self.inst_load,
            OpClass::Store => &mut self.inst_store,
            OpClass::Branch => &mut self.inst_branch,
            OpClass::Jump => &mut self.inst_jump,
            OpClass::System => &mut self.inst_system,
        };
        *counter += 1;
    }

    /// Branches and jumps resolved in Execute.
    pub const fn branch_lookups(&self) -> u64 {
        self.branch_predictions + self.branch_mispredictions
    }

    /// Retired instructions per cycle.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }

    /// Cycles per retired instruction.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Fraction of mispredicted transfers, 0.0 when none resolved.
    pub fn mispredict_rate(&self) -> f64 {
        let total = self.branch_lookups();
        if total == 0 {
            0.0
        } else {
            self.branch_mispredictions as f64 / total as f64
        }
    }

    /// Freezes the counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let mispredict_rate = self.mispredict_rate();
        MetricsSnapshot {
            cycles: self.cycles,
            instructions_retired: self.instructions_retired,
            uops_committed: self.uops_committed,
            ipc: self.ipc(),
            cpi: self.cpi(),
            stalls_data: self.stalls_data,
            stalls_control: self.stalls_control,
            bundle_splits: self.bundle_splits,
            flushes: self.flushes,
            squashed: self.squashed,
            branch_lookups: self.branch_lookups(),
            branch_mispredictions: self.branch_mispredictions,
            branch_accuracy: 1.0 - mispredict_rate,
            mispredict_rate,
            forwarded_operands: self.forwarded_operands,
            cascaded_operands: self.cascaded_operands,
            fused_pairs: self.fused_pairs,
        }
    }

    /// Renders the requested statistics sections as text.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`];
    /// unknown names are ignored and an empty slice renders everything.
    pub fn render_sections(&self, sections: &[&str]) -> String {
        let want = |s: &str| sections.is_empty() || sections.contains(&s);
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_retired.max(1) as f64;
        let pct = |n: u64, of: f64| (n as f64 / of) * 100.0;
        let mut out = String::new();

        let _ = writeln!(out, "==========================================================");
        let _ = writeln!(out, "SUPERSCALAR PIPELINE STATISTICS");
        let _ = writeln!(out, "==========================================================");
        if want("summary") {
            let _ = writeln!(out, "sim_cycles               {}", self.cycles);
            let _ = writeln!(out, "sim_insts                {}", self.instructions_retired);
            let _ = writeln!(out, "sim_uops                 {}", self.uops_committed);
            let _ = writeln!(out, "sim_ipc                  {:.4}", self.ipc());
            let _ = writeln!(out, "sim_cpi                  {:.4}", self.cpi());
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("pipeline") {
            let _ = writeln!(out, "PIPELINE");
            let _ = writeln!(out, "  uops.fetched           {}", self.uops_fetched);
            let _ = writeln!(out, "  uops.issued            {}", self.uops_issued);
            let _ = writeln!(
                out,
                "  stalls.data            {} ({:.2}%)",
                self.stalls_data,
                pct(self.stalls_data, cyc)
            );
            let _ = writeln!(
                out,
                "  stalls.control         {} ({:.2}%)",
                self.stalls_control,
                pct(self.stalls_control, cyc)
            );
            let _ = writeln!(out, "  bundle.splits          {}", self.bundle_splits);
            let _ = writeln!(out, "  flushes                {}", self.flushes);
            let _ = writeln!(out, "  squashed               {}", self.squashed);
            let _ = writeln!(out, "  operands.forwarded     {}", self.forwarded_operands);
            let _ = writeln!(out, "  operands.cascaded      {}", self.cascaded_operands);
            let _ = writeln!(out, "  fused.pairs            {}", self.fused_pairs);
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("instruction_mix") {
            let _ = writeln!(out, "INSTRUCTION MIX");
            for (name, n) in [
                ("alu", self.inst_alu),
                ("muldiv", self.inst_muldiv),
                ("load", self.inst_load),
                ("store", self.inst_store),
                ("branch", self.inst_branch),
                ("jump", self.inst_jump),
                ("system", self.inst_system),
            ] {
                let _ = writeln!(out, "  op.{name:<19} {n} ({:.2}%)", pct(n, instr));
            }
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("branch") {
            let total = self.branch_lookups();
            let _ = writeln!(out, "BRANCH PREDICTION");
            let _ = writeln!(out, "  bp.lookups             {total}");
            let _ = writeln!(out, "  bp.mispredicts         {}", self.branch_mispredictions);
            let _ = writeln!(out, "  bp.early_redirects     {}", self.early_redirects);
            let _ = writeln!(
                out,
                "  bp.accuracy            {:.2}%",
                (1.0 - self.mispredict_rate()) * 100.0
            );
        }
        let _ = writeln!(out, "==========================================================");
        out
    }
}
