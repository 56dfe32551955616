//! Pipeline controller.
//!
//! Owns the architectural state, the latches, the branch predictor and the
//! statistics, and advances them one cycle at a time. A cycle evaluates
//! Writeback, Memory, Execute, control resolution, the load-use check,
//! Decode and Fetch, in that order. Each stage therefore consumes what the
//! previous cycle left in its input latch, except for the same-cycle paths
//! the model provides on purpose:
//! - forwarding from EX/MEM and MEM/WB into Decode,
//! - cascaded and fused lanes inside Execute,
//! - PC redirects from control resolution or early resolution in Decode.
//!
//! A redirect suppresses Fetch for the cycle in which it happens.

use tracing::{debug, trace};

use crate::common::error::SimResult;
use crate::config::{Config, PipelineConfig};
use crate::core::cpu::Cpu;
use crate::core::pipeline::hazards::{ControlHazardUnit, StructuralHazardUnit};
use crate::core::pipeline::latches::Latches;
use crate::core::pipeline::snapshot::PipelineSnapshot;
use crate::core::pipeline::stages::{
    decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage,
};
use crate::core::units::bru::BranchPredictorWrapper;
use crate::sim::loader::Program;
use crate::stats::SimStats;

/// Cycle-level driver of the pipeline.
#[derive(Clone, Debug)]
pub struct PipelineController {
    config: PipelineConfig,
    cpu: Cpu,
    latches: Latches,
    bp: BranchPredictorWrapper,
    stats: SimStats,
    next_seq: u64,
}

impl PipelineController {
    /// Builds a pipeline with `program` loaded and every latch empty.
    ///
    /// # Errors
    ///
    /// Any error of [`Cpu::new`].
    pub fn new(config: &Config, program: &Program) -> SimResult<Self> {
        let cpu = Cpu::new(config, program)?;
        debug!(
            width = config.pipeline.width,
            fetch_slots = config.pipeline.fetch_buffer_slots(),
            predictor = ?config.pipeline.branch_predictor,
            entry = cpu.pc,
            "pipeline created"
        );
        Ok(Self {
            config: config.pipeline.clone(),
            cpu,
            latches: Latches::new(&config.pipeline),
            bp: BranchPredictorWrapper::new(&config.pipeline),
            stats: SimStats::default(),
            next_seq: 0,
        })
    }

    /// Advances the pipeline by one cycle.
    ///
    /// Does nothing once the machine has halted.
    ///
    /// # Errors
    ///
    /// A fault carried by a retiring micro-op, or a memory fault raised by a
    /// load, store or host call.
    pub fn tick(&mut self) -> SimResult<()> {
        if self.cpu.is_halted() {
            return Ok(());
        }
        self.stats.cycles += 1;
        let Self {
            config,
            cpu,
            latches,
            bp,
            stats,
            next_seq,
        } = self;

        wb_stage(cpu, &mut latches.mem_wb, stats)?;
        if cpu.is_halted() {
            return Ok(());
        }
        mem_stage(&mut cpu.bus, latches)?;
        execute_stage(latches);

        let mut redirect = ControlHazardUnit::resolve(
            &mut latches.ex_mem,
            &mut latches.id_ex,
            &mut latches.if_id,
            bp,
            stats,
        );

        let stalled = redirect.is_none()
            && StructuralHazardUnit::must_stall(&latches.if_id, &latches.ex_mem, config.width);
        latches.if_id.set_stalled(stalled);
        if stalled {
            stats.stalls_data += 1;
        } else if redirect.is_none() {
            redirect = decode_stage(&cpu.regs, latches, config, stats);
        }

        match redirect {
            Some(r) => {
                debug!(target = r.target, penalty = r.penalty, cycle = stats.cycles, "redirect");
                cpu.pc = r.target;
                stats.stalls_control += 1;
            }
            None => fetch_stage(cpu, &mut latches.if_id, bp, config, next_seq, stats),
        }

        trace!(
            cycle = stats.cycles,
            pc = cpu.pc,
            fetch_buffer = latches.if_id.occupancy(),
            "cycle"
        );
        Ok(())
    }

    /// Architectural state.
    pub const fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Statistics so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Stage latches.
    pub const fn latches(&self) -> &Latches {
        &self.latches
    }

    /// Branch predictor state.
    pub const fn predictor(&self) -> &BranchPredictorWrapper {
        &self.bp
    }

    /// Pipeline configuration.
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Cycles elapsed.
    pub const fn cycle(&self) -> u64 {
        self.stats.cycles
    }

    /// Captures the current latch contents.
    pub fn snapshot(&self) -> PipelineSnapshot {
        PipelineSnapshot::capture(self.stats.cycles, self.cpu.pc, &self.latches)
    }

    /// Gives up the architectural state.
    pub fn into_cpu(self) -> Cpu {
        self.cpu
    }
}
