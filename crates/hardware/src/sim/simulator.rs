//! Simulator: the pipeline bounded by a max-cycle budget.
//!
//! [`Simulator`] drives a [`PipelineController`] until the program halts or
//! the budget runs out, and [`run_program`] is the one-call entry point that
//! also attaches the tandem verification report when it is enabled.

use serde::Serialize;
use tracing::{info, warn};

use crate::common::constants::NUM_GPRS;
use crate::common::error::SimResult;
use crate::config::Config;
use crate::core::cpu::{Cpu, Halt};
use crate::core::pipeline::{PipelineController, PipelineSnapshot};
use crate::sim::loader::Program;
use crate::sim::tandem::{TandemReport, TandemVerifier};
use crate::stats::{MetricsSnapshot, SimStats};

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RunStatus {
    /// The program exited or hit a breakpoint.
    Halted(Halt),
    /// The max-cycle budget ran out first.
    BudgetExhausted,
}

/// Final state of a run, comparable across models.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    /// How the run ended.
    pub status: RunStatus,
    /// Cycles (pipeline) or steps (reference model) consumed.
    pub cycles: u64,
    /// ISA instructions retired.
    pub instructions_retired: u64,
    /// Final general-purpose registers.
    pub registers: [u64; NUM_GPRS],
    /// Bytes written by the program.
    pub output: Vec<u8>,
}

impl RunOutcome {
    /// Collects the outcome from the final architectural state.
    pub fn from_cpu(cpu: &Cpu, cycles: u64, instructions_retired: u64) -> Self {
        Self {
            status: cpu
                .halt
                .map_or(RunStatus::BudgetExhausted, RunStatus::Halted),
            cycles,
            instructions_retired,
            registers: cpu.regs.snapshot(),
            output: cpu.output.clone(),
        }
    }

    /// Exit code, if the program exited.
    pub const fn exit_code(&self) -> Option<u64> {
        match self.status {
            RunStatus::Halted(Halt::Exit(code)) => Some(code),
            _ => None,
        }
    }

    /// True if the program halted within the budget.
    pub const fn halted(&self) -> bool {
        matches!(self.status, RunStatus::Halted(_))
    }
}

/// The pipelined model bounded by a cycle budget.
#[derive(Clone, Debug)]
pub struct Simulator {
    pipeline: PipelineController,
    max_cycles: u64,
}

impl Simulator {
    /// Builds a simulator for `program` under `config`.
    ///
    /// # Errors
    ///
    /// [`crate::SimError::Configuration`] for an invalid configuration and
    /// [`crate::SimError::MemoryFault`] when the image does not fit in RAM.
    pub fn new(config: &Config, program: &Program) -> SimResult<Self> {
        Ok(Self {
            pipeline: PipelineController::new(config, program)?,
            max_cycles: config.general.max_cycles,
        })
    }

    /// Advances one cycle.
    ///
    /// Returns `false` once the machine has halted or the budget is spent.
    ///
    /// # Errors
    ///
    /// Any error raised by the pipeline.
    pub fn step(&mut self) -> SimResult<bool> {
        if self.pipeline.cpu().is_halted() || self.pipeline.cycle() >= self.max_cycles {
            return Ok(false);
        }
        self.pipeline.tick()?;
        Ok(true)
    }

    /// Runs until the program halts or the budget runs out.
    ///
    /// # Errors
    ///
    /// Any error raised by the pipeline.
    pub fn run(&mut self) -> SimResult<RunOutcome> {
        while self.step()? {}
        let outcome = self.outcome();
        match outcome.status {
            RunStatus::Halted(halt) => info!(
                ?halt,
                cycles = outcome.cycles,
                retired = outcome.instructions_retired,
                "pipeline halted"
            ),
            RunStatus::BudgetExhausted => {
                warn!(max_cycles = self.max_cycles, "cycle budget exhausted");
            }
        }
        Ok(outcome)
    }

    /// Current outcome.
    pub fn outcome(&self) -> RunOutcome {
        let stats = self.pipeline.stats();
        RunOutcome::from_cpu(self.pipeline.cpu(), stats.cycles, stats.instructions_retired)
    }

    /// Statistics so far.
    pub const fn stats(&self) -> &SimStats {
        self.pipeline.stats()
    }

    /// Current latch contents.
    pub fn snapshot(&self) -> PipelineSnapshot {
        self.pipeline.snapshot()
    }

    /// The underlying pipeline.
    pub const fn pipeline(&self) -> &PipelineController {
        &self.pipeline
    }
}

/// Result of [`run_program`].
#[derive(Clone, Debug, Serialize)]
pub struct RunReport {
    /// Final state of the pipelined run.
    pub outcome: RunOutcome,
    /// Pipeline metrics.
    pub metrics: MetricsSnapshot,
    /// Tandem verification result, when enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tandem: Option<TandemReport>,
}

impl RunReport {
    /// Renders the report as JSON.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Runs `program` on the pipeline, in tandem with the reference model when
/// `config.pipeline.tandem_verification` is set.
///
/// # Errors
///
/// Configuration and load errors, and any fault raised by either model.
pub fn run_program(config: &Config, program: &Program) -> SimResult<RunReport> {
    if config.pipeline.tandem_verification {
        let (report, metrics) = TandemVerifier::new(config, program)?.run()?;
        return Ok(RunReport {
            outcome: report.pipeline.clone(),
            metrics,
            tandem: Some(report),
        });
    }

    let mut sim = Simulator::new(config, program)?;
    let outcome = sim.run()?;
    Ok(RunReport {
        outcome,
        metrics: sim.stats().snapshot(),
        tandem: None,
    })
}
