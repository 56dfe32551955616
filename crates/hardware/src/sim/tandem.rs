//! Tandem verification.
//!
//! Runs one program on the pipelined model and on the sequential reference
//! model from identical initial state, then diffs the final registers, the
//! output stream and the exit status, in that order. The first difference
//! is reported; a clean run reports none.

use serde::Serialize;
use tracing::{info, warn};

use crate::common::error::SimResult;
use crate::config::Config;
use crate::sim::loader::Program;
use crate::sim::reference::ReferenceCore;
use crate::sim::simulator::{RunOutcome, RunStatus, Simulator};
use crate::stats::MetricsSnapshot;

/// First observed divergence between the two models.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum TandemMismatch {
    /// A general-purpose register differs.
    Register {
        /// Register index.
        index: usize,
        /// Pipeline value.
        actual: u64,
        /// Reference value.
        expected: u64,
    },
    /// The output streams differ from `offset` on.
    Output {
        /// First differing byte.
        offset: usize,
        /// Pipeline output from `offset`.
        actual: Vec<u8>,
        /// Reference output from `offset`.
        expected: Vec<u8>,
    },
    /// The runs ended differently.
    ExitStatus {
        /// Pipeline status.
        actual: RunStatus,
        /// Reference status.
        expected: RunStatus,
    },
}

/// Both outcomes and the first mismatch, if any.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TandemReport {
    /// Outcome of the pipelined model.
    pub pipeline: RunOutcome,
    /// Outcome of the reference model.
    pub reference: RunOutcome,
    /// First divergence, `None` when the models agree.
    pub mismatch: Option<TandemMismatch>,
}

impl TandemReport {
    /// Compares two outcomes.
    pub fn compare(pipeline: RunOutcome, reference: RunOutcome) -> Self {
        let mismatch = first_mismatch(&pipeline, &reference);
        Self {
            pipeline,
            reference,
            mismatch,
        }
    }

    /// True when the models agree.
    pub const fn passed(&self) -> bool {
        self.mismatch.is_none()
    }
}

fn first_mismatch(actual: &RunOutcome, expected: &RunOutcome) -> Option<TandemMismatch> {
    if let Some(index) = (0..actual.registers.len())
        .find(|&i| actual.registers[i] != expected.registers[i])
    {
        return Some(TandemMismatch::Register {
            index,
            actual: actual.registers[index],
            expected: expected.registers[index],
        });
    }

    if actual.output != expected.output {
        let offset = actual
            .output
            .iter()
            .zip(&expected.output)
            .position(|(a, e)| a != e)
            .unwrap_or_else(|| actual.output.len().min(expected.output.len()));
        return Some(TandemMismatch::Output {
            offset,
            actual: actual.output[offset..].to_vec(),
            expected: expected.output[offset..].to_vec(),
        });
    }

    (actual.status != expected.status).then_some(TandemMismatch::ExitStatus {
        actual: actual.status,
        expected: expected.status,
    })
}

/// Lock-step pair of the pipelined and reference models.
#[derive(Clone, Debug)]
pub struct TandemVerifier {
    pipeline: Simulator,
    reference: ReferenceCore,
}

impl TandemVerifier {
    /// Builds both models from the same configuration and program.
    ///
    /// # Errors
    ///
    /// Configuration and load errors.
    pub fn new(config: &Config, program: &Program) -> SimResult<Self> {
        Ok(Self {
            pipeline: Simulator::new(config, program)?,
            reference: ReferenceCore::new(config, program)?,
        })
    }

    /// Runs both models to completion and compares them.
    ///
    /// Also returns the pipeline metrics.
    ///
    /// # Errors
    ///
    /// A fault raised by either model.
    pub fn run(mut self) -> SimResult<(TandemReport, MetricsSnapshot)> {
        let pipeline = self.pipeline.run()?;
        let reference = self.reference.run()?;
        let report = TandemReport::compare(pipeline, reference);
        match &report.mismatch {
            None => info!(
                cycles = report.pipeline.cycles,
                retired = report.pipeline.instructions_retired,
                "tandem verification passed"
            ),
            Some(m) => warn!(mismatch = ?m, "tandem verification failed"),
        }
        Ok((report, self.pipeline.stats().snapshot()))
    }
}
