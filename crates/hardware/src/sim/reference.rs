//! Sequential reference model.
//!
//! Retires one instruction per step straight against the architectural
//! state with [`ComputeUnit::execute`], the same operation semantics the
//! pipeline uses. It has no latches, no prediction and no hazards, which is
//! what makes it the oracle for tandem verification.

use tracing::{debug, trace};

use crate::common::error::{Fault, SimResult};
use crate::config::Config;
use crate::core::cpu::Cpu;
use crate::core::units::compute::ComputeUnit;
use crate::isa::decode::decode;
use crate::sim::loader::Program;
use crate::sim::simulator::RunOutcome;

/// One-instruction-per-step interpreter.
#[derive(Clone, Debug)]
pub struct ReferenceCore {
    cpu: Cpu,
    steps: u64,
    max_steps: u64,
}

impl ReferenceCore {
    /// Builds the model from the same inputs as the pipeline.
    ///
    /// # Errors
    ///
    /// Any error of [`Cpu::new`].
    pub fn new(config: &Config, program: &Program) -> SimResult<Self> {
        Ok(Self {
            cpu: Cpu::new(config, program)?,
            steps: 0,
            max_steps: config.general.max_cycles,
        })
    }

    /// Retires the instruction at the PC.
    ///
    /// # Errors
    ///
    /// The fetch or decode fault of the instruction, or a memory fault from
    /// its execution.
    pub fn step(&mut self) -> SimResult<()> {
        let pc = self.cpu.pc;
        let (raw, size) = self.cpu.fetch(pc).map_err(|f| f.at(pc))?;
        let d = decode(raw).map_err(|e| Fault::Decode(e).at(pc))?;
        trace!(pc, op = d.mnemonic(), "reference step");
        ComputeUnit::execute(&mut self.cpu, &d, size)?;
        self.steps += 1;
        Ok(())
    }

    /// Steps until the program halts or the step budget runs out.
    ///
    /// # Errors
    ///
    /// Any error of [`ReferenceCore::step`].
    pub fn run(&mut self) -> SimResult<RunOutcome> {
        while !self.cpu.is_halted() && self.steps < self.max_steps {
            self.step()?;
        }
        debug!(steps = self.steps, halted = self.cpu.is_halted(), "reference run finished");
        Ok(RunOutcome::from_cpu(&self.cpu, self.steps, self.steps))
    }

    /// Architectural state.
    pub const fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Instructions retired so far.
    pub const fn steps(&self) -> u64 {
        self.steps
    }
}
