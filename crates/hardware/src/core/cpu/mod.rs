//! Architectural state.
//!
//! This module defines the `Cpu` structure, the only state visible across a
//! run. It holds:
//! 1. **Registers:** The integer register file and the architectural PC.
//! 2. **Memory:** Flat RAM holding the program image and data.
//! 3. **Host state:** The output stream written by host calls and the halt status.
//!
//! The pipelined model and the reference model each own a `Cpu` built from
//! the same configuration and program, which gives them identical initial
//! state.

use serde::Serialize;

use crate::common::constants::{
    COMPRESSED_INSTRUCTION_MASK, COMPRESSED_INSTRUCTION_VALUE, INSTRUCTION_SIZE_16,
    INSTRUCTION_SIZE_32,
};
use crate::common::error::{AccessKind, Fault, SimError, SimResult};
use crate::common::RegisterFile;
use crate::config::Config;
use crate::isa::abi;
use crate::isa::rvc;
use crate::sim::loader::Program;
use crate::soc::memory::Memory;
use crate::soc::traits::MemoryBus;

/// Why the machine stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Halt {
    /// The program called `exit` with this code.
    Exit(u64),
    /// The program executed `EBREAK`.
    Breakpoint,
}

/// Architectural machine state.
#[derive(Clone, Debug)]
pub struct Cpu {
    /// General purpose registers.
    pub regs: RegisterFile,
    /// Architectural program counter (next fetch address in the pipeline).
    pub pc: u64,
    /// System RAM.
    pub bus: Memory,
    /// Bytes written through the `write` host call.
    pub output: Vec<u8>,
    /// Set once the program exits or hits a breakpoint.
    pub halt: Option<Halt>,
}

impl Cpu {
    /// Builds the initial state: RAM with the program loaded, PC at the
    /// configured start or the program entry and `sp` at the configured or
    /// default stack top.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Configuration`] for an invalid configuration and
    /// [`SimError::MemoryFault`] when the image does not fit in RAM.
    pub fn new(config: &Config, program: &Program) -> SimResult<Self> {
        config.validate()?;

        let mut bus = Memory::from_config(&config.memory);
        program
            .load_into(&mut bus)
            .map_err(|source| SimError::MemoryFault {
                pc: program.entry,
                source,
            })?;

        let mut regs = RegisterFile::new();
        let sp = config
            .general
            .initial_sp
            .unwrap_or_else(|| config.memory.ram_end() & !0xF);
        regs.write(abi::REG_SP, sp);

        Ok(Self {
            regs,
            pc: config.general.start_pc.unwrap_or(program.entry),
            bus,
            output: Vec::new(),
            halt: None,
        })
    }

    /// Fetches the instruction at `pc`.
    ///
    /// Returns the 32-bit encoding (compressed forms expanded) and the size of
    /// the instruction in bytes, 2 or 4.
    ///
    /// # Errors
    ///
    /// [`Fault::Memory`] when any fetched byte is unmapped and
    /// [`Fault::Decode`] for an illegal compressed encoding.
    pub fn fetch(&self, pc: u64) -> Result<(u32, u64), Fault> {
        let low = self
            .bus
            .read_u16(pc)
            .map_err(|f| f.with_kind(AccessKind::Fetch))?;

        if low & COMPRESSED_INSTRUCTION_MASK == COMPRESSED_INSTRUCTION_VALUE {
            let word = self
                .bus
                .read_u32(pc)
                .map_err(|f| f.with_kind(AccessKind::Fetch))?;
            Ok((word, INSTRUCTION_SIZE_32))
        } else {
            Ok((rvc::expand(low)?, INSTRUCTION_SIZE_16))
        }
    }

    /// True once the machine has halted.
    pub const fn is_halted(&self) -> bool {
        self.halt.is_some()
    }

    /// Exit code, if the program exited.
    pub const fn exit_code(&self) -> Option<u64> {
        match self.halt {
            Some(Halt::Exit(code)) => Some(code),
            _ => None,
        }
    }
}
