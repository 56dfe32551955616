//! Host call service.
//!
//! `ECALL` transfers control to the host, which inspects `a7`:
//! - `64` (`write`): appends `a2` bytes at `a1` to the output stream when
//!   `a0` is stdout or stderr.
//! - `93` / `94` (`exit`, `exit_group`): halts with exit code `a0`.
//!
//! Anything else is logged and ignored. Host calls never write registers,
//! so the pipeline needs no forwarding path out of Writeback for them.

use tracing::{info, warn};

use crate::common::error::{AccessKind, MemoryFault};
use crate::core::cpu::{Cpu, Halt};
use crate::isa::abi::{REG_A0, REG_A1, REG_A2, REG_A7};
use crate::isa::privileged::opcodes::{SYS_EXIT, SYS_EXIT_GROUP, SYS_WRITE};
use crate::soc::traits::MemoryBus;

/// File descriptor of standard output.
const STDOUT: u64 = 1;
/// File descriptor of standard error.
const STDERR: u64 = 2;

/// Services the host call described by the current register state.
///
/// # Errors
///
/// [`MemoryFault`] when a `write` buffer leaves memory; nothing is appended
/// in that case.
pub fn service(cpu: &mut Cpu) -> Result<(), MemoryFault> {
    let number = cpu.regs.read(REG_A7);
    let a0 = cpu.regs.read(REG_A0);

    match number {
        SYS_WRITE => {
            let (buf, len) = (cpu.regs.read(REG_A1), cpu.regs.read(REG_A2));
            if a0 == STDOUT || a0 == STDERR {
                let bytes = cpu
                    .bus
                    .read_bytes(buf, len)
                    .map_err(|f| f.with_kind(AccessKind::Load))?;
                cpu.output.extend_from_slice(&bytes);
            } else {
                warn!(fd = a0, "write to unsupported file descriptor ignored");
            }
        }
        SYS_EXIT | SYS_EXIT_GROUP => {
            info!(code = a0, "program exited");
            cpu.halt = Some(Halt::Exit(a0));
        }
        other => warn!(number = other, "unknown host call ignored"),
    }
    Ok(())
}
