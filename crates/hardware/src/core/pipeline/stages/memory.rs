//! Memory Access (MEM) Stage.
//!
//! This module implements the fourth stage of the instruction pipeline.
//! Loads read memory at the address Execute computed and replace the slot's
//! result with the extended data, which makes it eligible for forwarding.
//! Stores write memory here, lane by lane, so memory always reflects program
//! order and a younger load never observes a stale value.

use tracing::trace;

use crate::common::error::{SimError, SimResult};
use crate::core::pipeline::latches::Latches;
use crate::core::units::lsu::Lsu;
use crate::soc::traits::MemoryBus;

/// Executes the memory stage of the pipeline.
///
/// # Errors
///
/// [`SimError::MemoryFault`] for a load or store outside memory.
pub fn mem_stage<B: MemoryBus + ?Sized>(bus: &mut B, latches: &mut Latches) -> SimResult<()> {
    for lane in 0..latches.ex_mem.width() {
        let mut op = latches.ex_mem.take(lane);
        if let Some(d) = op.decoded.filter(|_| op.valid && op.fault.is_none()) {
            let ctrl = d.ctrl();
            let pc = op.pc;
            let fault = |source| SimError::MemoryFault { pc, source };
            if ctrl.mem_read {
                op.result = Lsu::load(&*bus, op.result, ctrl.width, ctrl.signed_load).map_err(fault)?;
                op.data_ready = true;
                trace!(pc, lane, value = op.result, "load");
            } else if ctrl.mem_write {
                Lsu::store(&mut *bus, op.result, ctrl.width, op.store_value).map_err(fault)?;
                trace!(pc, lane, addr = op.result, "store");
            }
        }
        latches.mem_wb.put(lane, op);
    }
    Ok(())
}
