//! Execution units and functional components.
//!
//! This module contains the integer ALU, the branch prediction unit, the
//! load/store unit and the compute unit that combines them into the
//! per-operation semantics shared by the pipeline and the reference model.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Branch predictors, BTB and RAS.
pub mod bru;

/// Per-operation semantics.
pub mod compute;

/// Load/Store Unit for memory access operations.
pub mod lsu;
