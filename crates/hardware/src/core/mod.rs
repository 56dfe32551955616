//! Core processor implementation.
//!
//! This module contains the architectural state, the instruction pipeline
//! that drives it cycle by cycle, and the execution units both the pipeline
//! and the reference model share.

/// Architectural state and instruction fetch.
pub mod cpu;

/// Instruction pipeline implementation (controller, stages, latches, hazards, signals).
pub mod pipeline;

/// Execution units (ALU, LSU, branch predictor, compute unit).
pub mod units;

pub use self::cpu::Cpu;
