//! N-wide in-order superscalar RISC-V pipeline simulator library.
//!
//! This crate implements a cycle-accurate model of an RV64IM+C core with a
//! configurable issue width:
//! 1. **Core:** Fetch, decode, execute, memory and writeback stages over W-wide
//!    latches, with load-use stalls, forwarding and misprediction recovery.
//! 2. **Prediction:** Static, bimodal and gshare direction predictors with a
//!    BTB and an optional return address stack.
//! 3. **ISA:** Decoding and semantics for RV64I, RV64M and the RVC subset.
//! 4. **Memory:** Flat little-endian RAM behind the `MemoryBus` trait.
//! 5. **Simulation:** Program loading, host calls, budgeted runs, the
//!    sequential reference model and tandem verification.
//! 6. **Statistics:** Counters, derived metrics and pipeline snapshots.
//!
//! ```
//! use rvwide_core::{Config, Program, run_program};
//!
//! // addi a0, zero, 7 ; addi a7, zero, 93 ; ecall
//! let program = Program::from_words(0x8000_0000, &[0x0070_0513, 0x05D0_0893, 0x0000_0073]);
//! let mut config = Config::default();
//! config.pipeline.width = 2;
//! let report = run_program(&config, &program).unwrap();
//! assert_eq!(report.outcome.exit_code(), Some(7));
//! ```

/// Common types and constants (errors, registers, field masks).
pub mod common;
/// Simulator configuration (defaults, predictor kind, validation).
pub mod config;
/// CPU core (architectural state, pipeline, execution units).
pub mod core;
/// Instruction set (decode, op table, ABI, RV64I/M, RVC, disassembly).
pub mod isa;
/// Program loading, host calls, simulator, reference model and tandem verification.
pub mod sim;
/// Memory (bus trait and flat RAM).
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Error raised out of a run.
pub use crate::common::error::{SimError, SimResult};
/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Architectural state.
pub use crate::core::Cpu;
/// Per-cycle pipeline driver.
pub use crate::core::pipeline::{PipelineController, PipelineSnapshot};
/// Simulation entry points.
pub use crate::sim::{
    Program, RunOutcome, RunReport, RunStatus, Simulator, TandemReport, TandemVerifier,
    run_program,
};
/// Metrics.
pub use crate::stats::{MetricsSnapshot, SimStats};
