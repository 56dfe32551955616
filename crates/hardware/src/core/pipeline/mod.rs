//! Instruction pipeline implementation.
//!
//! This module contains the N-wide, in-order, five-stage pipeline.
//! It includes the following components:
//! 1. **Controller:** The per-cycle driver that runs the stages in order.
//! 2. **Hazards:** Load-use stalls, operand forwarding and control resolution.
//! 3. **Latches:** Inter-stage buffers of micro-ops.
//! 4. **Fusion:** Recognition of fusible instruction pairs.
//! 5. **Signals:** Control signals generated during instruction decoding.
//! 6. **Stages:** Implementation of Fetch, Decode, Execute, Memory, and Writeback stages.
//! 7. **Snapshot:** Serializable latch views for visualization.

/// Per-cycle pipeline driver.
pub mod controller;

/// Macro-op fusion pairs.
pub mod fusion;

/// Pipeline hazard detection and forwarding logic.
pub mod hazards;

/// Inter-stage pipeline latches (IF/ID, ID/EX, EX/MEM, MEM/WB).
pub mod latches;

/// Control signals generated during instruction decode.
pub mod signals;

/// Serializable pipeline views.
pub mod snapshot;

/// Pipeline stage implementations (fetch, decode, execute, memory, writeback).
pub mod stages;

/// Traits for pipeline latches.
pub mod traits;

pub use self::controller::PipelineController;
pub use self::snapshot::PipelineSnapshot;
