//! Simulation drivers and program loading.
//!
//! Provides:
//! 1. **Loader:** Program images from words, bytes, flat binaries and ELF files.
//! 2. **Host calls:** The `write` and `exit` services behind `ECALL`.
//! 3. **Simulator:** The budgeted pipeline run and [`run_program`].
//! 4. **Reference model:** The sequential oracle.
//! 5. **Tandem verification:** Differential comparison of the two models.

/// Host call services.
pub mod host;

/// Program images.
pub mod loader;

/// Sequential reference model.
pub mod reference;

/// Budgeted pipeline driver.
pub mod simulator;

/// Tandem verification.
pub mod tandem;

pub use self::loader::{LoadError, Program};
pub use self::reference::ReferenceCore;
pub use self::simulator::{RunOutcome, RunReport, RunStatus, Simulator, run_program};
pub use self::tandem::{TandemMismatch, TandemReport, TandemVerifier};
