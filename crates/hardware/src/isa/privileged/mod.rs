//! SYSTEM opcode and host call definitions.
//!
//! Only ECALL and EBREAK are executed. CSR access and trap returns decode
//! as illegal instructions because the model has no privilege levels.

/// SYSTEM instruction encodings and host call numbers.
pub mod opcodes;
