

/// Shared per-operation semantics.
pub mod compute;
