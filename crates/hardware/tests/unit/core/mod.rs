

/// ALU, branch prediction, load/store and compute units.
pub mod units;
