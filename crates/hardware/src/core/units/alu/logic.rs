//! ALU comparison operations.
//!
//! The bitwise operations are a single operator each and live inline in
//! [`super::Alu::execute`]. Comparisons have no word form: SLT and SLTU
//! always compare the full 64-bit operands.

/// Set if less than (signed).
pub const fn slt(a: u64, b: u64) -> u64 {
    ((a as i64) < (b as i64)) as u64
}

/// Set if less than (unsigned).
pub const fn sltu(a: u64, b: u64) -> u64 {
    (a < b) as u64
}
