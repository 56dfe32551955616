//! ALU shift operations.
//!
//! 64-bit shifts use the low six bits of the shift amount, word shifts the
//! low five.

use super::sext32;

const fn amount(b: u64, is32: bool) -> u32 {
    (if is32 { b & 0x1F } else { b & 0x3F }) as u32
}

/// Shift left logical.
pub const fn sll(a: u64, b: u64, is32: bool) -> u64 {
    let r = a << amount(b, is32);
    if is32 { sext32(r) } else { r }
}

/// Shift right logical; the word form shifts the zero-extended low word.
pub const fn srl(a: u64, b: u64, is32: bool) -> u64 {
    if is32 {
        sext32(((a as u32) >> amount(b, true)) as u64)
    } else {
        a >> amount(b, false)
    }
}

/// Shift right arithmetic.
pub const fn sra(a: u64, b: u64, is32: bool) -> u64 {
    if is32 {
        ((a as i32) >> amount(b, true)) as i64 as u64
    } else {
        ((a as i64) >> amount(b, false)) as u64
    }
}
