//! ALU arithmetic operations.
//!
//! Addition, subtraction and the M extension. Division never traps:
//! division by zero yields all ones (quotient) or the dividend (remainder),
//! and signed overflow (`MIN / -1`) yields `MIN` with remainder zero.

use super::sext32;

/// Wrapping addition.
pub const fn add(a: u64, b: u64, is32: bool) -> u64 {
    let r = a.wrapping_add(b);
    if is32 { sext32(r) } else { r }
}

/// Wrapping subtraction.
pub const fn sub(a: u64, b: u64, is32: bool) -> u64 {
    let r = a.wrapping_sub(b);
    if is32 { sext32(r) } else { r }
}

/// Low bits of the product.
pub const fn mul(a: u64, b: u64, is32: bool) -> u64 {
    let r = a.wrapping_mul(b);
    if is32 { sext32(r) } else { r }
}

/// High 64 bits of signed × signed.
pub const fn mulh(a: u64, b: u64) -> u64 {
    (((a as i64 as i128) * (b as i64 as i128)) >> 64) as u64
}

/// High 64 bits of signed × unsigned.
pub const fn mulhsu(a: u64, b: u64) -> u64 {
    (((a as i64 as i128) * (b as i128)) >> 64) as u64
}

/// High 64 bits of unsigned × unsigned.
pub const fn mulhu(a: u64, b: u64) -> u64 {
    (((a as u128) * (b as u128)) >> 64) as u64
}

/// Signed division.
pub const fn div(a: u64, b: u64, is32: bool) -> u64 {
    if is32 {
        let (a, b) = (a as i32, b as i32);
        if b == 0 {
            return u64::MAX;
        }
        a.wrapping_div(b) as i64 as u64
    } else {
        let (a, b) = (a as i64, b as i64);
        if b == 0 {
            return u64::MAX;
        }
        a.wrapping_div(b) as u64
    }
}

/// Unsigned division.
pub const fn divu(a: u64, b: u64, is32: bool) -> u64 {
    if is32 {
        let (a, b) = (a as u32, b as u32);
        if b == 0 {
            return u64::MAX;
        }
        sext32((a / b) as u64)
    } else if b == 0 {
        u64::MAX
    } else {
        a / b
    }
}

/// Signed remainder.
pub const fn rem(a: u64, b: u64, is32: bool) -> u64 {
    if is32 {
        let (a, b) = (a as i32, b as i32);
        if b == 0 {
            return a as i64 as u64;
        }
        a.wrapping_rem(b) as i64 as u64
    } else {
        let (a, b) = (a as i64, b as i64);
        if b == 0 {
            return a as u64;
        }
        a.wrapping_rem(b) as u64
    }
}

/// Unsigned remainder.
pub const fn remu(a: u64, b: u64, is32: bool) -> u64 {
    if is32 {
        let (a, b) = (a as u32, b as u32);
        if b == 0 {
            return sext32(a as u64);
        }
        sext32((a % b) as u64)
    } else if b == 0 {
        a
    } else {
        a % b
    }
}
