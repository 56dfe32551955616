//! Macro-op fusion.
//!
//! Recognises adjacent instruction pairs that the issue logic may send down
//! two lanes in the same cycle despite the dependency between them. The
//! tail reads the head's result through the same-cycle lane path; only the
//! tail commits.
//!
//! Recognised pairs, all with `head.rd == tail.rd == tail.rs1 != x0`:
//! - `lui` + `addi` / `addiw` (32-bit constant)
//! - `auipc` + `addi` (PC-relative address)
//! - `slli 32` + `srli 32` (zero-extend a word)

use crate::isa::decode::Decoded;
use crate::isa::op::Op;

/// Shift amount of the zero-extension idiom.
const ZEXT_SHIFT: i64 = 32;

/// Returns true if `head` followed by `tail` forms a fusible pair.
pub fn is_fusible(head: &Decoded, tail: &Decoded) -> bool {
    if head.rd == 0 || head.rd != tail.rd || tail.rs1 != head.rd {
        return false;
    }
    match (head.op, tail.op) {
        (Op::Lui, Op::Addi | Op::Addiw) | (Op::Auipc, Op::Addi) => true,
        (Op::Slli, Op::Srli) => head.imm == ZEXT_SHIFT && tail.imm == ZEXT_SHIFT,
        _ => false,
    }
}
