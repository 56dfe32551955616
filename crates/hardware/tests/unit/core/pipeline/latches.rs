//! # Latch Tests
//!
//! Slot management of `PipelineBuffer` and the micro-op predicates the
//! stages rely on.

use pretty_assertions::assert_eq;
use rvwide_core::common::error::{DecodeError, Fault};
use rvwide_core::config::PipelineConfig;
use rvwide_core::core::pipeline::latches::{FusionRole, Latches, MicroOp, PipelineBuffer};
use rvwide_core::core::pipeline::traits::PipelineLatch;

use super::uop;
use crate::common::asm;

const PC: u64 = 0x8000_0000;

fn pcs(buf: &PipelineBuffer) -> Vec<u64> {
    buf.iter().map(|op| op.pc).collect()
}

#[test]
fn new_buffer_is_all_bubbles() {
    let buf = PipelineBuffer::new(4);
    assert_eq!(buf.width(), 4);
    assert_eq!(buf.occupancy(), 0);
    assert!(buf.is_empty());
    assert!(!buf.is_stalled());
}

#[test]
fn push_until_full() {
    let mut buf = PipelineBuffer::new(2);
    assert!(buf.push(uop(0, PC, asm::nop())));
    assert!(buf.push(uop(1, PC + 4, asm::nop())));
    assert!(!buf.push(uop(2, PC + 8, asm::nop())));
    assert_eq!(pcs(&buf), vec![PC, PC + 4]);
}

#[test]
fn take_leaves_a_bubble_and_compact_keeps_order() {
    let mut buf = PipelineBuffer::new(4);
    for i in 0..4 {
        assert!(buf.push(uop(i, PC + 4 * i, asm::nop())));
    }
    let taken = buf.take(1);
    assert_eq!(taken.pc, PC + 4);
    assert!(!buf.slot(1).valid);
    assert_eq!(buf.occupancy(), 3);

    buf.compact();
    assert_eq!(pcs(&buf), vec![PC, PC + 8, PC + 12]);
    assert!(buf.slot(0).valid && buf.slot(2).valid && !buf.slot(3).valid);
}

#[test]
fn flush_from_counts_squashed() {
    let mut buf = PipelineBuffer::new(4);
    for i in 0..3 {
        assert!(buf.push(uop(i, PC + 4 * i, asm::nop())));
    }
    assert_eq!(buf.flush_from(1), 2);
    assert_eq!(pcs(&buf), vec![PC]);
    assert_eq!(buf.flush(), 1);
    assert!(buf.is_empty());
}

#[test]
fn clear_resets_stall() {
    let mut buf = PipelineBuffer::new(2);
    assert!(buf.push(uop(0, PC, asm::nop())));
    buf.set_stalled(true);
    buf.clear();
    assert!(buf.is_empty());
    assert!(!buf.is_stalled());
}

#[test]
fn has_fault() {
    let mut buf = PipelineBuffer::new(2);
    assert!(buf.push(uop(0, PC, asm::nop())));
    assert!(!buf.has_fault());
    let mut bad = MicroOp::fetched(1, PC + 4, 0, 2);
    bad.fault = Some(Fault::Decode(DecodeError::IllegalCompressed(0)));
    assert!(buf.push(bad));
    assert!(buf.has_fault());
}

#[test]
fn fetched_op_predicts_fall_through() {
    let op = MicroOp::fetched(7, PC, asm::c_nop() as u32, 2);
    assert!(op.valid);
    assert_eq!(op.seq, 7);
    assert!(!op.prediction.taken);
    assert_eq!(op.prediction.next_pc, PC + 2);
    assert_eq!(op.expected_next, PC + 2);
    assert_eq!(op.actual_next(), PC + 2);
}

#[test]
fn dest_excludes_x0_stores_heads_and_faults() {
    assert_eq!(uop(0, PC, asm::addi(5, 0, 1)).dest(), Some(5));
    assert_eq!(uop(0, PC, asm::addi(0, 0, 1)).dest(), None);
    assert_eq!(uop(0, PC, asm::sd(5, 2, 0)).dest(), None);

    let mut head = uop(0, PC, asm::lui(5, 1));
    head.fusion = FusionRole::Head;
    assert_eq!(head.dest(), None);

    let mut faulted = uop(0, PC, asm::addi(5, 0, 1));
    faulted.fault = Some(Fault::Decode(DecodeError::Unrecognized(0)));
    assert!(!faulted.writes_register());
}

#[test]
fn pending_load_until_data_ready() {
    let mut load = uop(0, PC, asm::ld(1, 2, 0));
    assert!(load.is_pending_load());
    load.data_ready = true;
    assert!(!load.is_pending_load());
    assert!(!uop(0, PC, asm::addi(1, 0, 1)).is_pending_load());
}

#[test]
fn control_ops() {
    assert!(uop(0, PC, asm::beq(1, 2, 8)).is_control());
    assert!(uop(0, PC, asm::ret()).is_control());
    assert!(!uop(0, PC, asm::add(1, 2, 3)).is_control());
}

#[test]
fn latch_sizes_follow_config() {
    let config = PipelineConfig {
        width: 3,
        fetch_buffer_ratio: 1.5,
        ..PipelineConfig::default()
    };
    let latches = Latches::new(&config);
    let widths: Vec<_> = latches
        .named()
        .iter()
        .map(|(name, l)| (*name, l.width()))
        .collect();
    assert_eq!(
        widths,
        vec![("IF/ID", 5), ("ID/EX", 3), ("EX/MEM", 3), ("MEM/WB", 3)]
    );
    assert!(latches.is_empty());
}
