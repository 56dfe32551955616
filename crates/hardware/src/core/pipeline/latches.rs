//! Pipeline latch structures for inter-stage communication.
//!
//! Every stage boundary (IF/ID, ID/EX, EX/MEM, MEM/WB) is a [`PipelineBuffer`]
//! of [`MicroOp`] slots. This module defines:
//! 1. **Instruction Flow:** The micro-op carried from Fetch to Writeback.
//! 2. **Superscalar Support:** W-wide latches with slot-indexed access.
//! 3. **Fetch Queue:** Push and compaction for the fetch buffer, which is sized
//!    by the fetch-buffer ratio rather than the issue width.
//! 4. **Fault Propagation:** Fetch and decode faults ride on the micro-op and
//!    are only raised if it retires.

use crate::common::error::Fault;
use crate::config::PipelineConfig;
use crate::core::pipeline::traits::PipelineLatch;
use crate::core::units::compute::BranchOutcome;
use crate::isa::decode::Decoded;

/// Operand override chosen at decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bypass {
    /// Value forwarded from the EX/MEM or MEM/WB latch.
    Value(u64),
    /// Result of an older lane of the same bundle, read in the same cycle.
    Lane(usize),
}

/// Position of a micro-op inside a fused macro-op.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FusionRole {
    /// Not fused.
    #[default]
    None,
    /// First half; executes but never commits.
    Head,
    /// Second half; commits the pair's result.
    Tail,
}

/// Fetch-time prediction of the next PC.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Prediction {
    /// Whether the fetch unit followed a taken transfer.
    pub taken: bool,
    /// Address fetched after this instruction.
    pub next_pc: u64,
    /// Predictor global history at fetch.
    pub history: u64,
}

/// One pipeline slot.
#[derive(Clone, Debug, Default)]
pub struct MicroOp {
    /// False for a bubble.
    pub valid: bool,
    /// Program-order sequence number.
    pub seq: u64,
    /// Program counter of the instruction.
    pub pc: u64,
    /// 32-bit encoding (compressed forms already expanded).
    pub raw: u32,
    /// Size of the instruction in bytes (2 or 4).
    pub size: u64,
    /// Decoded fields, `None` when fetch or decode faulted.
    pub decoded: Option<Decoded>,
    /// What the fetch unit predicted.
    pub prediction: Prediction,
    /// Next PC of the path the front end currently follows after this op.
    /// Starts as the prediction; repaired by early branch resolution.
    pub expected_next: u64,
    /// Set when decode already redirected the front end for this op.
    pub redirected: bool,
    /// rs1 value read from the register file at decode.
    pub rs1_val: u64,
    /// rs2 value read from the register file at decode.
    pub rs2_val: u64,
    /// Override for rs1.
    pub fwd_rs1: Option<Bypass>,
    /// Override for rs2.
    pub fwd_rs2: Option<Bypass>,
    /// ALU result; the loaded value once a load leaves Memory.
    pub result: u64,
    /// `result` holds the destination value (false for a load before Memory).
    pub data_ready: bool,
    /// Value a store writes.
    pub store_value: u64,
    /// Resolved branch or jump outcome.
    pub outcome: Option<BranchOutcome>,
    /// Macro-op fusion role.
    pub fusion: FusionRole,
    /// Fault raised at retirement.
    pub fault: Option<Fault>,
}

impl MicroOp {
    /// A valid micro-op fetched at `pc`.
    pub fn fetched(seq: u64, pc: u64, raw: u32, size: u64) -> Self {
        let fall_through = pc.wrapping_add(size);
        Self {
            valid: true,
            seq,
            pc,
            raw,
            size,
            prediction: Prediction {
                taken: false,
                next_pc: fall_through,
                history: 0,
            },
            expected_next: fall_through,
            ..Self::default()
        }
    }

    /// True if the op commits a value to a non-zero register.
    pub fn writes_register(&self) -> bool {
        self.valid
            && self.fault.is_none()
            && self.fusion != FusionRole::Head
            && self.decoded.is_some_and(|d| d.dest().is_some())
    }

    /// Destination register committed by this op.
    pub fn dest(&self) -> Option<usize> {
        if self.writes_register() {
            self.decoded.and_then(|d| d.dest())
        } else {
            None
        }
    }

    /// True for a load whose data has not returned yet.
    pub fn is_pending_load(&self) -> bool {
        self.valid && !self.data_ready && self.decoded.is_some_and(|d| d.ctrl().mem_read)
    }

    /// True if this op resolves a branch or jump.
    pub fn is_control(&self) -> bool {
        self.decoded.is_some_and(|d| d.ctrl().is_control())
    }

    /// Next PC on the architectural path once the op has executed.
    pub fn actual_next(&self) -> u64 {
        self.outcome.map_or(self.pc.wrapping_add(self.size), |o| {
            o.next_pc(self.pc, self.size)
        })
    }
}

/// A fixed-size stage latch.
#[derive(Clone, Debug)]
pub struct PipelineBuffer {
    slots: Vec<MicroOp>,
    stalled: bool,
}

impl PipelineBuffer {
    /// Allocates a latch of `width` bubbles.
    pub fn new(width: usize) -> Self {
        Self {
            slots: vec![MicroOp::default(); width],
            stalled: false,
        }
    }

    /// Number of slots.
    pub fn width(&self) -> usize {
        self.slots.len()
    }

    /// Replaces every slot with a bubble and clears the stall flag.
    pub fn clear(&mut self) {
        self.slots.fill(MicroOp::default());
        self.stalled = false;
    }

    /// Reallocates the latch with `width` bubbles.
    pub fn resize(&mut self, width: usize) {
        self.slots = vec![MicroOp::default(); width];
        self.stalled = false;
    }

    /// Slot at `idx`.
    #[inline]
    pub fn slot(&self, idx: usize) -> &MicroOp {
        &self.slots[idx]
    }

    /// Slot at `idx`, or `None` past the end.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<&MicroOp> {
        self.slots.get(idx)
    }

    /// Mutable slot at `idx`.
    #[inline]
    pub fn slot_mut(&mut self, idx: usize) -> &mut MicroOp {
        &mut self.slots[idx]
    }

    /// All slots, in lane order.
    pub fn slots(&self) -> &[MicroOp] {
        &self.slots
    }

    /// Valid slots in lane order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &MicroOp> {
        self.slots.iter().filter(|op| op.valid)
    }

    /// True if any slot holds a valid micro-op.
    pub fn has_content(&self) -> bool {
        self.slots.iter().any(|op| op.valid)
    }

    /// Number of valid slots.
    pub fn occupancy(&self) -> usize {
        self.slots.iter().filter(|op| op.valid).count()
    }

    /// Whether the owning stage re-presents this content next cycle.
    pub const fn is_stalled(&self) -> bool {
        self.stalled
    }

    /// Sets the stall flag.
    pub fn set_stalled(&mut self, stalled: bool) {
        self.stalled = stalled;
    }

    /// Removes the micro-op at `idx`, leaving a bubble.
    pub fn take(&mut self, idx: usize) -> MicroOp {
        std::mem::take(&mut self.slots[idx])
    }

    /// Writes `op` into slot `idx`.
    pub fn put(&mut self, idx: usize, op: MicroOp) {
        self.slots[idx] = op;
    }

    /// Appends `op` after the last valid slot.
    ///
    /// Returns `false` when the latch is full. Assumes the latch is compacted.
    pub fn push(&mut self, op: MicroOp) -> bool {
        let idx = self.occupancy();
        if idx >= self.slots.len() {
            return false;
        }
        self.slots[idx] = op;
        true
    }

    /// Invalidates every slot from `idx` onwards, returning how many valid
    /// micro-ops were squashed.
    pub fn flush_from(&mut self, idx: usize) -> usize {
        let mut squashed = 0;
        for op in self.slots.iter_mut().skip(idx) {
            if op.valid {
                squashed += 1;
            }
            *op = MicroOp::default();
        }
        squashed
    }

    /// Moves valid slots to the front, preserving their order.
    pub fn compact(&mut self) {
        let width = self.slots.len();
        self.slots.retain(|op| op.valid);
        self.slots.resize_with(width, MicroOp::default);
    }
}

impl PipelineLatch for PipelineBuffer {
    fn flush(&mut self) -> usize {
        self.flush_from(0)
    }

    fn is_empty(&self) -> bool {
        !self.has_content()
    }

    fn has_fault(&self) -> bool {
        self.iter().any(|op| op.fault.is_some())
    }
}

/// The four stage boundaries of the pipeline.
#[derive(Clone, Debug)]
pub struct Latches {
    /// Fetch/Decode buffer, sized by the fetch-buffer ratio.
    pub if_id: PipelineBuffer,
    /// Decode/Execute latch.
    pub id_ex: PipelineBuffer,
    /// Execute/Memory latch.
    pub ex_mem: PipelineBuffer,
    /// Memory/Writeback latch.
    pub mem_wb: PipelineBuffer,
}

impl Latches {
    /// Allocates empty latches for `config`.
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            if_id: PipelineBuffer::new(config.fetch_buffer_slots()),
            id_ex: PipelineBuffer::new(config.width),
            ex_mem: PipelineBuffer::new(config.width),
            mem_wb: PipelineBuffer::new(config.width),
        }
    }

    /// Latches in pipeline order with their names.
    pub fn named(&self) -> [(&'static str, &PipelineBuffer); 4] {
        [
            ("IF/ID", &self.if_id),
            ("ID/EX", &self.id_ex),
            ("EX/MEM", &self.ex_mem),
            ("MEM/WB", &self.mem_wb),
        ]
    }

    /// True if no micro-op is in flight.
    pub fn is_empty(&self) -> bool {
        self.named().iter().all(|(_, latch)| !latch.has_content())
    }
}
