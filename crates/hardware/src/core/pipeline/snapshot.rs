//! Serializable views of the pipeline for visualization.

use serde::Serialize;

use crate::core::pipeline::latches::{FusionRole, Latches, MicroOp};
use crate::isa::disasm::disassemble;

/// One occupied slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SlotView {
    /// Lane index within the latch.
    pub lane: usize,
    /// Program counter.
    pub pc: u64,
    /// Program-order sequence number.
    pub seq: u64,
    /// 32-bit encoding.
    pub raw: u32,
    /// Disassembly, or the fault the micro-op carries.
    pub text: String,
    /// `"head"` or `"tail"` for a fused pair.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fusion: Option<&'static str>,
}

impl SlotView {
    fn new(lane: usize, op: &MicroOp) -> Self {
        let text = match (op.fault, op.decoded) {
            (Some(fault), _) => format!("<{fault}>"),
            (None, Some(d)) => disassemble(&d),
            (None, None) => String::from("<empty>"),
        };
        let fusion = match op.fusion {
            FusionRole::None => None,
            FusionRole::Head => Some("head"),
            FusionRole::Tail => Some("tail"),
        };
        Self {
            lane,
            pc: op.pc,
            seq: op.seq,
            raw: op.raw,
            text,
            fusion,
        }
    }
}

/// One stage latch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LatchView {
    /// Latch name, e.g. `"EX/MEM"`.
    pub name: &'static str,
    /// Whether the owning stage is holding its content.
    pub stalled: bool,
    /// Number of slots.
    pub width: usize,
    /// Occupied slots in lane order.
    pub slots: Vec<SlotView>,
}

/// State of every latch at the end of a cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PipelineSnapshot {
    /// Cycles elapsed.
    pub cycle: u64,
    /// Next fetch address.
    pub fetch_pc: u64,
    /// Latches in pipeline order.
    pub latches: Vec<LatchView>,
}

impl PipelineSnapshot {
    /// Captures the latches.
    pub fn capture(cycle: u64, fetch_pc: u64, latches: &Latches) -> Self {
        let latches = latches
            .named()
            .into_iter()
            .map(|(name, latch)| LatchView {
                name,
                stalled: latch.is_stalled(),
                width: latch.width(),
                slots: latch
                    .slots()
                    .iter()
                    .enumerate()
                    .filter(|(_, op)| op.valid)
                    .map(|(lane, op)| SlotView::new(lane, op))
                    .collect(),
            })
            .collect();
        Self {
            cycle,
            fetch_pc,
            latches,
        }
    }

    /// Renders the snapshot as JSON.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Latch view by name.
    pub fn latch(&self, name: &str) -> Option<&LatchView> {
        self.latches.iter().find(|l| l.name == name)
    }
}
