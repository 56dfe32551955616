//! Branch prediction unit (BRU) implementations.
//!
//! This module contains the direction predictors (static, bimodal, gshare),
//! the saturating counter table they share, the branch target buffer (BTB)
//! and the return address stack (RAS).

pub use self::branch_predictor::BranchPredictor;

/// Bimodal predictor (N-bit counters indexed by PC).
pub mod bimodal;

/// Branch predictor trait.
pub mod branch_predictor;

/// Branch Target Buffer for storing predicted branch targets.
pub mod btb;

/// Saturating counter tables.
pub mod counter;

/// Global history branch predictor (gshare algorithm).
pub mod gshare;

/// Return Address Stack for predicting return addresses.
pub mod ras;

/// Static branch predictor (always not-taken).
pub mod static_bp;

use self::{
    bimodal::BimodalPredictor, btb::Btb, counter::CounterTable, gshare::GSharePredictor,
    ras::Ras, static_bp::StaticPredictor,
};
use crate::config::{BranchPredictor as BpType, PipelineConfig};

/// Enum wrapper for static dispatch of Branch Predictors.
///
/// Fetch consults the predictor for every control-flow slot, so the variants
/// are dispatched with a `match` instead of a trait object.
#[derive(Clone, Debug)]
pub enum BranchPredictorWrapper {
    /// Always not-taken.
    Static(StaticPredictor),
    /// PC-indexed counters.
    Bimodal(BimodalPredictor),
    /// PC XOR history indexed counters.
    GShare(GSharePredictor),
}

impl BranchPredictorWrapper {
    /// Builds the configured predictor. The RAS exists only when the
    /// return-address-stack toggle is on.
    pub fn new(config: &PipelineConfig) -> Self {
        let btb = Btb::new(config.btb_size);
        let ras = config
            .return_address_stack
            .then(|| Ras::new(config.ras_size));
        let table = || CounterTable::new(config.table_bits, config.counter_bits, config.initial_counter);

        match config.branch_predictor {
            BpType::Static => Self::Static(StaticPredictor::new(btb, ras)),
            BpType::Bimodal => Self::Bimodal(BimodalPredictor::new(table(), btb, ras)),
            BpType::GShare => {
                Self::GShare(GSharePredictor::new(table(), config.history_bits, btb, ras))
            }
        }
    }
}

macro_rules! dispatch {
    ($self:ident, $bp:ident => $call:expr) => {
        match $self {
            Self::Static($bp) => $call,
            Self::Bimodal($bp) => $call,
            Self::GShare($bp) => $call,
        }
    };
}

impl BranchPredictor for BranchPredictorWrapper {
    #[inline(always)]
    fn predict_branch(&self, pc: u64) -> (bool, Option<u64>) {
        dispatch!(self, bp => bp.predict_branch(pc))
    }

    #[inline(always)]
    fn update_branch(&mut self, pc: u64, taken: bool, target: Option<u64>) {
        dispatch!(self, bp => bp.update_branch(pc, taken, target));
    }

    #[inline(always)]
    fn history(&self) -> u64 {
        dispatch!(self, bp => bp.history())
    }

    #[inline(always)]
    fn train_branch(&mut self, pc: u64, history: u64, taken: bool, target: Option<u64>) {
        dispatch!(self, bp => bp.train_branch(pc, history, taken, target));
    }

    #[inline(always)]
    fn predict_btb(&self, pc: u64) -> Option<u64> {
        dispatch!(self, bp => bp.predict_btb(pc))
    }

    #[inline(always)]
    fn update_btb(&mut self, pc: u64, target: u64) {
        dispatch!(self, bp => bp.update_btb(pc, target));
    }

    #[inline(always)]
    fn on_call(&mut self, pc: u64, ret_addr: u64, target: u64) {
        dispatch!(self, bp => bp.on_call(pc, ret_addr, target));
    }

    #[inline(always)]
    fn predict_return(&self) -> Option<u64> {
        dispatch!(self, bp => bp.predict_return())
    }

    #[inline(always)]
    fn on_return(&mut self) {
        dispatch!(self, bp => bp.on_return());
    }
}
