//! Static Branch Predictor.
//!
//! Predicts every conditional branch not-taken. Jumps still use the BTB and
//! returns the RAS, so only conditional direction is static.

use super::{BranchPredictor, btb::Btb, ras::Ras};

/// Static Branch Predictor structure.
#[derive(Clone, Debug)]
pub struct StaticPredictor {
    btb: Btb,
    ras: Option<Ras>,
}

impl StaticPredictor {
    /// Creates a static predictor with the given BTB and optional RAS.
    pub const fn new(btb: Btb, ras: Option<Ras>) -> Self {
        Self { btb, ras }
    }
}

impl BranchPredictor for StaticPredictor {
    fn predict_branch(&self, _pc: u64) -> (bool, Option<u64>) {
        (false, None)
    }

    fn update_branch(&mut self, pc: u64, _taken: bool, target: Option<u64>) {
        if let Some(tgt) = target {
            self.btb.update(pc, tgt);
        }
    }

    fn predict_btb(&self, pc: u64) -> Option<u64> {
        self.btb.lookup(pc)
    }

    fn update_btb(&mut self, pc: u64, target: u64) {
        self.btb.update(pc, target);
    }

    fn on_call(&mut self, pc: u64, ret_addr: u64, target: u64) {
        if let Some(ras) = self.ras.as_mut() {
            ras.push(ret_addr);
        }
        self.btb.update(pc, target);
    }

    fn predict_return(&self) -> Option<u64> {
        self.ras.as_ref().and_then(Ras::top)
    }

    fn on_return(&mut self) {
        if let Some(ras) = self.ras.as_mut() {
            let _ = ras.pop();
        }
    }
}
