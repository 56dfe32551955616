//! GShare Branch Predictor.
//!
//! GShare correlates global branch history with the program counter using an
//! XOR hash, so the same branch can be predicted differently depending on
//! the path that reached it.
//!
//! The global history register holds the last `history_bits` resolved
//! directions, newest in bit 0. It advances only when a branch resolves, so
//! a branch fetched behind unresolved ones sees an older history; training
//! uses the history recorded at fetch.

use super::{BranchPredictor, btb::Btb, counter::CounterTable, ras::Ras};

/// GShare predictor structure.
#[derive(Clone, Debug)]
pub struct GSharePredictor {
    ghr: u64,
    history_mask: u64,
    table: CounterTable,
    btb: Btb,
    ras: Option<Ras>,
}

impl GSharePredictor {
    /// Creates a gshare predictor with `history_bits` of global history.
    pub fn new(table: CounterTable, history_bits: usize, btb: Btb, ras: Option<Ras>) -> Self {
        Self {
            ghr: 0,
            history_mask: (1u64 << history_bits) - 1,
            table,
            btb,
            ras,
        }
    }

    /// Counter table, for inspection.
    pub const fn table(&self) -> &CounterTable {
        &self.table
    }

    const fn index(&self, pc: u64, history: u64) -> usize {
        self.table.index((pc >> 1) ^ history)
    }
}

impl BranchPredictor for GSharePredictor {
    fn predict_branch(&self, pc: u64) -> (bool, Option<u64>) {
        if self.table.predict(self.index(pc, self.ghr)) {
            (true, self.btb.lookup(pc))
        } else {
            (false, None)
        }
    }

    fn update_branch(&mut self, pc: u64, taken: bool, target: Option<u64>) {
        self.train_branch(pc, self.ghr, taken, target);
    }

    fn history(&self) -> u64 {
        self.ghr
    }

    fn train_branch(&mut self, pc: u64, history: u64, taken: bool, target: Option<u64>) {
        let idx = self.index(pc, history);
        self.table.train(idx, taken);
        self.ghr = ((self.ghr << 1) | u64::from(taken)) & self.history_mask;
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
