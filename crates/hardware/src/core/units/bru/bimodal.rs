//! Bimodal Branch Predictor.
//!
//! One N-bit saturating counter per table entry, indexed by the branch PC
//! alone. Learns each branch's dominant direction; a loop branch costs one
//! mispredict on entry and one on exit.

use super::{BranchPredictor, btb::Btb, counter::CounterTable, ras::Ras};

/// Bimodal predictor structure.
#[derive(Clone, Debug)]
pub struct BimodalPredictor {
    table: CounterTable,
    btb: Btb,
    ras: Option<Ras>,
}

impl BimodalPredictor {
    /// Creates a bimodal predictor over `table`.
    pub const fn new(table: CounterTable, btb: Btb, ras: Option<Ras>) -> Self {
        Self { table, btb, ras }
    }

    const fn index(&self, pc: u64) -> usize {
        self.table.index(pc >> 1)
    }

    /// Counter table, for inspection.
    pub const fn table(&self) -> &CounterTable {
        &self.table
    }
}

impl BranchPredictor for BimodalPredictor {
    fn predict_branch(&self, pc: u64) -> (bool, Option<u64>) {
        if self.table.predict(self.index(pc)) {
            (true, self.btb.lookup(pc))
        } else {
            (false, None)
        }
    }

    fn update_branch(&mut self, pc: u64, taken: bool, target: Option<u64>) {
        let idx = self.index(pc);
        self.table.train(idx, taken);
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
