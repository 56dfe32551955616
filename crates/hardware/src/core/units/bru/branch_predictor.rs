//! Branch Predictor Interface.
//!
//! This module defines the `BranchPredictor` trait shared by every direction
//! predictor. Besides the direction table, each predictor owns a Branch Target
//! Buffer for target hints and, when enabled, a Return Address Stack.
//!
//! Predictions are pure functions of the current tables. Every mutation
//! happens after the transfer has resolved.

/// Trait for branch prediction algorithms.
pub trait BranchPredictor {
    /// Predicts a conditional branch at `pc`.
    ///
    /// Returns `(taken, target_hint)`. The hint comes from the BTB and is
    /// `None` for a not-taken prediction or a BTB miss.
    fn predict_branch(&self, pc: u64) -> (bool, Option<u64>);

    /// Trains the predictor with a resolved conditional branch.
    ///
    /// `target` is the taken target, recorded in the BTB when present.
    fn update_branch(&mut self, pc: u64, taken: bool, target: Option<u64>);

    /// Global history the next prediction is made under.
    ///
    /// Fetch records it with each micro-op so that resolution trains the
    /// entry that made the prediction. Zero for history-free predictors.
    fn history(&self) -> u64 {
        0
    }

    /// Trains the entry selected at fetch time under `history`.
    fn train_branch(&mut self, pc: u64, _history: u64, taken: bool, target: Option<u64>) {
        self.update_branch(pc, taken, target);
    }

    /// Looks up the BTB for a jump at `pc`.
    fn predict_btb(&self, pc: u64) -> Option<u64>;

    /// Records the target of a resolved jump in the BTB.
    fn update_btb(&mut self, pc: u64, target: u64);

    /// Records a resolved call: pushes `ret_addr` and learns the call target.
    fn on_call(&mut self, pc: u64, ret_addr: u64, target: u64);

    /// Predicted target of a return; `None` when the stack is empty or disabled.
    fn predict_return(&self) -> Option<u64>;

    /// Records a resolved return by popping the stack.
    fn on_return(&mut self);
}
