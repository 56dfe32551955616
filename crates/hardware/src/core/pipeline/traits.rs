//! Pipeline Latch Interface.
//!
//! This module defines the common trait for inter-stage buffers. Stages are
//! plain functions the controller calls in a fixed order, so only latches
//! share an interface.

/// Represents a pipeline latch (inter-stage buffer).
///
/// Latches hold the state of instructions as they move between stages. They support
/// flushing and status checks.
pub trait PipelineLatch {
    /// Invalidates all entries in the latch.
    ///
    /// Called when a misprediction squashes the younger path. Returns the
    /// number of valid micro-ops that were squashed.
    fn flush(&mut self) -> usize;

    /// Checks if the latch is empty.
    ///
    /// # Returns
    ///
    /// `true` if there are no valid instructions in the latch, `false` otherwise.
    fn is_empty(&self) -> bool;

    /// Checks if the latch contains any instruction carrying a fault.
    fn has_fault(&self) -> bool;
}
