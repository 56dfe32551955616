//! Saturating counter tables.
//!
//! Shared by the bimodal and gshare predictors. Each entry is an N-bit
//! counter that saturates at `0` and `2^N - 1`; an entry predicts taken when
//! it sits in the upper half of its range.

/// A table of N-bit saturating counters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterTable {
    counters: Vec<u8>,
    max: u8,
    threshold: u8,
    mask: usize,
}

impl CounterTable {
    /// Creates `2^index_bits` counters of `bits` width, each set to `initial`.
    ///
    /// Values are validated by the configuration layer: `bits` is 1..=8 and
    /// `initial` fits in `bits`.
    pub fn new(index_bits: usize, bits: u8, initial: u8) -> Self {
        let max = ((1u16 << bits) - 1) as u8;
        Self {
            counters: vec![initial.min(max); 1 << index_bits],
            max,
            threshold: 1 << (bits - 1),
            mask: (1 << index_bits) - 1,
        }
    }

    /// Number of counters.
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// True if the table has no counters.
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Masks an arbitrary hash into a table index.
    #[inline]
    pub const fn index(&self, hash: u64) -> usize {
        hash as usize & self.mask
    }

    /// Raw counter value at `idx`.
    #[inline]
    pub fn value(&self, idx: usize) -> u8 {
        self.counters[idx & self.mask]
    }

    /// True if the counter at `idx` predicts taken.
    #[inline]
    pub fn predict(&self, idx: usize) -> bool {
        self.value(idx) >= self.threshold
    }

    /// Moves the counter at `idx` one step towards the outcome.
    #[inline]
    pub fn train(&mut self, idx: usize, taken: bool) {
        let c = &mut self.counters[idx & self.mask];
        *c = if taken {
            c.saturating_add(1).min(self.max)
        } else {
            c.saturating_sub(1)
        };
    }
}
