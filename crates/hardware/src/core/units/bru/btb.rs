//! Branch Target Buffer (BTB).
//!
//! A direct-mapped table of `(pc, target)` pairs. Indexing drops bit 0 only,
//! since compressed instructions sit on 2-byte boundaries; the full PC is
//! kept as the tag so aliasing entries never hand out a foreign target.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct BtbEntry {
    tag: u64,
    target: u64,
    valid: bool,
}

/// Branch Target Buffer structure.
#[derive(Clone, Debug)]
pub struct Btb {
    table: Vec<BtbEntry>,
    mask: usize,
}

impl Btb {
    /// Creates an empty BTB of `size` entries (a power of two).
    pub fn new(size: usize) -> Self {
        Self {
            table: vec![BtbEntry::default(); size],
            mask: size - 1,
        }
    }

    const fn index(&self, pc: u64) -> usize {
        (pc >> 1) as usize & self.mask
    }

    /// Target recorded for `pc`, if any.
    pub fn lookup(&self, pc: u64) -> Option<u64> {
        let e = self.table[self.index(pc)];
        (e.valid && e.tag == pc).then_some(e.target)
    }

    /// Records `target` for `pc`, evicting whatever shared the slot.
    pub fn update(&mut self, pc: u64, target: u64) {
        let idx = self.index(pc);
        self.table[idx] = BtbEntry {
            tag: pc,
            target,
            valid: true,
        };
    }
}
