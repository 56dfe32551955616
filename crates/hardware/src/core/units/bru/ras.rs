//! Return Address Stack (RAS).
//!
//! A bounded stack of return addresses. Calls push, returns pop. When a push
//! finds the stack full, the oldest entry is dropped so the most recent
//! call chain is always kept.

use std::collections::VecDeque;

/// Return Address Stack structure.
#[derive(Clone, Debug)]
pub struct Ras {
    stack: VecDeque<u64>,
    capacity: usize,
}

impl Ras {
    /// Creates an empty stack holding at most `capacity` addresses.
    pub fn new(capacity: usize) -> Self {
        Self {
            stack: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Pushes a return address, dropping the oldest entry when full.
    pub fn push(&mut self, addr: u64) {
        if self.stack.len() == self.capacity {
            let _ = self.stack.pop_front();
        }
        self.stack.push_back(addr);
    }

    /// Pops the most recent return address.
    pub fn pop(&mut self) -> Option<u64> {
        self.stack.pop_back()
    }

    /// Most recent return address, without removing it.
    pub fn top(&self) -> Option<u64> {
        self.stack.back().copied()
    }

    /// Number of addresses held.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// True if no address is held.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
