//! Which clusters are currently expanded, keyed by position in `clusters`.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    open: BTreeSet<usize>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `index`. Returns whether it is now expanded.
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.open.remove(&index) {
            false
        } else {
            self.open.insert(index);
            true
        }
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.open.contains(&index)
    }

    pub fn reset(&mut self) {
        self.open.clear();
    }

    /// Open every cluster in `0..count`.
    pub fn expand_all(&mut self, count: usize) {
        self.open.extend(0..count);
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}
