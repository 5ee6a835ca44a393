//! Progress tracking across topics.

use std::collections::BTreeSet;

/// Rows the student has marked as mastered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MasteryTracker {
    mastered: BTreeSet<usize>,
}

impl MasteryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the state of a row; returns whether it is now mastered.
    pub fn toggle(&mut self, row_index: usize) -> bool {
        if self.mastered.remove(&row_index) {
            false
        } else {
            self.mastered.insert(row_index);
            true
        }
    }

    pub fn mark(&mut self, row_index: usize) {
        self.mastered.insert(row_index);
    }

    pub fn is_mastered(&self, row_index: usize) -> bool {
        self.mastered.contains(&row_index)
    }

    pub fn count(&self) -> usize {
        self.mastered.len()
    }

    pub fn mastered(&self) -> impl Iterator<Item = usize> + '_ {
        self.mastered.iter().copied()
    }

    /// Share of the corpus mastered, 0..=100. Rows past `corpus_len` are ignored.
    pub fn percent(&self, corpus_len: usize) -> u8 {
        if corpus_len == 0 {
            return 0;
        }
        let within = self.mastered.range(..corpus_len).count();
        u8::try_from(within * 100 / corpus_len).unwrap_or(100)
    }

    /// Drops rows that no longer exist after a reload.
    pub fn retain_within(&mut self, corpus_len: usize) {
        self.mastered.retain(|&index| index < corpus_len);
    }

    pub fn reset(&mut self) {
        self.mastered.clear();
    }
}
