// src/crawl/tally.rs
// =============================================================================
// Running word counts across every page fetched during a crawl.
//
// Many tasks finish pages at the same time and all of them add their counts
// here. merge() does the add-or-insert while holding the lock of the one
// shard that owns the word, so two tasks adding to "rust" at the same moment
// can never lose an update.
//
// Rust concepts:
// - DashMap::entry: lock a single key, then modify or insert in place
// - HashMap: the plain, single-threaded snapshot handed to the ranker
// =============================================================================

use dashmap::DashMap;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct WordTally {
    counts: DashMap<String, usize>,
}

impl WordTally {
    pub fn new() -> Self {
        Self::default()
    }

    // Adds `delta` to the count for `word`, starting from 0 if unseen
    pub fn merge(&self, word: &str, delta: usize) {
        if let Some(mut count) = self.counts.get_mut(word) {
            *count += delta;
            return;
        }
        *self.counts.entry(word.to_string()).or_insert(0) += delta;
    }

    // Merges every (word, count) pair from one page
    pub fn merge_all(&self, page_counts: &HashMap<String, usize>) {
        for (word, count) in page_counts {
            self.merge(word, *count);
        }
    }

    // Copies the counts out. Call only after all writers have finished.
    pub fn snapshot(&self) -> HashMap<String, usize> {
        self.counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
