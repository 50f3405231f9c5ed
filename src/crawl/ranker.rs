// src/crawl/ranker.rs
// =============================================================================
// Picks the most popular words out of the final tally.
//
// Order:
//   1. count, highest first
//   2. word length, longest first   ("crawler" before "crawl" on a tie)
//   3. alphabetical                 ("cat" before "dog" on a tie)
//
// Every word is unique in the tally, so this is a total order and the output
// is the same on every run regardless of HashMap iteration order.
// =============================================================================

use std::cmp::Ordering;
use std::collections::HashMap;

// Returns at most `limit` (word, count) pairs, most popular first
pub fn popular_words(counts: &HashMap<String, usize>, limit: usize) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = counts
        .iter()
        .map(|(word, count)| (word.clone(), *count))
        .collect();

    ranked.sort_unstable_by(|a, b| compare(a, b));
    ranked.truncate(limit);
    ranked
}

fn compare((word_a, count_a): &(String, usize), (word_b, count_b): &(String, usize)) -> Ordering {
    count_b
        .cmp(count_a)
        .then_with(|| word_b.len().cmp(&word_a.len()))
        .then_with(|| word_a.cmp(word_b))
}
