// src/crawl/visited.rs
// =============================================================================
// The set of URLs that some crawl task has already claimed.
//
// Every task of one crawl shares a single VisitedSet. Before fetching a page a
// task calls try_claim(); only the caller that gets `true` back may fetch it.
// That is what stops two tasks that reached the same page through different
// links from downloading it twice.
//
// Rust concepts:
// - DashSet: a concurrent HashSet split into shards, each behind its own lock
// - &self methods that mutate: interior mutability, safe across threads
// =============================================================================

use dashmap::DashSet;

#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: DashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    // Atomically inserts the URL if it is absent
    //
    // Returns true exactly once per distinct URL, no matter how many threads
    // race on it. DashSet::insert locks one shard for the check-and-insert.
    pub fn try_claim(&self, url: &str) -> bool {
        if self.urls.contains(url) {
            return false;
        }
        self.urls.insert(url.to_string())
    }

    // Number of claimed URLs. Only meaningful once every task has finished.
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why not Mutex<HashSet<String>>?
//    - It would work, but every claim would wait on the same lock
//    - DashSet splits the set into shards, so claims for different URLs
//      rarely wait on each other
//
// 2. Why does try_claim() check contains() first?
//    - insert() needs an owned String, so it allocates
//    - Most links point at pages that are already claimed, so the cheap
//      check skips that allocation most of the time
//    - insert() still decides the winner, so the race stays safe
// -----------------------------------------------------------------------------
