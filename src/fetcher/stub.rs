// src/fetcher/stub.rs
// =============================================================================
// A PageFetcher backed by a fixed, in-memory link graph.
//
// The crawler's tests use it to build exact graphs (cycles, shared children,
// broken pages, slow pages) and then check which URLs were really fetched.
// Only compiled for tests.
// =============================================================================

use super::{FetchError, PageContents, PageFetcher};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct StubFetcher {
    pages: HashMap<String, PageContents>,
    delays: HashMap<String, Duration>,
    panics: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    // Adds a page with the given outgoing links and (word, count) pairs
    pub fn page(mut self, url: &str, links: &[&str], words: &[(&str, usize)]) -> Self {
        self.pages.insert(
            url.to_string(),
            PageContents {
                links: links.iter().map(|l| l.to_string()).collect(),
                word_counts: words.iter().map(|(w, c)| (w.to_string(), *c)).collect(),
            },
        );
        self
    }

    // Makes fetching `url` take at least `delay`
    pub fn slow(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }

    // Makes fetching `url` panic
    pub fn panicking(mut self, url: &str) -> Self {
        self.panics.push(url.to_string());
        self
    }

    // Every URL fetch() was called with, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    // Every URL fetch() was called with, sorted
    pub fn sorted_calls(&self) -> Vec<String> {
        let mut calls = self.calls();
        calls.sort();
        calls
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<PageContents, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());

        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }
        if self.panics.iter().any(|p| p == url) {
            panic!("stub fetcher told to panic on {url}");
        }

        // Pages not in the graph behave like a 404
        self.pages.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}
