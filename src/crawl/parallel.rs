// src/crawl/parallel.rs
// =============================================================================
// ParallelWebCrawler: runs a whole crawl and builds the final report.
//
// How it works:
// 1. Work out the deadline (now + timeout)
// 2. Create an empty visited set and word tally for this crawl
// 3. Start one root task per start page, all on the same worker pool
// 4. Once every task tree has finished, rank the words and count the pages
//
// Nothing is reported until the very end, so the result is always built
// from a finished crawl.
// =============================================================================

use super::filter::UrlFilter;
use super::ranker::popular_words;
use super::scheduler::Scheduler;
use super::task::{CrawlContext, CrawlTask};
use crate::fetcher::PageFetcher;
use crate::report::CrawlResult;
use anyhow::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

// Everything one crawl needs to know
#[derive(Debug, Clone)]
pub struct CrawlRequest {
    /// Pages to start from, without duplicates
    pub start_urls: Vec<String>,
    /// How many link hops to follow; 1 = only the start pages
    pub max_depth: usize,
    /// Wall-clock budget; no new page fetch starts after it runs out
    pub timeout: Duration,
    /// URLs that are never fetched
    pub ignored_urls: UrlFilter,
    /// How many words to put in the report
    pub popular_word_count: usize,
}

// Anything that can turn a CrawlRequest into a CrawlResult
//
// The profiler wraps implementations of this trait.
pub trait WebCrawler {
    fn crawl(&self, request: &CrawlRequest) -> CrawlResult;
}

pub struct ParallelWebCrawler {
    fetcher: Arc<dyn PageFetcher>,
    scheduler: Scheduler,
}

impl ParallelWebCrawler {
    // Creates a crawler whose pool has at most `parallelism` workers
    // (0 = one per core). The pool is reused by every crawl.
    pub fn new(fetcher: Arc<dyn PageFetcher>, parallelism: usize) -> Result<Self> {
        Ok(Self {
            fetcher,
            scheduler: Scheduler::new(parallelism)?,
        })
    }

    pub fn parallelism(&self) -> usize {
        self.scheduler.workers()
    }
}

impl WebCrawler for ParallelWebCrawler {
    fn crawl(&self, request: &CrawlRequest) -> CrawlResult {
        let started = Instant::now();
        let deadline = started.checked_add(request.timeout);

        let context = Arc::new(CrawlContext::new(
            Arc::clone(&self.fetcher),
            request.ignored_urls.clone(),
            deadline,
        ));

        info!(
            start_pages = request.start_urls.len(),
            max_depth = request.max_depth,
            timeout_ms = request.timeout.as_millis() as u64,
            ignore_patterns = request.ignored_urls.len(),
            workers = self.scheduler.workers(),
            "starting crawl"
        );

        let roots = request
            .start_urls
            .iter()
            .map(|url| CrawlTask::new(url.clone(), request.max_depth, Arc::clone(&context)))
            .collect();
        self.scheduler.run_all(roots);

        // Every task has finished, so nothing is writing to the context now
        let urls_visited = context.visited.len();
        let word_counts = popular_words(&context.tally.snapshot(), request.popular_word_count);

        info!(
            urls_visited,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "crawl finished"
        );

        CrawlResult {
            word_counts,
            urls_visited,
        }
    }
}
