// src/crawl/mod.rs
// =============================================================================
// This module is the parallel crawl engine.
//
// Features:
// - Recursive fan-out: every fetched page spawns one task per link
// - Each URL is fetched at most once per crawl, however it is reached
// - Depth limit and a wall-clock deadline to stop the crawl
// - Word counts from all pages are merged into one ranked report
//
// Submodules (leaves first):
// - filter: Ignored-URL patterns
// - visited: Concurrent set of claimed URLs
// - tally: Concurrent word counter
// - ranker: Picks the most popular words
// - task: One unit of crawl work
// - scheduler: The worker pool tasks run on
// - parallel: ParallelWebCrawler, which ties it all together
// =============================================================================

pub mod filter;
mod parallel;
mod ranker;
mod scheduler;
mod tally;
mod task;
mod visited;

// Re-export the pieces the rest of the program uses
pub use filter::UrlFilter;
pub use parallel::{CrawlRequest, ParallelWebCrawler, WebCrawler};
