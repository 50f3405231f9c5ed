// src/profiler/mod.rs
// =============================================================================
// Times how long crawls take.
//
// Profiler::wrap() takes any WebCrawler and returns another WebCrawler that
// behaves exactly the same, except that it also records how long each crawl()
// call took. Times for the same method are added together.
//
// The report looks like:
//   Run at Mon, 19 Oct 2026 10:15:02 +0000
//   wordcrawl::crawl::parallel::ParallelWebCrawler#crawl took 0m 3s 215ms
//
// Rust concepts:
// - Generics: ProfiledCrawler<C> works for any C that implements WebCrawler
// - std::any::type_name: The name of a type, as a string, at compile time
// - Arc: The wrapper and the profiler share one set of timings
// =============================================================================

use crate::crawl::{CrawlRequest, WebCrawler};
use crate::report::CrawlResult;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

// Total time spent in each profiled method
#[derive(Debug, Default)]
pub struct ProfilingState {
    totals: DashMap<String, Duration>,
}

impl ProfilingState {
    pub fn record(&self, method: &str, elapsed: Duration) {
        *self.totals.entry(method.to_string()).or_default() += elapsed;
    }

    pub fn total(&self, method: &str) -> Option<Duration> {
        self.totals.get(method).map(|entry| *entry.value())
    }

    // One line per method, sorted by method name
    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let mut totals: Vec<(String, Duration)> = self
            .totals
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect();
        totals.sort();

        for (method, elapsed) in totals {
            writeln!(writer, "{} took {}", method, format_duration(elapsed))?;
        }
        Ok(())
    }
}

// 3_215ms -> "0m 3s 215ms"
fn format_duration(elapsed: Duration) -> String {
    let total_ms = elapsed.as_millis();
    format!(
        "{}m {}s {}ms",
        total_ms / 60_000,
        (total_ms / 1_000) % 60,
        total_ms % 1_000
    )
}

pub struct Profiler {
    started_at: DateTime<Utc>,
    state: Arc<ProfilingState>,
}

impl Profiler {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            state: Arc::new(ProfilingState::default()),
        }
    }

    // Wraps a crawler so its crawl() calls are timed
    pub fn wrap<C: WebCrawler>(&self, inner: C) -> ProfiledCrawler<C> {
        ProfiledCrawler {
            method: format!("{}#crawl", std::any::type_name::<C>()),
            inner,
            state: Arc::clone(&self.state),
        }
    }

    pub fn state(&self) -> &ProfilingState {
        &self.state
    }

    // Writes the timings to `destination`, or to stdout if it is empty
    pub fn write_data(&self, destination: &str) -> Result<()> {
        if destination.is_empty() {
            let stdout = io::stdout();
            return self.write_to(&mut stdout.lock()).context("Failed to write profile data");
        }

        // Appended, so one file can collect the history of many runs
        let path = Path::new(destination);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open profile file {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)
            .and_then(|_| writer.flush())
            .with_context(|| format!("Failed to write profile file {}", path.display()))
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "Run at {}", self.started_at.to_rfc2822())?;
        self.state.write_to(writer)?;
        writeln!(writer)
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

// A WebCrawler that times every call to the crawler inside it
pub struct ProfiledCrawler<C> {
    inner: C,
    method: String,
    state: Arc<ProfilingState>,
}

impl<C: WebCrawler> WebCrawler for ProfiledCrawler<C> {
    fn crawl(&self, request: &CrawlRequest) -> CrawlResult {
        let started = Instant::now();
        let result = self.inner.crawl(request);
        self.state.record(&self.method, started.elapsed());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::UrlFilter;
    use std::fs;
    use tempfile::TempDir;

    // Sleeps, then returns a fixed result
    struct SlowCrawler;

    impl WebCrawler for SlowCrawler {
        fn crawl(&self, _request: &CrawlRequest) -> CrawlResult {
            std::thread::sleep(Duration::from_millis(20));
            CrawlResult {
                word_counts: vec![("slow".to_string(), 1)],
                urls_visited: 1,
            }
        }
    }

    fn request() -> CrawlRequest {
        CrawlRequest {
            start_urls: vec!["A".to_string()],
            max_depth: 1,
            timeout: Duration::from_secs(1),
            ignored_urls: UrlFilter::default(),
            popular_word_count: 1,
        }
    }

    fn method() -> String {
        format!("{}#crawl", std::any::type_name::<SlowCrawler>())
    }

    #[test]
    fn test_wrapped_crawler_returns_same_result() {
        let profiler = Profiler::new();
        let crawler = profiler.wrap(SlowCrawler);
        assert_eq!(crawler.crawl(&request()), SlowCrawler.crawl(&request()));
    }

    #[test]
    fn test_times_are_summed_per_method() {
        let profiler = Profiler::new();
        let crawler = profiler.wrap(SlowCrawler);
        assert!(profiler.state().total(&method()).is_none());

        crawler.crawl(&request());
        let once = profiler.state().total(&method()).unwrap();
        assert!(once >= Duration::from_millis(20));

        crawler.crawl(&request());
        let twice = profiler.state().total(&method()).unwrap();
        assert!(twice >= once + Duration::from_millis(20));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(3_215)), "0m 3s 215ms");
        assert_eq!(format_duration(Duration::from_millis(125_007)), "2m 5s 7ms");
        assert_eq!(format_duration(Duration::ZERO), "0m 0s 0ms");
    }

    #[test]
    fn test_report_format() {
        let profiler = Profiler::new();
        profiler.state().record("b#crawl", Duration::from_millis(1_500));
        profiler.state().record("a#crawl", Duration::from_millis(5));

        let mut buffer = Vec::new();
        profiler.write_to(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("Run at "));
        assert_eq!(lines[1], "a#crawl took 0m 0s 5ms");
        assert_eq!(lines[2], "b#crawl took 0m 1s 500ms");
        assert_eq!(lines[3], "");
    }

    #[test]
    fn test_write_data_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profile.txt");
        let profiler = Profiler::new();
        profiler.wrap(SlowCrawler).crawl(&request());

        profiler.write_data(path.to_str().unwrap()).unwrap();
        profiler.write_data(path.to_str().unwrap()).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches("Run at ").count(), 2);
        assert_eq!(text.matches(&method()).count(), 2);
    }
}
