// src/config/mod.rs
// =============================================================================
// Crawl configuration: what to crawl, how deep, for how long, and where the
// output goes.
//
// A configuration is a JSON file like:
//   {
//     "startPages": ["https://example.com/"],
//     "ignoredUrls": ["https://example\\.com/private/.*"],
//     "ignoredWords": ["^.{1,3}$"],
//     "parallelism": 4,
//     "maxDepth": 3,
//     "timeoutSeconds": 10,
//     "popularWordCount": 5,
//     "profileOutputPath": "profile.txt",
//     "resultPath": "result.json"
//   }
//
// Every field is optional. Loading happens in two steps:
// 1. ConfigurationBuilder: the raw JSON values, exactly as written
// 2. build(): checks the values and compiles the patterns, producing a
//    CrawlerConfiguration that the rest of the program can trust
//
// Submodules:
// - loader: Reads a ConfigurationBuilder from a file or any reader
// =============================================================================

mod loader;

pub use loader::ConfigurationLoader;

use crate::crawl::filter::full_match;
use crate::crawl::{CrawlRequest, UrlFilter};
use regex::Regex;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

// Anything that stops a configuration from being used
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("maxDepth cannot be negative (got {0})")]
    NegativeMaxDepth(i64),

    #[error("timeoutSeconds must be positive (got {0})")]
    NonPositiveTimeout(i64),

    #[error("popularWordCount cannot be negative (got {0})")]
    NegativePopularWordCount(i64),

    #[error("invalid {field} pattern '{pattern}': {source}")]
    Pattern {
        field: &'static str,
        pattern: String,
        source: regex::Error,
    },
}

// The configuration as written in JSON, before any checks
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigurationBuilder {
    pub start_pages: Vec<String>,
    pub ignored_urls: Vec<String>,
    pub ignored_words: Vec<String>,
    pub parallelism: i64,
    pub max_depth: i64,
    pub timeout_seconds: i64,
    pub popular_word_count: i64,
    pub profile_output_path: String,
    pub result_path: String,
}

impl Default for ConfigurationBuilder {
    fn default() -> Self {
        Self {
            start_pages: Vec::new(),
            ignored_urls: Vec::new(),
            ignored_words: Vec::new(),
            parallelism: -1,
            max_depth: 0,
            timeout_seconds: 1,
            popular_word_count: 0,
            profile_output_path: String::new(),
            result_path: String::new(),
        }
    }
}

impl ConfigurationBuilder {
    // Validates every field and compiles the patterns
    pub fn build(self) -> Result<CrawlerConfiguration, ConfigError> {
        if self.max_depth < 0 {
            return Err(ConfigError::NegativeMaxDepth(self.max_depth));
        }
        if self.timeout_seconds <= 0 {
            return Err(ConfigError::NonPositiveTimeout(self.timeout_seconds));
        }
        if self.popular_word_count < 0 {
            return Err(ConfigError::NegativePopularWordCount(self.popular_word_count));
        }

        Ok(CrawlerConfiguration {
            start_pages: dedup(self.start_pages),
            ignored_urls: compile("ignoredUrls", self.ignored_urls)?,
            ignored_words: compile("ignoredWords", self.ignored_words)?,
            // Zero or less means "use every core"
            parallelism: usize::try_from(self.parallelism).unwrap_or(0),
            max_depth: usize::try_from(self.max_depth).unwrap_or(usize::MAX),
            timeout: Duration::from_secs(self.timeout_seconds.unsigned_abs()),
            popular_word_count: usize::try_from(self.popular_word_count).unwrap_or(usize::MAX),
            profile_output_path: self.profile_output_path,
            result_path: self.result_path,
        })
    }
}

// A checked configuration, ready to crawl with
#[derive(Debug, Clone)]
pub struct CrawlerConfiguration {
    /// Start pages in the order given, duplicates removed
    pub start_pages: Vec<String>,
    /// URLs matching any of these (in full) are never fetched
    pub ignored_urls: Vec<Regex>,
    /// Words matching any of these (in full) are never counted
    pub ignored_words: Vec<Regex>,
    /// Requested worker count; 0 = one per core
    pub parallelism: usize,
    pub max_depth: usize,
    pub timeout: Duration,
    pub popular_word_count: usize,
    /// Where profiling data is appended; empty = stdout
    pub profile_output_path: String,
    /// Where the crawl result is appended; empty = stdout
    pub result_path: String,
}

impl CrawlerConfiguration {
    // The part of the configuration the crawl engine needs
    pub fn crawl_request(&self) -> CrawlRequest {
        CrawlRequest {
            start_urls: self.start_pages.clone(),
            max_depth: self.max_depth,
            timeout: self.timeout,
            ignored_urls: UrlFilter::new(self.ignored_urls.clone()),
            popular_word_count: self.popular_word_count,
        }
    }
}

// Removes duplicates but keeps the first occurrence of each entry in place
fn dedup(values: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

fn compile(field: &'static str, patterns: Vec<String>) -> Result<Vec<Regex>, ConfigError> {
    dedup(patterns)
        .into_iter()
        .map(|pattern| {
            full_match(&pattern).map_err(|source| ConfigError::Pattern {
                field,
                pattern,
                source,
            })
        })
        .collect()
}
