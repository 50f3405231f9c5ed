// src/fetcher/mod.rs
// =============================================================================
// This module turns a URL into the two things the crawler cares about:
// the links on the page and how often each word appears on it.
//
// Submodules:
// - html: Extracts links and word counts from an HTML document
// - http: HtmlFetcher, which downloads pages over HTTP(S) or reads file:// URLs
// - stub: An in-memory link graph used by the crawler's tests
//
// The crawl engine only ever talks to the PageFetcher trait, so it neither
// knows nor cares whether pages come from the network or from a test.
//
// Rust concepts:
// - Traits: A shared interface that several types can implement
// - async-trait: Lets a trait declare async methods and be used as dyn Trait
// - thiserror: Derives std::error::Error for our error enum
// =============================================================================

mod html;
mod http;
#[cfg(test)]
pub mod stub;

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

pub use html::parse_page;
pub use http::HtmlFetcher;

// Everything the crawler needs from one fetched page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContents {
    /// Absolute URLs linked from the page, in document order
    pub links: Vec<String>,
    /// How many times each word occurs on the page
    pub word_counts: HashMap<String, usize>,
}

// Why a single page could not be fetched
//
// A FetchError only ever affects the one URL it was returned for.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL could not be parsed at all
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    /// Anything other than http, https or file
    #[error("unsupported URL scheme '{0}'")]
    UnsupportedScheme(String),

    /// The server answered, but not with 2xx
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// Connection, TLS, timeout or body decoding problems
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A file:// URL that does not map to a local path
    #[error("not a local file URL: {0}")]
    NotAFile(String),

    /// A file:// URL whose file could not be read
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

// The one operation the crawl engine needs from the outside world
//
// Implementations must be shareable across the scheduler's worker threads.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<PageContents, FetchError>;
}
