// src/fetcher/http.rs
// =============================================================================
// HtmlFetcher: the production PageFetcher.
//
// Key functionality:
// - Downloads http:// and https:// pages with one shared reqwest Client
// - Reads file:// URLs straight from disk (handy for offline crawls)
// - Treats any non-2xx status as a failure for that one page
// - Hands the HTML to parse_page() for links and word counts
//
// There are no retries here. A page that fails is simply skipped by the
// crawler, so one dead link can't hold up the rest of the crawl.
//
// Rust concepts:
// - async/await: For network and file I/O
// - Result<T, E> and ?: For error propagation
// - Client cloning: reqwest's Client is a cheap handle to a connection pool
// =============================================================================

use super::{parse_page, FetchError, PageContents, PageFetcher};
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use std::time::Duration;
use tracing::trace;
use url::Url;

const USER_AGENT: &str = concat!("wordcrawl/", env!("CARGO_PKG_VERSION"));

pub struct HtmlFetcher {
    client: Client,
    ignored_words: Vec<Regex>,
}

impl HtmlFetcher {
    // Creates a fetcher that drops words matching any of `ignored_words`
    //
    // The patterns must already be compiled for full matches
    // (see crawl::filter::full_match).
    pub fn new(ignored_words: Vec<Regex>) -> Result<Self, FetchError> {
        // Create an HTTP client with reasonable settings
        // We'll reuse this client for all requests (connection pooling)
        let client = Client::builder()
            .timeout(Duration::from_secs(10)) // 10 second timeout per request
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            ignored_words,
        })
    }

    // Downloads a web page and returns its HTML content
    async fn fetch_http(&self, url: &Url) -> Result<String, FetchError> {
        let response = self.client.get(url.as_str()).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    // Reads a local HTML file named by a file:// URL
    async fn read_file(&self, url: &Url) -> Result<String, FetchError> {
        let path = url
            .to_file_path()
            .map_err(|_| FetchError::NotAFile(url.to_string()))?;

        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| FetchError::Io { path, source })
    }
}

#[async_trait]
impl PageFetcher for HtmlFetcher {
    async fn fetch(&self, url: &str) -> Result<PageContents, FetchError> {
        let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let html = match parsed.scheme() {
            "http" | "https" => self.fetch_http(&parsed).await?,
            "file" => self.read_file(&parsed).await?,
            other => return Err(FetchError::UnsupportedScheme(other.to_string())),
        };

        trace!(url, bytes = html.len(), "downloaded page");
        Ok(parse_page(&html, &parsed, &self.ignored_words))
    }
}
