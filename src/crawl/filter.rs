// src/crawl/filter.rs
// =============================================================================
// Decides whether a URL should be skipped entirely.
//
// Patterns come from the "ignoredUrls" list in the configuration. A URL is
// ignored when it matches a pattern in full, not just somewhere inside it:
// the pattern "http://example\.com/.*" ignores every page on that host, but
// the pattern "example" ignores nothing unless the URL is literally "example".
//
// Rust concepts:
// - regex::Regex: compiled regular expressions (compile once, match many)
// - Iterator::any: short-circuiting "does anything match?"
// =============================================================================

use regex::Regex;

// Compiles a pattern so that it only matches the whole input
//
// Wrapping the user pattern in ^(?: ... )$ keeps alternations like "a|b"
// anchored on both branches.
pub fn full_match(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{})$", pattern))
}

// A read-only list of ignore patterns, shared by every crawl task
#[derive(Debug, Clone, Default)]
pub struct UrlFilter {
    patterns: Vec<Regex>,
}

impl UrlFilter {
    // Patterns must already be compiled with full_match()
    pub fn new(patterns: Vec<Regex>) -> Self {
        Self { patterns }
    }

    // Returns true if the URL matches any ignore pattern
    pub fn is_ignored(&self, url: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(url))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(patterns: &[&str]) -> UrlFilter {
        UrlFilter::new(patterns.iter().map(|p| full_match(p).unwrap()).collect())
    }

    #[test]
    fn test_empty_filter_ignores_nothing() {
        let filter = UrlFilter::default();
        assert!(filter.is_empty());
        assert!(!filter.is_ignored("https://example.com/"));
    }

    #[test]
    fn test_pattern_must_match_whole_url() {
        let filter = filter(&["https://example\\.com/private/.*"]);
        assert!(filter.is_ignored("https://example.com/private/page"));
        assert!(!filter.is_ignored("https://example.com/public/page"));
        // A match in the middle of the URL is not enough
        assert!(!filter.is_ignored("https://mirror.net/?u=https://example.com/private/x"));
    }

    #[test]
    fn test_alternation_is_anchored() {
        let filter = filter(&["a|b"]);
        assert!(filter.is_ignored("a"));
        assert!(filter.is_ignored("b"));
        assert!(!filter.is_ignored("ab"));
        assert!(!filter.is_ignored("xb"));
    }

    #[test]
    fn test_any_pattern_matches() {
        let filter = filter(&[".*\\.pdf", ".*/login"]);
        assert_eq!(filter.len(), 2);
        assert!(filter.is_ignored("https://example.com/report.pdf"));
        assert!(filter.is_ignored("https://example.com/login"));
        assert!(!filter.is_ignored("https://example.com/index.html"));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        assert!(full_match("(unclosed").is_err());
    }
}
