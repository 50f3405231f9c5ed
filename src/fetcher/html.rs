// src/fetcher/html.rs
// =============================================================================
// This module extracts links and words from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// We also use the `url` crate to:
// - Resolve relative URLs to absolute URLs
// - Drop #fragments so "page#a" and "page#b" count as the same page
//
// Words are the text of the document (minus <script> and <style>), split on
// whitespace, stripped of anything that isn't a letter or digit, lowercased.
// Words that fully match one of the configured "ignoredWords" patterns are
// not counted.
//
// Rust concepts:
// - Iterators: For processing collections
// - Closures: Anonymous functions (|x| ...)
// - Option: For links that can't be resolved
// =============================================================================

use super::PageContents;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use url::Url;

// Parses one HTML document into its links and word counts
//
// Parameters:
//   html: the HTML content to parse (borrowed as &str)
//   page_url: the URL of the page (for resolving relative links)
//   ignored_words: full-match patterns for words that should not be counted
//
// Example:
//   html = "<p>Hello hello</p><a href='/docs'>Docs</a>"
//   page_url = "https://example.com"
//   links = ["https://example.com/docs"]
//   word_counts = {"hello": 2, "docs": 1}
pub fn parse_page(html: &str, page_url: &Url, ignored_words: &[Regex]) -> PageContents {
    // Parse the HTML into a document
    let document = Html::parse_document(html);

    PageContents {
        links: extract_links(&document, page_url),
        word_counts: count_words(document.root_element(), ignored_words),
    }
}

// Finds every <a href> and resolves it against the page URL
fn extract_links(document: &Html, base: &Url) -> Vec<String> {
    // Create a CSS selector to find all <a> tags with an href
    // "a[href]" is a constant, valid selector, so this never fails
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(base, href))
        .collect()
}

// Resolves a link (possibly relative) to an absolute, crawlable URL
//
// Returns None for:
// - in-page anchors ("#section")
// - mailto:, tel:, javascript:, data: and other non-page schemes
// - hrefs that don't form a valid URL
fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    // join() handles both absolute ("https://...") and relative ("../x") hrefs
    let mut url = base.join(href).ok()?;
    url.set_fragment(None);

    match url.scheme() {
        "http" | "https" | "file" => Some(url.to_string()),
        _ => None,
    }
}

// Counts the words in every text node that isn't script or style source
fn count_words(root: ElementRef<'_>, ignored_words: &[Regex]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();

    for node in root.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let in_code = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| matches!(element.name(), "script" | "style"))
        });
        if in_code {
            continue;
        }

        for raw in text.split_whitespace() {
            let word = normalize_word(raw);
            if word.is_empty() || ignored_words.iter().any(|pattern| pattern.is_match(&word)) {
                continue;
            }
            *counts.entry(word).or_insert(0) += 1;
        }
    }

    counts
}

// "Hello," -> "hello", "don't" -> "dont", "--" -> ""
fn normalize_word(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::filter::full_match;

    fn base() -> Url {
        Url::parse("https://example.com/page/").unwrap()
    }

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<a href="https://www.rust-lang.org">Rust</a>"#;
        let page = parse_page(html, &base(), &[]);
        assert_eq!(page.links, vec!["https://www.rust-lang.org/"]);
    }

    #[test]
    fn test_resolve_relative_links_in_order() {
        let html = r#"
            <a href="/docs">Docs</a>
            <a href="../about">About</a>
            <a href="child.html#intro">Child</a>
        "#;
        let page = parse_page(html, &base(), &[]);
        assert_eq!(
            page.links,
            vec![
                "https://example.com/docs",
                "https://example.com/about",
                "https://example.com/page/child.html",
            ]
        );
    }

    #[test]
    fn test_skip_anchor_and_special_schemes() {
        let html = r##"
            <a href="#section">Top</a>
            <a href="mailto:test@example.com">Email</a>
            <a href="javascript:void(0)">Click</a>
            <a href="tel:+123">Call</a>
        "##;
        let page = parse_page(html, &base(), &[]);
        assert!(page.links.is_empty());
    }

    #[test]
    fn test_count_words_normalizes() {
        let html = "<html><head><title>Rust</title></head>\
                    <body><p>Hello, hello WORLD!</p><p>rust -- rust</p></body></html>";
        let page = parse_page(html, &base(), &[]);
        assert_eq!(page.word_counts.get("hello"), Some(&2));
        assert_eq!(page.word_counts.get("world"), Some(&1));
        assert_eq!(page.word_counts.get("rust"), Some(&3));
        assert_eq!(page.word_counts.len(), 3);
    }

    #[test]
    fn test_script_and_style_are_not_words() {
        let html = "<body><script>var secret = 1;</script>\
                    <style>.hidden { color: red }</style><p>visible</p></body>";
        let page = parse_page(html, &base(), &[]);
        assert_eq!(page.word_counts.keys().collect::<Vec<_>>(), vec!["visible"]);
    }

    #[test]
    fn test_ignored_words_are_dropped() {
        let ignored = vec![full_match("^.{1,3}$").unwrap(), full_match("lorem").unwrap()];
        let html = "<p>the lorem crawler is a crawler</p>";
        let page = parse_page(html, &base(), &ignored);
        assert_eq!(page.word_counts.get("crawler"), Some(&2));
        assert_eq!(page.word_counts.len(), 1);
    }
}
