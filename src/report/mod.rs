// src/report/mod.rs
// =============================================================================
// The outcome of a crawl and how it gets written out.
//
// Output format (JSON):
//   {
//     "wordCounts": { "rust": 12, "crawler": 9, ... },
//     "urlsVisited": 4
//   }
//
// "wordCounts" keeps the ranked order: most popular word first.
// =============================================================================

mod writer;

pub use writer::CrawlResultWriter;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResult {
    /// Most popular words, highest count first
    #[serde(serialize_with = "ranked_map")]
    pub word_counts: Vec<(String, usize)>,
    /// Number of distinct pages the crawler tried to fetch
    pub urls_visited: usize,
}

// Writes the ranked pairs as a JSON object, keeping their order
#[allow(clippy::ptr_arg)]
fn ranked_map<S: Serializer>(words: &Vec<(String, usize)>, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(words.len()))?;
    for (word, count) in words {
        map.serialize_entry(word, count)?;
    }
    map.end()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape_keeps_rank_order() {
        let result = CrawlResult {
            word_counts: vec![("zebra".to_string(), 9), ("apple".to_string(), 2)],
            urls_visited: 3,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"wordCounts":{"zebra":9,"apple":2},"urlsVisited":3}"#);
    }

    #[test]
    fn test_empty_result() {
        let json = serde_json::to_string(&CrawlResult::default()).unwrap();
        assert_eq!(json, r#"{"wordCounts":{},"urlsVisited":0}"#);
    }
}
