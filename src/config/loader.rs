// src/config/loader.rs
// =============================================================================
// Loads a crawl configuration from a JSON file.
//
// Unknown fields are ignored, so older or newer configuration files still
// load. Missing fields take their defaults (see ConfigurationBuilder).
// =============================================================================

use super::{ConfigError, ConfigurationBuilder, CrawlerConfiguration};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

pub struct ConfigurationLoader {
    path: PathBuf,
}

impl ConfigurationLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Reads and validates the configuration file
    pub fn load(&self) -> Result<CrawlerConfiguration, ConfigError> {
        self.load_builder()?.build()
    }

    // Reads the file without validating it, so callers can apply overrides
    // (for example from the command line) before calling build()
    pub fn load_builder(&self) -> Result<ConfigurationBuilder, ConfigError> {
        let file = File::open(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;
        Self::read(BufReader::new(file))
    }

    // Parses configuration JSON from any reader
    pub fn read<R: Read>(reader: R) -> Result<ConfigurationBuilder, ConfigError> {
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_full_configuration() {
        let json = r#"{
            "startPages": ["https://example.com/", "https://example.org/"],
            "ignoredUrls": ["https://example\\.com/private/.*"],
            "ignoredWords": ["^.{1,3}$"],
            "parallelism": 4,
            "implementationOverride": "ignored",
            "maxDepth": 10,
            "timeoutSeconds": 2,
            "popularWordCount": 3,
            "profileOutputPath": "profile.txt",
            "resultPath": "result.json"
        }"#;

        let builder = ConfigurationLoader::read(json.as_bytes()).unwrap();
        assert_eq!(builder.start_pages.len(), 2);
        assert_eq!(builder.parallelism, 4);

        let config = builder.build().unwrap();
        assert_eq!(config.max_depth, 10);
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert_eq!(config.popular_word_count, 3);
        assert_eq!(config.ignored_urls.len(), 1);
        assert_eq!(config.ignored_words.len(), 1);
        assert_eq!(config.profile_output_path, "profile.txt");
        assert_eq!(config.result_path, "result.json");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let builder = ConfigurationLoader::read(r#"{"maxDepth": 2}"#.as_bytes()).unwrap();
        assert_eq!(
            builder,
            ConfigurationBuilder {
                max_depth: 2,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_malformed_json() {
        let result = ConfigurationLoader::read("{ not json".as_bytes());
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"startPages": ["file:///tmp/a.html"], "maxDepth": 1}}"#).unwrap();

        let loader = ConfigurationLoader::new(file.path());
        assert_eq!(loader.path(), file.path());

        let config = loader.load().unwrap();
        assert_eq!(config.start_pages, vec!["file:///tmp/a.html"]);
        assert_eq!(config.max_depth, 1);
    }

    #[test]
    fn test_load_validates() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"timeoutSeconds": 0}}"#).unwrap();

        let result = ConfigurationLoader::new(file.path()).load();
        assert!(matches!(result, Err(ConfigError::NonPositiveTimeout(0))));
    }

    #[test]
    fn test_missing_file() {
        let result = ConfigurationLoader::new("/definitely/not/here.json").load();
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
