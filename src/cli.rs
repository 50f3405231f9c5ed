// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Most settings live in the JSON configuration file; a few of them can be
// overridden from the command line for quick experiments.
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Option<T>: A flag that may or may not have been given
// =============================================================================

use crate::config::ConfigurationBuilder;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "wordcrawl",
    version,
    about = "A parallel web crawler that reports the most popular words it finds",
    long_about = "wordcrawl starts from a set of pages, follows their links up to a maximum depth \
                  and time budget, and reports the most common words across every page it visited."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show debug logs (every page fetched or skipped)
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl the start pages listed in a JSON configuration file
    ///
    /// Example: wordcrawl crawl crawl.json --max-depth 2
    Crawl {
        /// Path to the JSON configuration file
        config: PathBuf,

        #[command(flatten)]
        overrides: Overrides,
    },

    /// Check that a configuration file is valid, without crawling
    ///
    /// Example: wordcrawl check crawl.json
    Check {
        /// Path to the JSON configuration file
        config: PathBuf,
    },
}

// Command-line values that replace the ones from the configuration file
//
// They are applied before validation, so `--max-depth=-1` is rejected just
// like "maxDepth": -1 in the file would be.
#[derive(Args, Debug, Default)]
pub struct Overrides {
    /// Maximum crawl depth (1 = just the start pages)
    #[arg(long, allow_negative_numbers = true)]
    pub max_depth: Option<i64>,

    /// Time budget for the crawl, in seconds
    #[arg(long, allow_negative_numbers = true)]
    pub timeout_seconds: Option<i64>,

    /// Number of worker threads (0 or less = one per CPU core)
    #[arg(long, allow_negative_numbers = true)]
    pub parallelism: Option<i64>,

    /// How many popular words to report
    #[arg(long, allow_negative_numbers = true)]
    pub popular_word_count: Option<i64>,

    /// Append the result JSON to this file instead of printing it
    #[arg(long)]
    pub result_path: Option<String>,

    /// Append profiling data to this file instead of printing it
    #[arg(long)]
    pub profile_output_path: Option<String>,
}

impl Overrides {
    pub fn apply(&self, builder: &mut ConfigurationBuilder) {
        if let Some(max_depth) = self.max_depth {
            builder.max_depth = max_depth;
        }
        if let Some(timeout_seconds) = self.timeout_seconds {
            builder.timeout_seconds = timeout_seconds;
        }
        if let Some(parallelism) = self.parallelism {
            builder.parallelism = parallelism;
        }
        if let Some(popular_word_count) = self.popular_word_count {
            builder.popular_word_count = popular_word_count;
        }
        if let Some(result_path) = &self.result_path {
            builder.result_path = result_path.clone();
        }
        if let Some(profile_output_path) = &self.profile_output_path {
            builder.profile_output_path = profile_output_path.clone();
        }
    }
}
