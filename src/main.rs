// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (to stderr, so JSON on stdout stays clean)
// 3. Load and validate the JSON configuration
// 4. Build the crawler, wrap it in the profiler, and run the crawl
// 5. Write the result and the profiling data
// 6. Exit with proper code (0 = success, 2 = error)
//
// Note that main() is not async. The crawler owns its own tokio runtime
// (the worker pool) and blocks until the crawl is done.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;      // src/cli.rs - command-line parsing
mod config;   // src/config/ - JSON configuration loading and validation
mod crawl;    // src/crawl/ - the parallel crawl engine
mod fetcher;  // src/fetcher/ - downloading and parsing pages
mod profiler; // src/profiler/ - timing crawl calls
mod report;   // src/report/ - the crawl result and its JSON writer

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, Overrides};
use config::ConfigurationLoader;
use crawl::{ParallelWebCrawler, WebCrawler};
use fetcher::HtmlFetcher;
use profiler::Profiler;
use report::CrawlResultWriter;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    // Run our application logic and capture the exit code
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole chain of context messages on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Crawl { config, overrides } => handle_crawl(&config, &overrides),
        Commands::Check { config } => handle_check(&config),
    }
}

// Handles the 'crawl' subcommand
fn handle_crawl(config_path: &Path, overrides: &Overrides) -> Result<i32> {
    let loader = ConfigurationLoader::new(config_path);
    let mut builder = loader
        .load_builder()
        .with_context(|| format!("Failed to load {}", loader.path().display()))?;
    overrides.apply(&mut builder);
    let config = builder.build().context("Invalid configuration")?;

    let fetcher = HtmlFetcher::new(config.ignored_words.clone())
        .context("Failed to create HTTP client")?;
    let crawler = ParallelWebCrawler::new(Arc::new(fetcher), config.parallelism)?;
    info!(
        config = %loader.path().display(),
        workers = crawler.parallelism(),
        "crawler ready"
    );

    let profiler = Profiler::new();
    let crawler = profiler.wrap(crawler);

    let result = crawler.crawl(&config.crawl_request());

    CrawlResultWriter::new(&result).write(&config.result_path)?;
    profiler.write_data(&config.profile_output_path)?;

    Ok(0)
}

// Handles the 'check' subcommand
fn handle_check(config_path: &Path) -> Result<i32> {
    let loader = ConfigurationLoader::new(config_path);
    let config = loader
        .load()
        .with_context(|| format!("Invalid configuration in {}", loader.path().display()))?;

    println!("✅ {} is valid", loader.path().display());
    println!("   📄 Start pages: {}", config.start_pages.len());
    println!("   📊 Max depth: {}", config.max_depth);
    println!("   ⏱️  Timeout: {}s", config.timeout.as_secs());
    println!("   🚫 Ignored URL patterns: {}", config.ignored_urls.len());
    println!("   🚫 Ignored word patterns: {}", config.ignored_words.len());

    Ok(0)
}

fn setup_logging(verbose: bool) {
    // RUST_LOG wins if it is set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("wordcrawl=debug,warn")
        } else {
            EnvFilter::new("wordcrawl=info,warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
