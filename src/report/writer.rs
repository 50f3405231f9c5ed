// src/report/writer.rs
// =============================================================================
// Writes a CrawlResult as pretty-printed JSON.
//
// - To a file: the JSON is appended, so earlier results in the file are kept
// - To stdout: when no result path is configured
// =============================================================================

use super::CrawlResult;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub struct CrawlResultWriter<'a> {
    result: &'a CrawlResult,
}

impl<'a> CrawlResultWriter<'a> {
    pub fn new(result: &'a CrawlResult) -> Self {
        Self { result }
    }

    // Writes to `destination`, or to stdout if it is empty
    pub fn write(&self, destination: &str) -> Result<()> {
        if destination.is_empty() {
            let stdout = io::stdout();
            self.write_to(stdout.lock())
        } else {
            self.write_path(Path::new(destination))
        }
    }

    // Appends the result to a file, creating it if needed
    pub fn write_path(&self, path: &Path) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open result file {}", path.display()))?;

        self.write_to(BufWriter::new(file))
            .with_context(|| format!("Failed to write result file {}", path.display()))
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self.result)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
