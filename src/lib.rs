// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod catalog;
pub mod config;
pub mod ingest;
pub mod report;
pub mod search;
pub mod telemetry;

// ---- Re-exports for stable public API ----
pub use crate::catalog::PriceCatalog;
pub use crate::config::AnalyzerConfig;
pub use crate::ingest::types::{IngestReport, Record, RowPolicy};

use std::io::{BufRead, Write};

use anyhow::Result;

/// Full run: load price lists, write the report, then (if enabled) hand the
/// catalog to the console search over `input` / `output`.
///
/// A load error aborts before anything is written.
pub fn run<R: BufRead, W: Write>(cfg: &AnalyzerConfig, input: R, output: W) -> Result<IngestReport> {
    let mut catalog = PriceCatalog::new();
    let summary = catalog.load_from_dir(
        &cfg.ingest.dir,
        &cfg.ingest.marker,
        cfg.ingest.on_malformed_row,
    )?;

    report::export_html(&catalog, &cfg.report.output, &cfg.report.title)?;

    if cfg.console.enabled {
        search::run_console(&catalog, input, output)?;
    }
    Ok(summary)
}
