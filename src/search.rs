// src/search.rs
//! Interactive console search over the catalog.
//!
//! Generic over the line source and the sink so it can be driven by stdin/stdout
//! in the binary and by in-memory buffers in tests.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::catalog::PriceCatalog;
use crate::ingest::types::Record;

pub const PROMPT: &str = "Введите текст для поиска (или 'exit' для выхода): ";
pub const FAREWELL: &str = "Работа завершена.";
pub const NOTHING_FOUND: &str = "Ничего не найдено.";
pub const EXIT_COMMAND: &str = "exit";

/// Column header printed above every non-empty result list.
pub fn header_line() -> String {
    format!(
        "{:<3} {:<30} {:<10} {:<5} {:<15} {:<10}",
        "№", "Наименование", "цена", "вес", "файл", "цена за кг."
    )
}

/// One fixed-width result line; `rank` is 1-based.
pub fn result_line(rank: usize, r: &Record) -> String {
    format!(
        "{:<3} {:<30} {:<10.2} {:<5.2} {:<15} {:<10.2}",
        rank,
        r.product(),
        r.price(),
        r.weight(),
        r.source_file(),
        r.price_per_unit_mass()
    )
}

/// Run the read-search-print loop until `exit` or end of input.
pub fn run_console<R, W>(catalog: &PriceCatalog, mut input: R, mut out: W) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    loop {
        write!(out, "{PROMPT}").context("writing prompt")?;
        out.flush().context("flushing prompt")?;

        line.clear();
        let n = input.read_line(&mut line).context("reading query")?;
        if n == 0 {
            // EOF: same as an explicit exit
            writeln!(out)?;
            writeln!(out, "{FAREWELL}")?;
            break;
        }

        let query = line.trim();
        if query.eq_ignore_ascii_case(EXIT_COMMAND) {
            writeln!(out, "{FAREWELL}")?;
            break;
        }

        let hits = if query.is_empty() {
            Vec::new()
        } else {
            catalog.find_text(query)
        };
        tracing::debug!(target: "search", query, hits = hits.len(), "search");

        if hits.is_empty() {
            writeln!(out, "{NOTHING_FOUND}")?;
            continue;
        }

        writeln!(out, "{}", header_line())?;
        for (idx, r) in hits.iter().enumerate() {
            writeln!(out, "{}", result_line(idx + 1, r))?;
        }
    }
    out.flush()?;
    Ok(())
}
