// src/ingest/mod.rs
pub mod headers;
pub mod types;

use crate::ingest::headers::resolve;
use crate::ingest::types::{IngestReport, Record, RowPolicy};
use anyhow::{anyhow, bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Default substring a file name must contain to be treated as a price list.
pub const DEFAULT_MARKER: &str = "price";

/// Parse a human-written decimal. Accepts `,` as the decimal separator and
/// ignores surrounding whitespace. Non-finite values are rejected.
pub fn parse_decimal(raw: &str) -> Result<f64> {
    let normalized = raw.trim().replace(',', ".");
    let v: f64 = normalized
        .parse()
        .map_err(|_| anyhow!("`{raw}` is not a decimal number"))?;
    if !v.is_finite() {
        bail!("`{raw}` is not a finite number");
    }
    Ok(v)
}

/// Candidate price files in `dir` (non-recursive), sorted by file name.
///
/// A regular file is a candidate when its name contains `marker`
/// (case-sensitive). Directories are never candidates.
pub fn discover_candidates(dir: &Path, marker: &str) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("listing directory {}", dir.display()))?;

    let mut out = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("listing directory {}", dir.display()))?;
        let name = entry.file_name();
        if !name.to_string_lossy().contains(marker) {
            continue;
        }
        let path = entry.path();
        // follows symlinks
        if path.is_file() {
            out.push(path);
        }
    }
    out.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(out)
}

/// Outcome of reading a single price file.
#[derive(Debug, Default)]
pub struct FileOutcome {
    pub records: Vec<Record>,
    /// `false` when the header row did not resolve all three columns.
    pub resolved: bool,
    pub rows_short: usize,
    pub rows_malformed: usize,
    pub rows_negative_price: usize,
}

/// Parse one price list from its text content. `source_file` is stamped on
/// every record and used in error messages.
pub fn parse_price_list(content: &str, source_file: &str, policy: RowPolicy) -> Result<FileOutcome> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::None)
        .from_reader(content.as_bytes());

    let header_row = reader
        .headers()
        .with_context(|| format!("reading header row of {source_file}"))?
        .clone();

    let columns = resolve(header_row.iter());
    let Some((product_col, price_col, weight_col)) = columns.complete() else {
        return Ok(FileOutcome::default());
    };
    let min_len = columns.min_row_len();

    let mut outcome = FileOutcome {
        resolved: true,
        ..FileOutcome::default()
    };

    for row in reader.records() {
        let row = row.with_context(|| format!("parsing {source_file}"))?;
        let line = row.position().map_or(0, |p| p.line());

        if row.len() < min_len {
            outcome.rows_short += 1;
            continue;
        }

        let built = build_record(
            &row[product_col],
            &row[price_col],
            &row[weight_col],
            source_file,
        )
        .with_context(|| format!("{source_file}, line {line}"));

        match (built, policy) {
            (Ok(rec), _) => {
                if rec.price() < 0.0 {
                    tracing::warn!(
                        target: "ingest",
                        file = source_file,
                        line,
                        price = rec.price(),
                        "negative price loaded"
                    );
                    outcome.rows_negative_price += 1;
                }
                outcome.records.push(rec);
            }
            (Err(e), RowPolicy::FailFast) => return Err(e),
            (Err(e), RowPolicy::Skip) => {
                let detail = format!("{e:#}");
                tracing::warn!(
                    target: "ingest",
                    file = source_file,
                    line,
                    error = %detail,
                    "skipping malformed row"
                );
                outcome.rows_malformed += 1;
            }
        }
    }

    Ok(outcome)
}

fn build_record(product: &str, price: &str, weight: &str, source_file: &str) -> Result<Record> {
    let price = parse_decimal(price).context("price column")?;
    let weight = parse_decimal(weight).context("weight column")?;
    Record::new(product, price, weight, source_file)
        .ok_or_else(|| anyhow!("weight column: {weight} is not a positive quantity"))
}

/// Read and parse one file from disk.
pub fn load_file(path: &Path, policy: RowPolicy) -> Result<FileOutcome> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let source_file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_price_list(&content, &source_file, policy)
}

/// Load every candidate price file in `dir`, in file-name order.
///
/// Returns the records in ingestion order plus a summary. Any fatal error
/// (unreadable file, invalid UTF-8, broken quoting, or a malformed row under
/// [`RowPolicy::FailFast`]) aborts the whole load.
pub fn load_dir(dir: &Path, marker: &str, policy: RowPolicy) -> Result<(Vec<Record>, IngestReport)> {
    let candidates = discover_candidates(dir, marker)?;

    let mut records = Vec::new();
    let mut report = IngestReport::default();

    for path in candidates {
        report.files_scanned += 1;
        let outcome = load_file(&path, policy)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if !outcome.resolved {
            tracing::info!(target: "ingest", file = %name, "header row not recognized, file skipped");
            report.files_skipped.push(name);
            continue;
        }

        tracing::debug!(
            target: "ingest",
            file = %name,
            rows = outcome.records.len(),
            short = outcome.rows_short,
            malformed = outcome.rows_malformed,
            "file loaded"
        );
        report.files_loaded += 1;
        report.rows_loaded += outcome.records.len();
        report.rows_short += outcome.rows_short;
        report.rows_malformed += outcome.rows_malformed;
        report.rows_negative_price += outcome.rows_negative_price;
        records.extend(outcome.records);
    }

    tracing::info!(
        target: "ingest",
        dir = %dir.display(),
        scanned = report.files_scanned,
        loaded = report.files_loaded,
        skipped = report.files_skipped.len(),
        rows = report.rows_loaded,
        "price lists loaded"
    );

    Ok((records, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_accepts_comma_and_dot() {
        assert_eq!(parse_decimal("12,5").unwrap(), 12.5);
        assert_eq!(parse_decimal("12.5").unwrap(), 12.5);
        assert_eq!(parse_decimal(" 7 ").unwrap(), 7.0);
    }

    #[test]
    fn decimal_rejects_garbage() {
        assert!(parse_decimal("").is_err());
        assert!(parse_decimal("12,5 руб").is_err());
        assert!(parse_decimal("1,000.5").is_err());
        assert!(parse_decimal("inf").is_err());
        assert!(parse_decimal("NaN").is_err());
    }

    #[test]
    fn short_rows_are_skipped_quietly() {
        let csv = "название,цена,вес\nХлеб,50\nМолоко,80,1\n";
        let out = parse_price_list(csv, "price.csv", RowPolicy::FailFast).unwrap();
        assert!(out.resolved);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.rows_short, 1);
        assert_eq!(out.records[0].product(), "Молоко");
    }

    #[test]
    fn unresolved_header_yields_nothing() {
        let csv = "a,b,c\n1,2,3\n";
        let out = parse_price_list(csv, "price.csv", RowPolicy::FailFast).unwrap();
        assert!(!out.resolved);
        assert!(out.records.is_empty());
    }

    #[test]
    fn empty_content_is_unresolved() {
        let out = parse_price_list("", "price.csv", RowPolicy::FailFast).unwrap();
        assert!(!out.resolved);
    }

    #[test]
    fn quoted_decimal_with_comma() {
        let csv = "товар,цена,масса\n\"Сыр, твёрдый\",\"450,5\",\"0,5\"\n";
        let out = parse_price_list(csv, "price.csv", RowPolicy::FailFast).unwrap();
        let r = &out.records[0];
        assert_eq!(r.product(), "Сыр, твёрдый");
        assert_eq!(r.price(), 450.5);
        assert_eq!(r.weight(), 0.5);
        assert_eq!(r.price_per_unit_mass(), 901.0);
    }

    #[test]
    fn fail_fast_reports_file_line_and_field() {
        let csv = "товар,цена,масса\nСыр,450,1\nМасло,abc,1\n";
        let err = parse_price_list(csv, "price_x.csv", RowPolicy::FailFast).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("price_x.csv, line 3"), "{msg}");
        assert!(msg.contains("price column"), "{msg}");
    }

    #[test]
    fn negative_price_is_kept_and_counted() {
        let csv = "товар,цена,масса\nСкидка,-10,1\nНоль,-0,1\nСыр,450,1\n";
        let out = parse_price_list(csv, "price.csv", RowPolicy::FailFast).unwrap();
        assert_eq!(out.records.len(), 3);
        assert_eq!(out.records[0].price_per_unit_mass(), -10.0);
        // -0 is not below zero
        assert_eq!(out.rows_negative_price, 1);
    }

    #[test]
    fn zero_weight_is_malformed() {
        let csv = "товар,цена,масса\nСыр,450,0\n";
        assert!(parse_price_list(csv, "p", RowPolicy::FailFast).is_err());

        let out = parse_price_list(csv, "p", RowPolicy::Skip).unwrap();
        assert!(out.records.is_empty());
        assert_eq!(out.rows_malformed, 1);
    }
}
