// src/ingest/types.rs
use serde::{Deserialize, Serialize};

/// One product listing taken from one price file.
///
/// Immutable once built: fields are private and `price_per_unit_mass` is
/// derived exactly once, in [`Record::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    product: String,
    price: f64,
    weight: f64,
    source_file: String,
    price_per_unit_mass: f64,
}

impl Record {
    /// Build a record, trimming the product name. Returns `None` when `weight`
    /// is not strictly positive (the derived price would be undefined).
    pub fn new(
        product: impl AsRef<str>,
        price: f64,
        weight: f64,
        source_file: impl Into<String>,
    ) -> Option<Self> {
        if weight.is_nan() || weight <= 0.0 {
            return None;
        }
        Some(Self {
            product: product.as_ref().trim().to_string(),
            price,
            weight,
            source_file: source_file.into(),
            price_per_unit_mass: price / weight,
        })
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    /// Ranking key shared by the report and the search.
    pub fn price_per_unit_mass(&self) -> f64 {
        self.price_per_unit_mass
    }
}

/// What to do with a data row whose price or weight cannot be used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowPolicy {
    /// Abort the whole load on the first bad row.
    #[default]
    FailFast,
    /// Drop the row, log it, keep going.
    Skip,
}

impl std::str::FromStr for RowPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "fail_fast" => Ok(RowPolicy::FailFast),
            "skip" => Ok(RowPolicy::Skip),
            other => anyhow::bail!("unknown row policy `{other}` (expected fail_fast or skip)"),
        }
    }
}

/// Counters collected during one load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub files_scanned: usize,
    pub files_loaded: usize,
    /// Candidate files whose header row did not resolve all three columns.
    pub files_skipped: Vec<String>,
    pub rows_loaded: usize,
    /// Rows with too few columns for the resolved indices.
    pub rows_short: usize,
    /// Rows dropped under [`RowPolicy::Skip`].
    pub rows_malformed: usize,
    /// Loaded rows whose price is below zero (kept, logged).
    pub rows_negative_price: usize,
}
