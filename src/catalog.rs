//! # Price Catalog
//!
//! The in-memory record store. It holds exactly one generation of records
//! (the result of the last successful load) in ingestion order.
//!
//! The only mutation is wholesale replacement; readers get shared slices or
//! freshly sorted views, never a handle into the store.

use std::cmp::Ordering;
use std::path::Path;

use anyhow::Result;

use crate::ingest::{
    self,
    types::{IngestReport, Record, RowPolicy},
};

#[derive(Debug, Clone, Default)]
pub struct PriceCatalog {
    records: Vec<Record>,
}

impl PriceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Load price lists from `dir` and replace the current generation.
    ///
    /// On error the previous generation stays in place.
    pub fn load_from_dir(&mut self, dir: &Path, marker: &str, policy: RowPolicy) -> Result<IngestReport> {
        let (records, report) = ingest::load_dir(dir, marker, policy)?;
        self.replace(records);
        Ok(report)
    }

    /// Replace every record with `records`.
    pub fn replace(&mut self, records: Vec<Record>) {
        self.records = records;
    }

    /// Records in ingestion order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, cheapest per unit of mass first. Ties keep ingestion order.
    pub fn sorted_by_unit_price(&self) -> Vec<&Record> {
        let mut out: Vec<&Record> = self.records.iter().collect();
        sort_by_unit_price(&mut out);
        out
    }

    /// Records whose product name contains `query`, ignoring case,
    /// cheapest per unit of mass first.
    pub fn find_text(&self, query: &str) -> Vec<&Record> {
        let needle = query.to_lowercase();
        let mut out: Vec<&Record> = self
            .records
            .iter()
            .filter(|r| r.product().to_lowercase().contains(&needle))
            .collect();
        sort_by_unit_price(&mut out);
        out
    }
}

/// Stable ascending sort on `price_per_unit_mass`.
pub fn sort_by_unit_price(records: &mut [&Record]) {
    records.sort_by(|a, b| cmp_unit_price(a, b));
}

// Keys are always finite; -0.0 and 0.0 must compare equal.
fn cmp_unit_price(a: &Record, b: &Record) -> Ordering {
    a.price_per_unit_mass()
        .partial_cmp(&b.price_per_unit_mass())
        .unwrap_or(Ordering::Equal)
}
