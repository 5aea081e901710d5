// src/ingest/headers.rs
//! Header resolution: maps free-form column titles of a price list onto the
//! three columns the analyzer needs (product name, price, weight).
//!
//! Matching is exact after lowercasing, against fixed synonym lists. For each
//! header the categories are tried in order product → price → weight and the
//! first hit wins; for each category the left-most matching header wins.

pub const PRODUCT_SYNONYMS: &[&str] = &["название", "продукт", "товар", "наименование"];
pub const PRICE_SYNONYMS: &[&str] = &["цена", "розница"];
pub const WEIGHT_SYNONYMS: &[&str] = &["фасовка", "масса", "вес"];

/// Semantic column a header can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Product,
    Price,
    Weight,
}

/// Classify a single header. Precedence is product, then price, then weight.
pub fn classify(header: &str) -> Option<Column> {
    let h = header.to_lowercase();
    let h = h.as_str();
    if PRODUCT_SYNONYMS.contains(&h) {
        Some(Column::Product)
    } else if PRICE_SYNONYMS.contains(&h) {
        Some(Column::Price)
    } else if WEIGHT_SYNONYMS.contains(&h) {
        Some(Column::Weight)
    } else {
        None
    }
}

/// Resolved column positions for one header row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub product: Option<usize>,
    pub price: Option<usize>,
    pub weight: Option<usize>,
}

impl ColumnMap {
    /// `(product, price, weight)` when all three were found.
    pub fn complete(&self) -> Option<(usize, usize, usize)> {
        Some((self.product?, self.price?, self.weight?))
    }

    /// Minimal number of fields a data row needs to cover every resolved column.
    pub fn min_row_len(&self) -> usize {
        [self.product, self.price, self.weight]
            .into_iter()
            .flatten()
            .max()
            .map_or(0, |m| m + 1)
    }
}

/// Resolve a header row into column positions.
pub fn resolve<I, S>(headers: I) -> ColumnMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut map = ColumnMap::default();
    for (idx, header) in headers.into_iter().enumerate() {
        let slot = match classify(header.as_ref()) {
            Some(Column::Product) => &mut map.product,
            Some(Column::Price) => &mut map.price,
            Some(Column::Weight) => &mut map.weight,
            None => continue,
        };
        // first match wins
        slot.get_or_insert(idx);
    }
    map
}
