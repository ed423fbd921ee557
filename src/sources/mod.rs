//! Per-source metric extraction.
//!
//! Each source file is reduced to a [`Metric`]: one value per region key,
//! looked up through the region's `zillow_region_name`.

pub mod census;
pub mod sale_price;

use std::collections::HashMap;

/// File name markers identifying each input source.
pub const KEYS_MARKER: &str = "KEYS";
pub const POPULATION_MARKER: &str = "CENSUS_POPULATION";
pub const INCOME_MARKER: &str = "CENSUS_MHI_STATE";
pub const SALE_PRICE_MARKER: &str = "REDFIN_MEDIAN_SALE_PRICE";

/// A single region's value from one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRecord {
    pub key_row: String,
    pub value: u64,
    /// Period the value refers to, when the source carries one.
    pub as_of: Option<String>,
}

/// All values extracted from one source, keyed by region code.
#[derive(Debug, Clone, Default)]
pub struct Metric {
    records: HashMap<String, MetricRecord>,
    /// Most recent period present anywhere in the source.
    pub as_of: Option<String>,
}

impl Metric {
    /// An empty metric whose values refer to `as_of`.
    pub fn dated(as_of: Option<String>) -> Self {
        Self {
            records: HashMap::new(),
            as_of,
        }
    }

    pub fn insert(&mut self, record: MetricRecord) {
        self.records.insert(record.key_row.clone(), record);
    }

    pub fn get(&self, key_row: &str) -> Option<u64> {
        self.records.get(key_row).map(|r| r.value)
    }

    pub fn record(&self, key_row: &str) -> Option<&MetricRecord> {
        self.records.get(key_row)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parses an integer count such as `5,024,279`.
pub fn parse_count(raw: &str) -> Option<u64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    cleaned.parse().ok()
}
