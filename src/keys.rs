//! Region key table: the canonical list of regions every source joins on.

use anyhow::{Result, bail};
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::input::Table;

/// Only rows of this `region_type` take part in the report.
const STATE_REGION_TYPE: &str = "state";

/// One row of the key file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionKey {
    /// Region code, e.g. `new_york`.
    pub key_row: String,
    /// Name used for the region inside the source files, e.g. `New York`.
    pub zillow_region_name: String,
    /// Display name used in blurbs.
    pub alternative_name: Option<String>,
}

/// Ordered, duplicate-free region keys.
#[derive(Debug, Clone, Default)]
pub struct RegionKeys {
    keys: Vec<RegionKey>,
}

impl RegionKeys {
    pub fn new(keys: Vec<RegionKey>) -> Self {
        let mut seen = HashSet::new();
        let keys = keys
            .into_iter()
            .filter(|k| {
                let fresh = seen.insert(k.key_row.clone());
                if !fresh {
                    warn!(key_row = %k.key_row, "Duplicate region key, skipping");
                }
                fresh
            })
            .collect();
        Self { keys }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegionKey> {
        self.keys.iter()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn get(&self, key_row: &str) -> Option<&RegionKey> {
        self.keys.iter().find(|k| k.key_row == key_row)
    }

    /// Display name for blurbs, falling back to `Region (<key_row>)`.
    pub fn display_name(&self, key_row: &str) -> String {
        self.get(key_row)
            .and_then(|k| k.alternative_name.clone())
            .unwrap_or_else(|| format!("Region ({})", key_row))
    }
}

/// Builds [`RegionKeys`] from the key file, keeping state rows whose key has no apostrophe.
///
/// # Errors
///
/// Fails if `key_row`, `zillow_region_name` or `region_type` is missing from the header.
pub fn load_keys(table: &Table) -> Result<RegionKeys> {
    for required in ["key_row", "zillow_region_name", "region_type"] {
        if table.column(required).is_none() {
            bail!("key file is missing the {} column", required);
        }
    }

    let mut keys = Vec::new();
    for row in 0..table.rows.len() {
        let key_row = table.value(row, "key_row").unwrap_or_default().trim();
        let region_type = table.value(row, "region_type").unwrap_or_default().trim();

        if region_type != STATE_REGION_TYPE {
            continue;
        }
        if key_row.is_empty() {
            warn!(row, "Key row without a region code, skipping");
            continue;
        }
        if key_row.contains('\'') {
            debug!(key_row, "Dropping key containing an apostrophe");
            continue;
        }

        let zillow_region_name = table
            .value(row, "zillow_region_name")
            .unwrap_or_default()
            .trim()
            .to_string();
        let alternative_name = table
            .value(row, "alternative_name")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        keys.push(RegionKey {
            key_row: key_row.to_string(),
            zillow_region_name,
            alternative_name,
        });
    }

    let keys = RegionKeys::new(keys);
    debug!(regions = keys.len(), "Region keys loaded");
    Ok(keys)
}
