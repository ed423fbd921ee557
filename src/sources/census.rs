//! Census table extraction (population and median household income).
//!
//! Census exports are wide: one `Label (Grouping)` column naming the
//! measure, then one `<Region>!!...!!Estimate` column per region.

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::input::Table;
use crate::keys::RegionKeys;
use crate::sources::{Metric, MetricRecord, parse_count};

const LABEL_COLUMN: &str = "Label (Grouping)";

/// Which census measure to pull out of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CensusMeasure {
    Population,
    MedianHouseholdIncome,
}

impl CensusMeasure {
    /// Substring identifying the row that holds the measure.
    fn row_marker(self) -> &'static str {
        match self {
            CensusMeasure::Population => "Total population",
            CensusMeasure::MedianHouseholdIncome => "Households",
        }
    }

    /// Header of the column holding the estimate for `region_name`.
    pub fn column_for(self, region_name: &str) -> String {
        match self {
            CensusMeasure::Population => format!("{}!!Estimate", region_name),
            CensusMeasure::MedianHouseholdIncome => {
                format!("{}!!Median income (dollars)!!Estimate", region_name)
            }
        }
    }
}

/// Extracts one value per region from a census table.
///
/// Regions whose column is absent or whose value does not parse are
/// logged and left out of the result.
///
/// # Errors
///
/// Fails if the table has no label column or no row matching the measure.
pub fn extract(table: &Table, keys: &RegionKeys, measure: CensusMeasure) -> Result<Metric> {
    let label_col = table
        .column(LABEL_COLUMN)
        .with_context(|| format!("census table has no {:?} column", LABEL_COLUMN))?;

    let marker = measure.row_marker();
    let row = table
        .rows
        .iter()
        .position(|r| r.get(label_col).is_some_and(|l| l.contains(marker)))
        .with_context(|| format!("census table has no {:?} row", marker))?;

    let mut metric = Metric::default();
    for key in keys.iter() {
        let column = measure.column_for(&key.zillow_region_name);
        let Some(raw) = table.value(row, &column) else {
            warn!(
                key_row = %key.key_row,
                column = %column,
                "Census column missing, skipping region"
            );
            continue;
        };

        match parse_count(raw) {
            Some(value) => metric.insert(MetricRecord {
                key_row: key.key_row.clone(),
                value,
                as_of: None,
            }),
            None => {
                warn!(
                    key_row = %key.key_row,
                    value = raw,
                    "Unparseable census value, skipping region"
                );
            }
        }
    }

    debug!(?measure, regions = metric.len(), "Census values extracted");
    Ok(metric)
}
