use anyhow::{Result, bail};
use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::input::Table;
use crate::sources::sale_price::parse_price;

/// Monthly price history for one region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSeries {
    pub region: String,
    /// One entry per month of [`PriceSeries::months`].
    pub prices: Vec<Option<f64>>,
}

impl RegionSeries {
    /// Price in the final month of the series.
    pub fn latest(&self) -> Option<f64> {
        self.prices.last().copied().flatten()
    }
}

/// Median sale prices by region and month.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    pub months: Vec<NaiveDate>,
    pub regions: Vec<RegionSeries>,
}

/// Parses a month header such as `January 2025` to the first of that month.
pub fn parse_month(header: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("1 {}", header.trim()), "%d %B %Y").ok()
}

/// Builds a [`PriceSeries`] from the Redfin table as read from disk.
///
/// Month columns whose header is not a `Month YYYY` date are dropped;
/// price cells that do not parse are treated as missing.
///
/// # Errors
///
/// Fails if no month column survives.
pub fn load_series(table: Table) -> Result<PriceSeries> {
    let table = table.promote_first_row();

    let mut columns = Vec::new();
    let mut months = Vec::new();
    for (col, header) in table.headers.iter().enumerate().skip(1) {
        match parse_month(header) {
            Some(month) => {
                columns.push(col);
                months.push(month);
            }
            None => warn!(header = %header, "Ignoring column without a month header"),
        }
    }

    if months.is_empty() {
        bail!("sale price table has no month columns");
    }

    let regions: Vec<RegionSeries> = table
        .rows
        .iter()
        .filter_map(|row| {
            let region = row.first()?.trim();
            if region.is_empty() {
                return None;
            }
            let prices = columns
                .iter()
                .map(|&col| row.get(col).and_then(|v| parse_price(v)))
                .collect();
            Some(RegionSeries {
                region: region.to_string(),
                prices,
            })
        })
        .collect();

    debug!(
        regions = regions.len(),
        months = months.len(),
        "Price series loaded"
    );

    Ok(PriceSeries { months, regions })
}
