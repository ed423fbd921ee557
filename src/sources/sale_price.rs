//! Redfin median sale price extraction.
//!
//! The Redfin export starts with a title line; the real header (`Region`
//! followed by one column per month) is on the second line.

use anyhow::{Result, bail};
use tracing::{debug, warn};

use crate::input::Table;
use crate::keys::RegionKeys;
use crate::sources::{Metric, MetricRecord};

/// Regions absent from the Redfin export, pinned to fixed prices.
pub const FIXED_PRICES: &[(&str, u64)] = &[("washington_dc", 565_000), ("puerto_rico", 138_000)];

/// Returns the pinned price for `key_row`, if it has one.
pub fn fixed_price(key_row: &str) -> Option<u64> {
    FIXED_PRICES
        .iter()
        .find(|(k, _)| *k == key_row)
        .map(|(_, price)| *price)
}

/// Parses a Redfin price cell such as `$565K`, `$1.2M` or `412,000`.
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let (number, multiplier) = match cleaned.chars().last() {
        Some('K') | Some('k') => (&cleaned[..cleaned.len() - 1], 1_000.0),
        Some('M') | Some('m') => (&cleaned[..cleaned.len() - 1], 1_000_000.0),
        _ => (cleaned.as_str(), 1.0),
    };

    number
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v * multiplier)
}

/// Header of the right-most month column that holds any value.
pub fn latest_period(table: &Table) -> Option<String> {
    (1..table.headers.len())
        .rev()
        .find(|&col| {
            table
                .rows
                .iter()
                .any(|r| r.get(col).is_some_and(|v| !v.trim().is_empty()))
        })
        .map(|col| table.headers[col].clone())
}

/// Extracts each region's most recent sale price from the Redfin table.
///
/// `table` is the file as read; its title line is dropped here. The
/// returned metric's `as_of` is the latest month with any data.
///
/// # Errors
///
/// Fails if the table has no month columns after the title line is removed.
pub fn extract(table: Table, keys: &RegionKeys) -> Result<Metric> {
    let table = table.promote_first_row();
    if table.headers.len() < 2 {
        bail!("sale price table has no month columns");
    }

    let mut metric = Metric::dated(latest_period(&table));

    for key in keys.iter() {
        if let Some(price) = fixed_price(&key.key_row) {
            metric.insert(MetricRecord {
                key_row: key.key_row.clone(),
                value: price,
                as_of: metric.as_of.clone(),
            });
            continue;
        }

        let Some(row) = table
            .rows
            .iter()
            .find(|r| r.first().is_some_and(|name| name.trim() == key.zillow_region_name))
        else {
            warn!(key_row = %key.key_row, "Region missing from sale price data");
            continue;
        };

        let latest = (1..table.headers.len()).rev().find_map(|col| {
            let raw = row.get(col)?;
            if raw.trim().is_empty() {
                return None;
            }
            match parse_price(raw) {
                Some(price) if price > 0.0 => Some((col, price)),
                Some(_) => {
                    warn!(
                        key_row = %key.key_row,
                        value = %raw,
                        "Non-positive sale price, skipping cell"
                    );
                    None
                }
                None => {
                    warn!(
                        key_row = %key.key_row,
                        value = %raw,
                        "Unparseable sale price, skipping cell"
                    );
                    None
                }
            }
        });

        match latest {
            Some((col, price)) => metric.insert(MetricRecord {
                key_row: key.key_row.clone(),
                value: price.round() as u64,
                as_of: Some(table.headers[col].clone()),
            }),
            None => warn!(key_row = %key.key_row, "Region has no sale price values"),
        }
    }

    debug!(regions = metric.len(), as_of = ?metric.as_of, "Sale prices extracted");
    Ok(metric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::parse_table;
    use crate::keys::load_keys;

    const REDFIN: &str = "Median Sale Price,,,\n\
                          Region,January 2025,February 2025,March 2025\n\
                          Alabama,$250K,$255K,\n\
                          California,$800K,$810K,$820K\n\
                          District of Columbia,$700K,$710K,$720K\n";

    fn keys() -> RegionKeys {
        let csv = "key_row,zillow_region_name,alternative_name,region_type\n\
                   alabama,Alabama,Alabama,state\n\
                   california,California,California,state\n\
                   washington_dc,Washington DC,\"Washington, D.C.\",state\n\
                   puerto_rico,Puerto Rico,Puerto Rico,state\n\
                   ohio,Ohio,Ohio,state\n";
        load_keys(&parse_table(csv.as_bytes(), b',').unwrap()).unwrap()
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("$565K"), Some(565_000.0));
        assert_eq!(parse_price("$1.2M"), Some(1_200_000.0));
        assert_eq!(parse_price("412,000"), Some(412_000.0));
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("n/a"), None);
    }

    #[test]
    fn test_extract_latest_per_region() {
        let table = parse_table(REDFIN.as_bytes(), b',').unwrap();
        let metric = extract(table, &keys()).unwrap();

        assert_eq!(metric.as_of.as_deref(), Some("March 2025"));
        assert_eq!(metric.get("california"), Some(820_000));

        // Alabama's latest non-empty value is February
        let alabama = metric.record("alabama").unwrap();
        assert_eq!(alabama.value, 255_000);
        assert_eq!(alabama.as_of.as_deref(), Some("February 2025"));

        assert_eq!(metric.get("ohio"), None);
    }

    #[test]
    fn test_fixed_prices_override_source() {
        let table = parse_table(REDFIN.as_bytes(), b',').unwrap();
        let metric = extract(table, &keys()).unwrap();

        assert_eq!(metric.get("washington_dc"), Some(565_000));
        assert_eq!(metric.get("puerto_rico"), Some(138_000));
    }

    #[test]
    fn test_non_positive_prices_are_skipped() {
        let csv = "Median Sale Price,,,\n\
                   Region,January 2025,February 2025,March 2025\n\
                   Alabama,$250K,$255K,-$5K\n\
                   California,$0K,,\n";
        let table = parse_table(csv.as_bytes(), b',').unwrap();
        let metric = extract(table, &keys()).unwrap();

        let alabama = metric.record("alabama").unwrap();
        assert_eq!(alabama.value, 255_000);
        assert_eq!(alabama.as_of.as_deref(), Some("February 2025"));
        assert_eq!(metric.get("california"), None);
    }

    #[test]
    fn test_latest_period_skips_empty_columns() {
        let csv = "Region,January 2025,February 2025\nAlabama,$250K,\n";
        let table = parse_table(csv.as_bytes(), b',').unwrap();
        assert_eq!(latest_period(&table).as_deref(), Some("January 2025"));
    }
}
