use tracing::debug;

use crate::keys::RegionKeys;
use crate::report::blurb;
use crate::report::rank::{Order, ordinal_ranks};
use crate::report::types::{CombinedRecord, Report};
use crate::sources::Metric;

/// Sale price over household income, rounded to one decimal place.
///
/// Rounding works on the exact binary quotient with ties to even, so
/// `4.25` (stored just below) becomes `4.2`. `None` when either side is
/// missing or income is zero.
pub fn affordability_ratio(price: Option<u64>, income: Option<u64>) -> Option<f64> {
    match (price, income) {
        (Some(p), Some(i)) if i > 0 => format!("{:.1}", p as f64 / i as f64).parse().ok(),
        _ => None,
    }
}

fn as_f64(values: &[Option<u64>]) -> Vec<Option<f64>> {
    values.iter().map(|v| v.map(|v| v as f64)).collect()
}

/// Joins every metric onto the region keys and derives ranks, the
/// affordability ratio and blurbs.
///
/// Output rows follow key order; each key appears exactly once.
pub fn build_report(
    keys: &RegionKeys,
    population: &Metric,
    income: &Metric,
    sale_price: &Metric,
) -> Report {
    let key_rows: Vec<&str> = keys.iter().map(|k| k.key_row.as_str()).collect();

    let populations: Vec<Option<u64>> = key_rows.iter().map(|k| population.get(k)).collect();
    let incomes: Vec<Option<u64>> = key_rows.iter().map(|k| income.get(k)).collect();
    let prices: Vec<Option<u64>> = key_rows.iter().map(|k| sale_price.get(k)).collect();
    let ratios: Vec<Option<f64>> = prices
        .iter()
        .zip(&incomes)
        .map(|(p, i)| affordability_ratio(*p, *i))
        .collect();

    let population_ranks = ordinal_ranks(&as_f64(&populations), Order::Descending);
    let income_ranks = ordinal_ranks(&as_f64(&incomes), Order::Descending);
    let price_ranks = ordinal_ranks(&as_f64(&prices), Order::Descending);
    let ratio_ranks = ordinal_ranks(&ratios, Order::Ascending);

    let data_date = sale_price.as_of.as_deref();

    let records = key_rows
        .iter()
        .enumerate()
        .map(|(i, key_row)| {
            let name = keys.display_name(key_row);
            CombinedRecord {
                key_row: key_row.to_string(),
                census_population: populations[i],
                population_blurb: blurb::population(&name, &population_ranks[i]),
                population_rank: population_ranks[i].clone(),
                median_household_income: incomes[i],
                median_household_income_blurb: blurb::median_household_income(
                    &name,
                    &income_ranks[i],
                ),
                median_household_income_rank: income_ranks[i].clone(),
                median_sale_price: prices[i],
                median_sale_price_blurb: blurb::median_sale_price(
                    &name,
                    &price_ranks[i],
                    data_date,
                ),
                median_sale_price_rank: price_ranks[i].clone(),
                house_affordability_ratio: ratios[i],
                house_affordability_ratio_blurb: blurb::house_affordability_ratio(
                    &name,
                    &ratio_ranks[i],
                    data_date,
                ),
                house_affordability_ratio_rank: ratio_ranks[i].clone(),
            }
        })
        .collect::<Vec<_>>();

    debug!(rows = records.len(), "Combined report built");

    Report {
        records,
        data_date: sale_price.as_of.clone(),
    }
}
