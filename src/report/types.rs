//! Data types produced by the report pipeline.

use serde::{Serialize, Serializer};

/// Column order of the combined output file.
pub const OUTPUT_COLUMNS: [&str; 13] = [
    "key_row",
    "census_population",
    "population_rank",
    "population_blurb",
    "median_household_income",
    "median_household_income_rank",
    "median_household_income_blurb",
    "median_sale_price",
    "median_sale_price_rank",
    "median_sale_price_blurb",
    "house_affordability_ratio",
    "house_affordability_ratio_rank",
    "house_affordability_ratio_blurb",
];

/// One joined row of the combined output, one per region key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedRecord {
    pub key_row: String,
    pub census_population: Option<u64>,
    pub population_rank: String,
    pub population_blurb: String,
    pub median_household_income: Option<u64>,
    pub median_household_income_rank: String,
    pub median_household_income_blurb: String,
    pub median_sale_price: Option<u64>,
    pub median_sale_price_rank: String,
    pub median_sale_price_blurb: String,
    #[serde(serialize_with = "one_decimal")]
    pub house_affordability_ratio: Option<f64>,
    pub house_affordability_ratio_rank: String,
    pub house_affordability_ratio_blurb: String,
}

fn one_decimal<S: Serializer>(value: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => s.serialize_str(&format!("{:.1}", v)),
        None => s.serialize_none(),
    }
}

/// The combined table plus the Redfin period it refers to.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub records: Vec<CombinedRecord>,
    pub data_date: Option<String>,
}

/// Shape of a finished `process` run.
#[derive(Debug, Serialize)]
pub struct ProcessSummary {
    pub output_file: String,
    pub total_rows: usize,
    pub total_columns: usize,
    pub data_date: Option<String>,
    pub charts: Vec<String>,
}
