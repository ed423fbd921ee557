//! End-to-end runs: read the input directory, derive, write the output directory.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::charts;
use crate::input::{discover, read_table, require_source};
use crate::keys::load_keys;
use crate::output::write_records;
use crate::report::{OUTPUT_COLUMNS, ProcessSummary, build_report};
use crate::sources::census::{self, CensusMeasure};
use crate::sources::{
    INCOME_MARKER, KEYS_MARKER, POPULATION_MARKER, SALE_PRICE_MARKER, sale_price,
};
use crate::timeseries::{TimeSeriesSummary, analysis_rows, load_series, summarize};

pub const OUTPUT_FILE: &str = "output.csv";
pub const ANALYSIS_FILE: &str = "median_sale_price_analysis.csv";

/// Builds the combined report from `input_dir` and writes `output.csv`
/// plus both price charts into `output_dir`.
#[tracing::instrument(
    skip_all,
    fields(input_dir = %input_dir.display(), output_dir = %output_dir.display())
)]
pub fn process(input_dir: &Path, output_dir: &Path) -> Result<ProcessSummary> {
    let files = discover(input_dir)?;

    let keys_path = require_source(&files, KEYS_MARKER, input_dir)?;
    let population_path = require_source(&files, POPULATION_MARKER, input_dir)?;
    let income_path = require_source(&files, INCOME_MARKER, input_dir)?;
    let sale_price_path = require_source(&files, SALE_PRICE_MARKER, input_dir)?;

    let keys = load_keys(&read_table(keys_path)?)
        .with_context(|| format!("Error processing {}", keys_path.display()))?;
    if keys.is_empty() {
        bail!("{} holds no state regions", keys_path.display());
    }

    let population = census::extract(
        &read_table(population_path)?,
        &keys,
        CensusMeasure::Population,
    )
    .with_context(|| format!("Error processing {}", population_path.display()))?;
    let income = census::extract(
        &read_table(income_path)?,
        &keys,
        CensusMeasure::MedianHouseholdIncome,
    )
    .with_context(|| format!("Error processing {}", income_path.display()))?;

    let redfin = read_table(sale_price_path)?;
    let series = load_series(redfin.clone())
        .with_context(|| format!("Error processing {}", sale_price_path.display()))?;
    let prices = sale_price::extract(redfin, &keys)
        .with_context(|| format!("Error processing {}", sale_price_path.display()))?;

    let report = build_report(&keys, &population, &income, &prices);

    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;

    let output_path = output_dir.join(OUTPUT_FILE);
    write_records(&output_path, &report.records)?;
    info!(path = %output_path.display(), rows = report.records.len(), "Saved combined data");

    let chart_paths = charts::render_all(&series, &analysis_rows(&series), output_dir)?;

    Ok(ProcessSummary {
        output_file: output_path.display().to_string(),
        total_rows: report.records.len(),
        total_columns: OUTPUT_COLUMNS.len(),
        data_date: report.data_date,
        charts: chart_paths.iter().map(|p| p.display().to_string()).collect(),
    })
}

/// Writes latest price and growth per region plus both charts for the
/// Redfin price history in `input_dir`.
#[tracing::instrument(
    skip_all,
    fields(input_dir = %input_dir.display(), output_dir = %output_dir.display())
)]
pub fn analyze_time_series(input_dir: &Path, output_dir: &Path) -> Result<TimeSeriesSummary> {
    let files = discover(input_dir)?;
    let redfin_path = require_source(&files, SALE_PRICE_MARKER, input_dir)?;

    let series = load_series(read_table(redfin_path)?)
        .with_context(|| format!("Error processing {}", redfin_path.display()))?;
    let summary = summarize(&series);
    let rows = analysis_rows(&series);

    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;

    let analysis_path = output_dir.join(ANALYSIS_FILE);
    write_records(&analysis_path, &rows)?;
    info!(path = %analysis_path.display(), rows = rows.len(), "Saved time series analysis");

    charts::render_all(&series, &rows, output_dir)?;

    Ok(summary)
}
