//! CLI entry point for the data analyzer.
//!
//! Provides subcommands for building the combined state housing report and
//! for analyzing the Redfin median sale price history on its own.

use anyhow::Result;
use clap::{Parser, Subcommand};
use data_analyzer::output::print_summary;
use data_analyzer::pipeline::{analyze_time_series, process};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "data-analyzer")]
#[command(about = "Data Analyzer CLI", long_about = None)]
struct Cli {
    /// Log run summaries as JSON instead of a property table
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process CSV files and generate analysis
    Process {
        /// Directory containing input CSV files
        #[arg(long, env = "DATA_ANALYZER_INPUT_DIR", default_value = "data/input")]
        input_dir: PathBuf,

        /// Directory to save output CSV files
        #[arg(long, env = "DATA_ANALYZER_OUTPUT_DIR", default_value = "data/output")]
        output_dir: PathBuf,
    },
    /// Perform time series analysis on Redfin median sale price data
    AnalyzeTimeseries {
        /// Directory containing input CSV files
        #[arg(long, env = "DATA_ANALYZER_INPUT_DIR", default_value = "data/input")]
        input_dir: PathBuf,

        /// Directory to save time series analysis results
        #[arg(
            long,
            env = "DATA_ANALYZER_TIMESERIES_DIR",
            default_value = "data/output/time_series"
        )]
        output_dir: PathBuf,
    },
}

/// Filter from the directives in `spec`, or `default` when none are set.
fn env_filter(spec: Option<String>, default: &str) -> EnvFilter {
    spec.filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/data_analyzer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("data_analyzer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter(std::env::var("RUST_LOG").ok(), "info"));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(env_filter(std::env::var("RUST_LOG_JSON").ok(), "debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input_dir,
            output_dir,
        } => {
            info!(
                input_dir = %input_dir.display(),
                output_dir = %output_dir.display(),
                "Data Analyzer"
            );
            match process(&input_dir, &output_dir) {
                Ok(summary) => {
                    print_summary("Processed Data Summary", &summary, cli.json)?;
                    info!("Processing completed successfully!");
                }
                Err(e) => {
                    error!(error = %format!("{:#}", e), "Error during processing");
                    return Err(e);
                }
            }
        }
        Commands::AnalyzeTimeseries {
            input_dir,
            output_dir,
        } => {
            info!(
                input_dir = %input_dir.display(),
                output_dir = %output_dir.display(),
                "Time Series Analysis"
            );
            match analyze_time_series(&input_dir, &output_dir) {
                Ok(summary) => {
                    print_summary("Time Series Summary Statistics", &summary, cli.json)?;
                    info!(
                        output_dir = %output_dir.display(),
                        "Time series analysis completed successfully!"
                    );
                }
                Err(e) => {
                    error!(error = %format!("{:#}", e), "Error during time series analysis");
                    return Err(e);
                }
            }
        }
    }

    Ok(())
}
