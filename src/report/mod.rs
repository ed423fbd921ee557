//! Combined report: join, rank and describe each region.
//!
//! Metrics from every source are joined onto the region keys, ranked
//! against each other, and summarized as one sentence per metric.

pub mod blurb;
pub mod build;
pub mod rank;
pub mod types;

pub use build::{affordability_ratio, build_report};
pub use types::{CombinedRecord, OUTPUT_COLUMNS, ProcessSummary, Report};
