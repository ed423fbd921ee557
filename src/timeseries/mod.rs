//! Redfin median sale price history: loading, growth rates and summary
//! statistics.

pub mod growth;
pub mod series;
pub mod utility;

pub use growth::{AnalysisRow, Growth, TimeSeriesSummary, analysis_rows, growth, summarize};
pub use series::{PriceSeries, RegionSeries, load_series};
