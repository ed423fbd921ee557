pub mod charts;
pub mod input;
pub mod keys;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod sources;
pub mod timeseries;
