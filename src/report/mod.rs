// src/report/mod.rs

pub mod aggregator;
pub mod pipeline;
pub mod writer;

pub use aggregator::aggregate;
pub use pipeline::{CycleError, CycleOutcome, DEFAULT_RETRY_DELAY, ReportPipeline};
pub use writer::write_report;
