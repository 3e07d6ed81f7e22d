//! Report module - structured selection reports and run summaries

pub mod export;
pub mod selection;
pub mod summary;

pub use export::{ProcessingReport, RunMetadata};
pub use selection::{ComponentVariance, RankedCorrelation, SelectionReport};
pub use summary::ProcessingSummary;
