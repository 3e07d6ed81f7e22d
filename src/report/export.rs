//! JSON export of processing runs.
//!
//! The exported report bundles run metadata with the counts, feature
//! names, and the structured selection report, so a processed dataset can
//! be audited without re-running the pipeline. Timestamps live only here;
//! the rendered selection report itself stays timestamp-free.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::config::ProcessingConfig;
use crate::pipeline::process::ProcessedData;
use crate::report::selection::SelectionReport;

/// Metadata identifying one processing run.
#[derive(Debug, Serialize)]
pub struct RunMetadata {
    /// RFC 3339 timestamp of report generation
    pub generated_at: String,
    /// Version of the tool that produced the report
    pub tool_version: String,
    /// Input dataset path as given by the user
    pub input_file: String,
}

/// Full report written next to the processed dataset.
#[derive(Debug, Serialize)]
pub struct ProcessingReport<'a> {
    pub metadata: RunMetadata,
    pub config: &'a ProcessingConfig,
    pub original_sample_count: usize,
    pub balanced_sample_count: usize,
    pub feature_names: &'a [String],
    pub selection: &'a SelectionReport,
}

impl<'a> ProcessingReport<'a> {
    /// Assemble a report for a finished run.
    pub fn new(
        input_file: &Path,
        config: &'a ProcessingConfig,
        processed: &'a ProcessedData,
    ) -> Self {
        ProcessingReport {
            metadata: RunMetadata {
                generated_at: Utc::now().to_rfc3339(),
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: input_file.display().to_string(),
            },
            config,
            original_sample_count: processed.original_sample_count,
            balanced_sample_count: processed.balanced_sample_count,
            feature_names: &processed.feature_names,
            selection: &processed.selection_report,
        }
    }

    /// Write the report as pretty-printed JSON.
    pub fn export(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize processing report")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report file: {}", path.display()))?;
        Ok(())
    }
}
