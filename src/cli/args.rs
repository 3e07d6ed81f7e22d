//! Command-line argument definitions using clap

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use crate::config::{
    DataBalancingConfig, FeatureEngineeringConfig, FeatureSelectionMethod, ModelType,
    ProcessingConfig,
};

/// Prepline - select features and assemble training-ready tabular data
#[derive(Parser, Debug)]
#[command(name = "prepline")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Input dataset file (CSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Target column for supervised selection
    #[arg(short, long)]
    pub target: String,

    /// Feature selection method.
    /// Options: "correlation" (default), "pca", or "none"
    #[arg(long, default_value = "correlation")]
    pub method: String,

    /// Maximum number of features kept by correlation selection.
    /// With 0, the single best-ranked candidate is still kept.
    #[arg(long, default_value = "10")]
    pub max_features: usize,

    /// Highest absolute pairwise correlation tolerated between two selected
    /// features before the later candidate is skipped
    #[arg(long, default_value = "0.9", value_parser = validate_threshold)]
    pub multicollinearity_threshold: f64,

    /// Number of principal components for PCA selection.
    /// Out-of-range values are clamped with a report warning.
    #[arg(long, default_value = "3")]
    pub components: usize,

    /// Model type recorded in the report.
    /// Options: "binary" (default), "multiclass", or "regression"
    #[arg(long, default_value = "binary")]
    pub model_type: String,

    /// Candidate feature columns, comma separated.
    /// Defaults to every column except the target.
    #[arg(long, value_delimiter = ',')]
    pub features: Option<Vec<String>>,

    /// Columns to drop before processing, comma separated
    #[arg(long, value_delimiter = ',')]
    pub drop_columns: Option<Vec<String>>,

    /// Output file path (CSV or Parquet, determined by extension).
    /// Defaults to input directory with '_processed' suffix.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report file path.
    /// Defaults to input directory with '_selection_report.json' suffix.
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Rows to scan for CSV schema inference (0 = full scan)
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

/// Validate that the multicollinearity threshold lies within [0, 1]
fn validate_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(format!(
            "threshold must be between 0.0 and 1.0, got {}",
            value
        ));
    }
    Ok(value)
}

impl Cli {
    /// Resolve the output path, deriving one from the input when not given.
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => {
                let parent = self.input.parent().unwrap_or_else(|| Path::new("."));
                let stem = self
                    .input
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("output");
                let extension = self
                    .input
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("csv");
                parent.join(format!("{}_processed.{}", stem, extension))
            }
        }
    }

    /// Resolve the report path, deriving one next to the input when not given.
    pub fn report_path(&self) -> PathBuf {
        match &self.report {
            Some(path) => path.clone(),
            None => {
                let parent = self.input.parent().unwrap_or_else(|| Path::new("."));
                let stem = self
                    .input
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("output");
                parent.join(format!("{}_selection_report.json", stem))
            }
        }
    }

    /// Build the processing configuration from the parsed arguments.
    ///
    /// The binary runs selection only; balancing stays at its `None`
    /// default since no balancer ships with it.
    pub fn processing_config(&self) -> anyhow::Result<ProcessingConfig> {
        let method: FeatureSelectionMethod = self
            .method
            .parse()
            .map_err(|msg: String| anyhow::anyhow!(msg))
            .context("Invalid --method")?;
        let model_type: ModelType = self
            .model_type
            .parse()
            .map_err(|msg: String| anyhow::anyhow!(msg))
            .context("Invalid --model-type")?;

        Ok(ProcessingConfig {
            target_field: self.target.clone(),
            model_type,
            feature_engineering: FeatureEngineeringConfig {
                method,
                max_features: self.max_features,
                multicollinearity_threshold: self.multicollinearity_threshold,
                number_of_components: self.components,
                ..Default::default()
            },
            balancing: DataBalancingConfig::default(),
        })
    }
}
