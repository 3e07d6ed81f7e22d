//! Shared test utilities and fixture generators

use std::cell::RefCell;
use std::path::PathBuf;

use polars::prelude::*;
use tempfile::TempDir;

use prepline::config::{DataBalancingConfig, ProcessingContext};
use prepline::error::{PrepError, Result};
use prepline::pipeline::Balancer;

/// Create a DataFrame with known correlation structure for selection tests
///
/// Against the `label` column (absolute Pearson):
/// - `f1`: 0.996906 (strongest)
/// - `f2`: exact copy of f1 (ties with f1, corr(f1, f2) = 1.0)
/// - `f3`: 0.690476 (corr with f1 is 0.666201)
/// - `f4`: 0.412253 (corr with f1 is 0.478686, with f3 is -0.070385)
/// - `f5`: constant, degrades to zero
pub fn create_selection_dataframe() -> DataFrame {
    df! {
        "f1" => [1.2f64, 1.8, 3.1, 4.3, 4.9, 6.2, 6.8, 8.1],
        "f2" => [1.2f64, 1.8, 3.1, 4.3, 4.9, 6.2, 6.8, 8.1], // Exact copy of f1
        "f3" => [3.0f64, 1.0, 5.0, 2.0, 7.0, 4.0, 8.0, 6.0],
        "f4" => [5.0f64, 1.0, 4.0, 8.0, 2.0, 7.0, 3.0, 9.0],
        "f5" => [5.0f64; 8], // Zero variance
        "label" => [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0],
    }
    .unwrap()
}

/// Candidate columns of [`create_selection_dataframe`], target excluded
pub fn selection_candidates() -> Vec<String> {
    ["f1", "f2", "f3", "f4", "f5"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Create a DataFrame for PCA tests
///
/// `c1` and `c2` are strongly collinear so the first component dominates;
/// `c3` and `c4` add independent variance.
pub fn create_pca_dataframe() -> DataFrame {
    df! {
        "c1" => [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0],
        "c2" => [2.1f64, 3.9, 6.2, 8.1, 9.8, 12.2],
        "c3" => [5.0f64, 3.0, 6.0, 2.0, 7.0, 1.0],
        "c4" => [0.5f64, 0.1, 0.4, 0.2, 0.3, 0.6],
        "label" => [1.0f64, 0.0, 1.0, 0.0, 1.0, 0.0],
    }
    .unwrap()
}

/// Candidate columns of [`create_pca_dataframe`], target excluded
pub fn pca_candidates() -> Vec<String> {
    ["c1", "c2", "c3", "c4"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Create a deterministic DataFrame with `rows` samples and four features.
///
/// The modular sequences keep mutual correlations low, so a selector with
/// a reasonable threshold keeps whatever the max-features cap allows.
pub fn create_large_dataframe(rows: usize) -> DataFrame {
    let f1: Vec<f64> = (0..rows).map(|i| i as f64).collect();
    let f2: Vec<f64> = (0..rows).map(|i| ((i * 37) % 101) as f64).collect();
    let f3: Vec<f64> = (0..rows).map(|i| ((i * 53) % 97) as f64).collect();
    let f4: Vec<f64> = (0..rows).map(|i| (i as f64).sin()).collect();
    let label: Vec<f64> = (0..rows).map(|i| (i % 2) as f64).collect();

    df! {
        "f1" => f1,
        "f2" => f2,
        "f3" => f3,
        "f4" => f4,
        "label" => label,
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Balancer stub that appends the first `extra_rows` rows again
pub struct StubOversampler {
    pub extra_rows: usize,
}

impl Balancer for StubOversampler {
    fn balance(
        &self,
        df: &DataFrame,
        _feature_names: &[String],
        _config: &DataBalancingConfig,
        _target: &str,
        _ctx: &ProcessingContext,
    ) -> Result<DataFrame> {
        let extra = df.slice(0, self.extra_rows);
        Ok(df.vstack(&extra)?)
    }
}

/// Balancer stub that always fails
pub struct FailingBalancer;

impl Balancer for FailingBalancer {
    fn balance(
        &self,
        _df: &DataFrame,
        _feature_names: &[String],
        _config: &DataBalancingConfig,
        _target: &str,
        _ctx: &ProcessingContext,
    ) -> Result<DataFrame> {
        Err(PrepError::balancing("injected failure"))
    }
}

/// Balancer stub that records the feature list it was handed
#[derive(Default)]
pub struct RecordingBalancer {
    pub seen_features: RefCell<Option<Vec<String>>>,
}

impl Balancer for RecordingBalancer {
    fn balance(
        &self,
        df: &DataFrame,
        feature_names: &[String],
        _config: &DataBalancingConfig,
        _target: &str,
        _ctx: &ProcessingContext,
    ) -> Result<DataFrame> {
        *self.seen_features.borrow_mut() = Some(feature_names.to_vec());
        Ok(df.clone())
    }
}

/// Balancer stub that loses the target column
pub struct TargetDroppingBalancer;

impl Balancer for TargetDroppingBalancer {
    fn balance(
        &self,
        df: &DataFrame,
        _feature_names: &[String],
        _config: &DataBalancingConfig,
        target: &str,
        _ctx: &ProcessingContext,
    ) -> Result<DataFrame> {
        Ok(df.drop(target)?)
    }
}
