//! Configuration types for the processing pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PrepError, Result};

/// Strategy used by the feature-selection stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureSelectionMethod {
    /// Skip feature selection entirely.
    #[default]
    None,
    /// Rank by absolute target correlation and prune multicollinear candidates.
    Correlation,
    /// Project candidates onto principal components.
    Pca,
}

impl fmt::Display for FeatureSelectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FeatureSelectionMethod::None => "none",
            FeatureSelectionMethod::Correlation => "correlation",
            FeatureSelectionMethod::Pca => "pca",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for FeatureSelectionMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(FeatureSelectionMethod::None),
            "correlation" => Ok(FeatureSelectionMethod::Correlation),
            "pca" => Ok(FeatureSelectionMethod::Pca),
            other => Err(format!(
                "unknown feature selection method '{}' (expected none, correlation or pca)",
                other
            )),
        }
    }
}

/// Strategy used by the class-balancing stage.
///
/// The pipeline only distinguishes `None` from a configured method; the
/// balancing algorithm itself lives behind the
/// [`Balancer`](crate::pipeline::balance::Balancer) contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalancingMethod {
    /// Skip class balancing entirely.
    #[default]
    None,
    /// Synthetic minority oversampling.
    Smote,
    /// Plain duplication of minority-class rows.
    RandomOversampling,
}

impl fmt::Display for BalancingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BalancingMethod::None => "none",
            BalancingMethod::Smote => "smote",
            BalancingMethod::RandomOversampling => "random-oversampling",
        };
        write!(f, "{}", name)
    }
}

/// Kind of model the processed dataset is destined for.
///
/// Selection does not branch on this; it is carried through to the report
/// so downstream consumers can audit what a dataset was prepared for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ModelType {
    #[default]
    #[serde(rename = "binary")]
    BinaryClassification,
    #[serde(rename = "multiclass")]
    MultiClassification,
    #[serde(rename = "regression")]
    Regression,
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelType::BinaryClassification => "binary",
            ModelType::MultiClassification => "multiclass",
            ModelType::Regression => "regression",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ModelType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "binary" => Ok(ModelType::BinaryClassification),
            "multiclass" => Ok(ModelType::MultiClassification),
            "regression" => Ok(ModelType::Regression),
            other => Err(format!(
                "unknown model type '{}' (expected binary, multiclass or regression)",
                other
            )),
        }
    }
}

/// Settings for the feature-selection stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureEngineeringConfig {
    pub method: FeatureSelectionMethod,
    /// Maximum number of features the correlation selector may keep.
    ///
    /// `0` triggers the fallback rule: the single best-ranked candidate is
    /// still selected so a non-empty candidate list never yields an empty
    /// feature set.
    pub max_features: usize,
    /// Highest absolute pairwise correlation tolerated between a candidate
    /// and any already-selected feature. Must lie within `[0, 1]`.
    pub multicollinearity_threshold: f64,
    /// Number of principal components requested from the PCA selector.
    ///
    /// `0` or more than the candidate count is clamped (with a report
    /// warning) rather than rejected.
    pub number_of_components: usize,
    /// Priority deciding whether selection runs before or after balancing;
    /// the lower order runs first and a tie favors balancing.
    pub execution_order: i32,
}

impl Default for FeatureEngineeringConfig {
    fn default() -> Self {
        Self {
            method: FeatureSelectionMethod::None,
            max_features: 10,
            multicollinearity_threshold: 0.9,
            number_of_components: 3,
            execution_order: 2,
        }
    }
}

impl FeatureEngineeringConfig {
    /// Check the fields that cannot be silently clamped.
    pub fn validate(&self) -> Result<()> {
        if !self.multicollinearity_threshold.is_finite()
            || !(0.0..=1.0).contains(&self.multicollinearity_threshold)
        {
            return Err(PrepError::configuration(format!(
                "multicollinearity threshold must be within [0.0, 1.0], got {}",
                self.multicollinearity_threshold
            )));
        }
        Ok(())
    }
}

/// Settings for the class-balancing stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataBalancingConfig {
    pub method: BalancingMethod,
    /// Priority relative to `FeatureEngineeringConfig::execution_order`.
    pub execution_order: i32,
}

impl Default for DataBalancingConfig {
    fn default() -> Self {
        Self {
            method: BalancingMethod::None,
            execution_order: 1,
        }
    }
}

/// Complete configuration for one processing run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Name of the supervised target column.
    pub target_field: String,
    pub model_type: ModelType,
    pub feature_engineering: FeatureEngineeringConfig,
    pub balancing: DataBalancingConfig,
}

impl ProcessingConfig {
    /// Validate the run configuration before any stage executes.
    pub fn validate(&self) -> Result<()> {
        if self.target_field.trim().is_empty() {
            return Err(PrepError::configuration("target field name is empty"));
        }
        self.feature_engineering.validate()
    }
}

/// Convergence settings for the power-iteration eigensolver.
#[derive(Debug, Clone, Copy)]
pub struct PowerIterationSettings {
    /// Upper bound on iterations per component.
    pub max_iterations: usize,
    /// Convergence threshold on the change between successive vectors.
    pub tolerance: f64,
}

impl Default for PowerIterationSettings {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            tolerance: 1e-10,
        }
    }
}

/// Caller-owned context threaded by reference through every stage.
///
/// There is no process-wide singleton: each run carries its own seed (for
/// balancer implementations that sample) and numeric settings, so
/// independent runs cannot interfere with each other.
#[derive(Debug, Clone, Copy)]
pub struct ProcessingContext {
    /// Seed available to balancer implementations.
    pub seed: u64,
    pub power_iteration: PowerIterationSettings,
}

impl Default for ProcessingContext {
    fn default() -> Self {
        Self {
            seed: 42,
            power_iteration: PowerIterationSettings::default(),
        }
    }
}
