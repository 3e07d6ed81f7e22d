//! Correlation matrix engine.
//!
//! Computes absolute target correlations and the full pairwise Pearson
//! matrix for a candidate column set in one pass: every column is
//! standardized once (in parallel), scaled by `1/sqrt(n)`, and a single
//! `Zᵀ·Z` product then yields every pairwise coefficient.

use faer::Mat;
use polars::prelude::*;
use rayon::prelude::*;

use crate::error::Result;
use crate::pipeline::frame::numeric_values;

/// Outcome of a single correlation computation.
///
/// Degenerate inputs (zero variance, non-finite values) never abort the
/// surrounding selection run; the coefficient degrades to zero and the
/// marker records that it did, so degradation stays observable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CorrelationValue {
    /// A well-defined Pearson coefficient.
    Coefficient(f64),
    /// The computation was undefined for this column; treated as `0.0`.
    DegradedToZero,
}

impl CorrelationValue {
    /// Numeric value used by ranking and redundancy checks.
    pub fn value(&self) -> f64 {
        match self {
            CorrelationValue::Coefficient(v) => *v,
            CorrelationValue::DegradedToZero => 0.0,
        }
    }

    /// Whether this value is the degraded-to-zero fallback.
    pub fn is_degraded(&self) -> bool {
        matches!(self, CorrelationValue::DegradedToZero)
    }
}

/// Correlation structure of one candidate set against a target column.
#[derive(Debug)]
pub struct CorrelationAnalysis {
    features: Vec<String>,
    target_correlations: Vec<CorrelationValue>,
    matrix: Mat<f64>,
    degraded: Vec<bool>,
    target_degraded: bool,
}

impl CorrelationAnalysis {
    /// Candidate names in their original order.
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Absolute target correlation for the candidate at `index`, or
    /// `None` when the index is outside the candidate list.
    pub fn target_correlation(&self, index: usize) -> Option<CorrelationValue> {
        self.target_correlations.get(index).copied()
    }

    /// Signed pairwise Pearson coefficient between two candidates by
    /// index, or `None` when either index is outside the candidate list.
    pub fn pairwise(&self, a: usize, b: usize) -> Option<f64> {
        if a < self.features.len() && b < self.features.len() {
            Some(self.matrix[(a, b)])
        } else {
            None
        }
    }

    /// Whether the candidate at `index` degraded to zero, or `None` when
    /// the index is outside the candidate list.
    pub fn is_degraded(&self, index: usize) -> Option<bool> {
        self.degraded.get(index).copied()
    }

    /// Whether the target column itself was degenerate.
    pub fn target_degraded(&self) -> bool {
        self.target_degraded
    }

    /// Candidate indices ranked by descending absolute target correlation.
    ///
    /// The sort is stable: ties keep the original candidate ordering.
    pub fn ranked_indices(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.features.len()).collect();
        order.sort_by(|&a, &b| {
            self.target_correlations[b]
                .value()
                .partial_cmp(&self.target_correlations[a].value())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        order
    }
}

/// Compute target and pairwise correlations for `candidates` against `target`.
///
/// Column extraction follows the coercion rules of
/// [`numeric_values`](crate::pipeline::frame::numeric_values); a missing or
/// non numeric/boolean column aborts the call. Degenerate columns
/// standardize to the zero vector, so every coefficient involving them is
/// `0.0` and the candidate is flagged as degraded. A degenerate target
/// degrades all target correlations the same way.
pub fn analyze_correlations(
    df: &DataFrame,
    candidates: &[String],
    target: &str,
) -> Result<CorrelationAnalysis> {
    let raw: Vec<Vec<f64>> = candidates
        .iter()
        .map(|name| numeric_values(df, name))
        .collect::<Result<_>>()?;
    let target_raw = numeric_values(df, target)?;

    let standardized: Vec<Option<Vec<f64>>> =
        raw.par_iter().map(|values| standardize(values)).collect();
    let target_standardized = standardize(&target_raw);
    let target_degraded = target_standardized.is_none();
    let degraded: Vec<bool> = standardized.iter().map(|column| column.is_none()).collect();

    // Z holds one standardized candidate per column; degenerate columns
    // stay zero so their coefficients come out as 0.0.
    let n_rows = df.height();
    let n_cols = candidates.len();
    let mut z = Mat::<f64>::zeros(n_rows, n_cols);
    for (col_idx, column) in standardized.iter().enumerate() {
        if let Some(values) = column {
            for (row_idx, &value) in values.iter().enumerate() {
                z[(row_idx, col_idx)] = value;
            }
        }
    }

    let mut matrix = z.transpose() * &z;
    // Pin the diagonal so the unit self-correlation holds exactly.
    for idx in 0..n_cols {
        if !degraded[idx] {
            matrix[(idx, idx)] = 1.0;
        }
    }

    let target_correlations: Vec<CorrelationValue> = match &target_standardized {
        Some(target_z) => standardized
            .iter()
            .map(|column| match column {
                Some(values) => {
                    let dot: f64 = values
                        .iter()
                        .zip(target_z.iter())
                        .map(|(a, b)| a * b)
                        .sum();
                    CorrelationValue::Coefficient(dot.abs())
                }
                None => CorrelationValue::DegradedToZero,
            })
            .collect(),
        None => vec![CorrelationValue::DegradedToZero; n_cols],
    };

    Ok(CorrelationAnalysis {
        features: candidates.to_vec(),
        target_correlations,
        matrix,
        degraded,
        target_degraded,
    })
}

/// Standardize a column to zero mean and unit variance, scaled by
/// `1/sqrt(n)` so the dot product of two standardized columns is their
/// Pearson coefficient. Returns `None` for degenerate columns (empty,
/// zero variance, or containing non-finite values).
fn standardize(values: &[f64]) -> Option<Vec<f64>> {
    let n = values.len();
    if n == 0 || values.iter().any(|value| !value.is_finite()) {
        return None;
    }

    let n_f = n as f64;
    let mean = values.iter().sum::<f64>() / n_f;
    let variance = values
        .iter()
        .map(|value| (value - mean) * (value - mean))
        .sum::<f64>()
        / n_f;
    // Exact zero only; a valid small-magnitude column can have a variance
    // far below any fixed epsilon.
    if variance == 0.0 {
        return None;
    }

    let scale = 1.0 / (variance.sqrt() * n_f.sqrt());
    Some(values.iter().map(|value| (value - mean) * scale).collect())
}
