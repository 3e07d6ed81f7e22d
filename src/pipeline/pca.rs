//! PCA-based feature selector.
//!
//! Projects min-max normalized candidate columns onto their top principal
//! components. Eigenpairs come from power iteration with deflation over the
//! sample covariance matrix; the start vector is fixed, so the projection
//! is deterministic for a given dataset and configuration.

use faer::Mat;
use log::{info, warn};
use polars::prelude::*;

use crate::config::{
    FeatureEngineeringConfig, ModelType, PowerIterationSettings, ProcessingContext,
};
use crate::error::{PrepError, Result};
use crate::pipeline::frame::{numeric_values, replace_feature_vector};
use crate::pipeline::selection::{FeatureSelector, SelectionResult};
use crate::report::selection::{ComponentVariance, SelectionReport};

/// Component count used when the requested number cannot be honored.
const DEFAULT_COMPONENT_CAP: usize = 3;

/// Selector that replaces candidate features with principal-component
/// scores.
///
/// Output dimensions are named `PCA_Component_1 .. PCA_Component_k` and are
/// deliberately not traceable back to input columns; that loss of
/// interpretability is the documented trade against the correlation
/// selector.
pub struct PcaSelector;

impl FeatureSelector for PcaSelector {
    fn select_features(
        &self,
        df: &DataFrame,
        candidates: &[String],
        model_type: ModelType,
        target: &str,
        config: &FeatureEngineeringConfig,
        ctx: &ProcessingContext,
    ) -> Result<SelectionResult> {
        config.validate()?;
        if candidates.is_empty() {
            return Err(PrepError::configuration(
                "feature selection requires at least one candidate feature",
            ));
        }
        if df.column(target).is_err() {
            return Err(PrepError::schema(format!(
                "column '{}' not found in dataset",
                target
            )));
        }

        let mut warnings = Vec::new();
        let requested = config.number_of_components;
        let components = if requested == 0 || requested > candidates.len() {
            let clamped = candidates.len().min(DEFAULT_COMPONENT_CAP);
            let message = format!(
                "requested {} components for {} candidate features; using {}",
                requested,
                candidates.len(),
                clamped
            );
            warn!("{}", message);
            warnings.push(message);
            clamped
        } else {
            requested
        };

        let n_rows = df.height();
        if n_rows < 2 {
            return Err(PrepError::transform(
                "principal component analysis requires at least two rows",
            ));
        }

        info!(
            "pca selection over {} candidates, extracting {} components",
            candidates.len(),
            components
        );

        let mut normalized = Vec::with_capacity(candidates.len());
        for name in candidates {
            let values = numeric_values(df, name)?;
            if values.iter().any(|value| !value.is_finite()) {
                return Err(PrepError::transform(format!(
                    "column '{}' contains non-finite values; cannot project onto principal components",
                    name
                )));
            }
            normalized.push(min_max_normalize(&values));
        }

        // Center the normalized matrix and form the sample covariance.
        let n_dims = normalized.len();
        let n_f = n_rows as f64;
        let means: Vec<f64> = normalized
            .iter()
            .map(|column| column.iter().sum::<f64>() / n_f)
            .collect();
        let mut centered = Mat::<f64>::zeros(n_rows, n_dims);
        for (dim, column) in normalized.iter().enumerate() {
            for (row, value) in column.iter().enumerate() {
                centered[(row, dim)] = value - means[dim];
            }
        }
        let mut covariance = centered.transpose() * &centered;
        let denom = (n_rows - 1) as f64;
        for i in 0..n_dims {
            for j in 0..n_dims {
                covariance[(i, j)] /= denom;
            }
        }

        let total_variance: f64 = (0..n_dims).map(|i| covariance[(i, i)]).sum();

        let mut working = covariance.clone();
        let mut eigenpairs: Vec<(f64, Vec<f64>)> = Vec::with_capacity(components);
        for _ in 0..components {
            let (eigenvalue, vector) = power_iteration(&working, &ctx.power_iteration)
                .ok_or_else(|| {
                    PrepError::transform(
                        "eigen-decomposition did not produce a finite component",
                    )
                })?;
            deflate(&mut working, eigenvalue, &vector);
            eigenpairs.push((eigenvalue, vector));
        }

        // Score matrix: one row per sample, one column per component.
        let mut projection = Mat::<f64>::zeros(n_dims, components);
        for (k, (_, vector)) in eigenpairs.iter().enumerate() {
            for (dim, &value) in vector.iter().enumerate() {
                projection[(dim, k)] = value;
            }
        }
        let scores = centered.as_ref() * &projection;

        let mut rows = Vec::with_capacity(n_rows);
        for row in 0..n_rows {
            let mut values = Vec::with_capacity(components);
            for k in 0..components {
                let score = scores[(row, k)];
                if !score.is_finite() {
                    return Err(PrepError::transform(
                        "projection produced a non-finite component score",
                    ));
                }
                values.push(score);
            }
            rows.push(values);
        }

        let data = replace_feature_vector(df, &rows)?;

        let selected_features: Vec<String> = (1..=components)
            .map(|k| format!("PCA_Component_{}", k))
            .collect();
        let component_variances: Vec<ComponentVariance> = eigenpairs
            .iter()
            .zip(selected_features.iter())
            .map(|((eigenvalue, _), name)| ComponentVariance {
                component: name.clone(),
                explained_variance: if total_variance > 0.0 {
                    eigenvalue / total_variance
                } else {
                    0.0
                },
            })
            .collect();
        let report = SelectionReport::pca(
            model_type,
            component_variances,
            selected_features.clone(),
            warnings,
        );

        Ok(SelectionResult {
            data,
            selected_features,
            report,
        })
    }
}

/// Scale values into `[0, 1]`; a zero-range dimension maps to all zeros.
fn min_max_normalize(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    // Exact zero only, matching the correlation engine's degenerate-column
    // cutoff; small-magnitude dimensions still spread across [0, 1].
    if range == 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|value| (value - min) / range).collect()
}

/// Largest eigenpair of a symmetric positive semi-definite matrix.
///
/// Returns `None` when the iteration produces non-finite values. A matrix
/// that annihilates the start vector (no variance left) yields eigenvalue
/// zero with the last iterate as its vector.
fn power_iteration(
    matrix: &Mat<f64>,
    settings: &PowerIterationSettings,
) -> Option<(f64, Vec<f64>)> {
    let n = matrix.nrows();
    let mut vector: Vec<f64> = (0..n).map(|i| (i as f64 + 1.0).sin()).collect();
    normalize(&mut vector)?;

    let mut eigenvalue = 0.0;
    for _ in 0..settings.max_iterations {
        let mut next = vec![0.0; n];
        for i in 0..n {
            let mut acc = 0.0;
            for j in 0..n {
                acc += matrix[(i, j)] * vector[j];
            }
            next[i] = acc;
        }

        let norm = next.iter().map(|value| value * value).sum::<f64>().sqrt();
        if !norm.is_finite() {
            return None;
        }
        if norm <= f64::EPSILON {
            eigenvalue = 0.0;
            break;
        }
        for value in next.iter_mut() {
            *value /= norm;
        }

        let delta: f64 = next
            .iter()
            .zip(vector.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();
        vector = next;
        eigenvalue = norm;
        if delta < settings.tolerance {
            break;
        }
    }

    if !eigenvalue.is_finite() || vector.iter().any(|value| !value.is_finite()) {
        return None;
    }
    Some((eigenvalue, vector))
}

/// Remove an eigenpair's contribution: `A -= λ·v·vᵀ`.
fn deflate(matrix: &mut Mat<f64>, eigenvalue: f64, vector: &[f64]) {
    let n = matrix.nrows();
    for i in 0..n {
        for j in 0..n {
            matrix[(i, j)] -= eigenvalue * vector[i] * vector[j];
        }
    }
}

/// Scale a vector to unit norm in place; `None` for a near-zero vector.
fn normalize(vector: &mut [f64]) -> Option<()> {
    let norm = vector.iter().map(|value| value * value).sum::<f64>().sqrt();
    if !norm.is_finite() || norm <= f64::EPSILON {
        return None;
    }
    for value in vector.iter_mut() {
        *value /= norm;
    }
    Some(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max_normalize_bounds() {
        let normalized = min_max_normalize(&[2.0, 4.0, 6.0, 10.0]);
        assert_eq!(normalized[0], 0.0);
        assert_eq!(normalized[3], 1.0);
        assert!((normalized[1] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_min_max_normalize_constant_dimension() {
        assert_eq!(min_max_normalize(&[3.0, 3.0, 3.0]), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_min_max_normalize_small_range() {
        let normalized = min_max_normalize(&[1e-9, 2e-9, 3e-9]);
        assert_eq!(normalized[0], 0.0);
        assert_eq!(normalized[2], 1.0);
        assert!((normalized[1] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_power_iteration_dominant_eigenpair() {
        let mut matrix = Mat::<f64>::zeros(2, 2);
        matrix[(0, 0)] = 2.0;
        matrix[(1, 1)] = 1.0;

        let settings = PowerIterationSettings::default();
        let (eigenvalue, vector) = power_iteration(&matrix, &settings).unwrap();
        assert!((eigenvalue - 2.0).abs() < 1e-8);
        assert!((vector[0].abs() - 1.0).abs() < 1e-6);
        assert!(vector[1].abs() < 1e-6);
    }

    #[test]
    fn test_deflation_exposes_second_eigenpair() {
        let mut matrix = Mat::<f64>::zeros(2, 2);
        matrix[(0, 0)] = 2.0;
        matrix[(1, 1)] = 1.0;

        let settings = PowerIterationSettings::default();
        let (first, vector) = power_iteration(&matrix, &settings).unwrap();
        deflate(&mut matrix, first, &vector);
        let (second, vector) = power_iteration(&matrix, &settings).unwrap();
        assert!((second - 1.0).abs() < 1e-6);
        assert!((vector[1].abs() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_power_iteration_zero_matrix() {
        let matrix = Mat::<f64>::zeros(3, 3);
        let settings = PowerIterationSettings::default();
        let (eigenvalue, _) = power_iteration(&matrix, &settings).unwrap();
        assert_eq!(eigenvalue, 0.0);
    }
}
