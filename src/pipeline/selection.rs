//! Feature-selection capability and the correlation-based selector.

use log::{debug, info};
use polars::prelude::*;

use crate::config::{
    FeatureEngineeringConfig, FeatureSelectionMethod, ModelType, ProcessingContext,
};
use crate::error::{PrepError, Result};
use crate::pipeline::correlation::analyze_correlations;
use crate::pipeline::frame::with_feature_vector;
use crate::pipeline::pca::PcaSelector;
use crate::report::selection::{RankedCorrelation, SelectionReport};

/// Outcome of one feature-selection stage.
#[derive(Debug)]
pub struct SelectionResult {
    /// Dataset with the assembled feature-vector column; all other columns
    /// pass through unchanged.
    pub data: DataFrame,
    /// Names describing the vector's dimensions, in order.
    pub selected_features: Vec<String>,
    /// Structured account of how the selection was made.
    pub report: SelectionReport,
}

/// Contract every selection strategy satisfies.
///
/// The orchestrator resolves an implementation from the configured method
/// tag and treats it uniformly from there; no caller branches on the
/// concrete type.
pub trait FeatureSelector {
    fn select_features(
        &self,
        df: &DataFrame,
        candidates: &[String],
        model_type: ModelType,
        target: &str,
        config: &FeatureEngineeringConfig,
        ctx: &ProcessingContext,
    ) -> Result<SelectionResult>;
}

/// Resolve the closed method tag to a selector; `None` means the stage is
/// skipped and the dataset passes through untouched.
pub fn selector_for(method: FeatureSelectionMethod) -> Option<Box<dyn FeatureSelector>> {
    match method {
        FeatureSelectionMethod::None => None,
        FeatureSelectionMethod::Correlation => Some(Box::new(CorrelationSelector)),
        FeatureSelectionMethod::Pca => Some(Box::new(PcaSelector)),
    }
}

/// Greedy correlation-ranked selector with multicollinearity pruning.
///
/// Candidates are ranked by descending absolute target correlation (ties
/// keep candidate order) and admitted greedily; a candidate whose absolute
/// correlation with any already-selected feature exceeds the configured
/// threshold is skipped.
pub struct CorrelationSelector;

impl FeatureSelector for CorrelationSelector {
    fn select_features(
        &self,
        df: &DataFrame,
        candidates: &[String],
        model_type: ModelType,
        target: &str,
        config: &FeatureEngineeringConfig,
        _ctx: &ProcessingContext,
    ) -> Result<SelectionResult> {
        config.validate()?;
        if candidates.is_empty() {
            return Err(PrepError::configuration(
                "feature selection requires at least one candidate feature",
            ));
        }

        info!(
            "correlation selection over {} candidates (max {}, threshold {:.4})",
            candidates.len(),
            config.max_features,
            config.multicollinearity_threshold
        );

        let analysis = analyze_correlations(df, candidates, target)?;
        let ranked = analysis.ranked_indices();

        let mut selected: Vec<usize> = Vec::new();
        if config.max_features > 0 {
            for &candidate in &ranked {
                let max_with_selected = selected
                    .iter()
                    .filter_map(|&chosen| analysis.pairwise(candidate, chosen))
                    .map(f64::abs)
                    .fold(0.0_f64, f64::max);
                if max_with_selected > config.multicollinearity_threshold {
                    debug!(
                        "skipping '{}': correlation {:.4} with a selected feature exceeds the threshold",
                        analysis.features()[candidate],
                        max_with_selected
                    );
                    continue;
                }
                selected.push(candidate);
                if selected.len() == config.max_features {
                    break;
                }
            }
        }

        // A non-empty candidate list never yields an empty selection; with
        // max_features == 0 the greedy pass is skipped entirely, so fall
        // back to the single top-ranked candidate.
        if selected.is_empty() {
            selected.push(ranked[0]);
        }

        let selected_features: Vec<String> = selected
            .iter()
            .map(|&idx| analysis.features()[idx].clone())
            .collect();

        let data = with_feature_vector(df, &selected_features)?;

        let ranked_correlations: Vec<RankedCorrelation> = ranked
            .iter()
            .filter_map(|&idx| {
                let correlation = analysis.target_correlation(idx)?;
                Some(RankedCorrelation {
                    feature: analysis.features()[idx].clone(),
                    correlation: correlation.value(),
                    degraded: correlation.is_degraded(),
                })
            })
            .collect();
        let report = SelectionReport::correlation(
            model_type,
            config.multicollinearity_threshold,
            ranked_correlations,
            selected_features.clone(),
        );

        info!(
            "selected {} of {} candidate features",
            selected_features.len(),
            candidates.len()
        );

        Ok(SelectionResult {
            data,
            selected_features,
            report,
        })
    }
}
