//! Processing orchestrator.
//!
//! Sequences the optional balancing and feature-selection stages over a
//! dataset and assembles the record handed to training. Stages run
//! strictly one after the other; each consumes the previous stage's
//! output dataset. A stage failure is logged with its context and
//! propagated unchanged, so the caller sees either a complete
//! [`ProcessedData`] or a single error.

use std::collections::HashSet;

use log::{debug, error, info};
use polars::prelude::*;

use crate::config::{
    BalancingMethod, FeatureSelectionMethod, ProcessingConfig, ProcessingContext,
};
use crate::error::{PrepError, Result};
use crate::pipeline::balance::Balancer;
use crate::pipeline::frame::{has_feature_vector, with_feature_vector};
use crate::pipeline::selection::selector_for;
use crate::report::selection::SelectionReport;

/// Final artifact of one processing run.
#[derive(Debug)]
pub struct ProcessedData {
    /// Dataset after all configured stages ran.
    pub data: DataFrame,
    /// Feature names describing the final feature-vector column.
    pub feature_names: Vec<String>,
    /// Row count before any stage ran.
    pub original_sample_count: usize,
    /// Row count after balancing; equals the original when balancing is off.
    pub balanced_sample_count: usize,
    /// Account of the selection stage; empty when selection is off.
    pub selection_report: SelectionReport,
    pub selection_method: FeatureSelectionMethod,
    pub balancing_method: BalancingMethod,
    pub balancing_order: i32,
    pub selection_order: i32,
}

#[derive(Clone, Copy)]
enum Stage {
    Balancing,
    Selection,
}

/// Run the configured balancing and selection stages over `df`.
///
/// `enabled_fields` lists the columns available to this run, target
/// included; the candidate set is that list minus the target, original
/// order preserved and duplicates dropped. When the dataset has no
/// feature-vector column yet, a baseline vector over all candidates is
/// synthesized first so a balancer that expects one can operate. The
/// stage order follows the configured execution orders, a tie favoring
/// balancing. A balancer must be supplied whenever the balancing method
/// is configured.
pub fn process_data(
    df: &DataFrame,
    enabled_fields: &[String],
    config: &ProcessingConfig,
    balancer: Option<&dyn Balancer>,
    ctx: &ProcessingContext,
) -> Result<ProcessedData> {
    config.validate()?;

    let mut current_features = candidate_features(enabled_fields, &config.target_field);
    info!(
        "processing {} rows with {} candidate features (selection: {}, balancing: {})",
        df.height(),
        current_features.len(),
        config.feature_engineering.method,
        config.balancing.method
    );

    let mut data = if has_feature_vector(df) {
        df.clone()
    } else {
        debug!(
            "synthesizing baseline feature vector from {} candidate columns",
            current_features.len()
        );
        with_feature_vector(df, &current_features)?
    };

    let original_sample_count = data.height();
    let mut balanced_sample_count = original_sample_count;
    let mut selection_report = SelectionReport::empty();

    let balancing_first =
        config.balancing.execution_order <= config.feature_engineering.execution_order;
    debug!(
        "stage order: {}",
        if balancing_first {
            "balancing before selection"
        } else {
            "selection before balancing"
        }
    );
    let stages = if balancing_first {
        [Stage::Balancing, Stage::Selection]
    } else {
        [Stage::Selection, Stage::Balancing]
    };

    for stage in stages {
        match stage {
            Stage::Balancing => {
                if config.balancing.method == BalancingMethod::None {
                    continue;
                }
                let balancer = balancer.ok_or_else(|| {
                    PrepError::configuration(format!(
                        "balancing method '{}' is configured but no balancer was supplied",
                        config.balancing.method
                    ))
                })?;

                info!("running balancing stage ({})", config.balancing.method);
                data = balancer
                    .balance(
                        &data,
                        &current_features,
                        &config.balancing,
                        &config.target_field,
                        ctx,
                    )
                    .map_err(|err| {
                        error!("balancing stage failed: {}", err);
                        err
                    })?;
                if data.column(&config.target_field).is_err() {
                    return Err(PrepError::schema(format!(
                        "balancer dropped target column '{}'",
                        config.target_field
                    )));
                }
                balanced_sample_count = data.height();
                info!("balancing adjusted sample count to {}", balanced_sample_count);
            }
            Stage::Selection => {
                let Some(selector) = selector_for(config.feature_engineering.method) else {
                    continue;
                };

                info!(
                    "running feature selection stage ({})",
                    config.feature_engineering.method
                );
                let result = selector
                    .select_features(
                        &data,
                        &current_features,
                        config.model_type,
                        &config.target_field,
                        &config.feature_engineering,
                        ctx,
                    )
                    .map_err(|err| {
                        error!("feature selection stage failed: {}", err);
                        err
                    })?;
                data = result.data;
                current_features = result.selected_features;
                selection_report = result.report;
            }
        }
    }

    Ok(ProcessedData {
        data,
        feature_names: current_features,
        original_sample_count,
        balanced_sample_count,
        selection_report,
        selection_method: config.feature_engineering.method,
        balancing_method: config.balancing.method,
        balancing_order: config.balancing.execution_order,
        selection_order: config.feature_engineering.execution_order,
    })
}

/// Order-preserving set difference of enabled fields minus the target.
fn candidate_features(enabled_fields: &[String], target: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut features = Vec::new();
    for name in enabled_fields {
        if name == target || !seen.insert(name.as_str()) {
            continue;
        }
        features.push(name.clone());
    }
    features
}
