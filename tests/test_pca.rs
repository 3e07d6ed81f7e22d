//! Integration tests for the PCA feature selector

use polars::prelude::*;
use prepline::config::{
    FeatureEngineeringConfig, FeatureSelectionMethod, ModelType, ProcessingContext,
};
use prepline::error::PrepError;
use prepline::pipeline::{feature_vector_rows, FeatureSelector, PcaSelector, SelectionResult};

#[path = "common/mod.rs"]
mod common;

fn run_pca(
    df: &DataFrame,
    candidates: &[String],
    components: usize,
) -> prepline::error::Result<SelectionResult> {
    let config = FeatureEngineeringConfig {
        method: FeatureSelectionMethod::Pca,
        number_of_components: components,
        ..Default::default()
    };
    PcaSelector.select_features(
        df,
        candidates,
        ModelType::BinaryClassification,
        "label",
        &config,
        &ProcessingContext::default(),
    )
}

#[test]
fn test_oversized_request_clamps_with_warning() {
    let df = common::create_pca_dataframe();

    let result = run_pca(&df, &common::pca_candidates(), 10).unwrap();

    assert_eq!(
        result.selected_features,
        vec!["PCA_Component_1", "PCA_Component_2", "PCA_Component_3"]
    );
    assert_eq!(result.report.warnings.len(), 1);
    assert_eq!(
        result.report.warnings[0],
        "requested 10 components for 4 candidate features; using 3"
    );

    let rows = feature_vector_rows(&result.data).unwrap();
    assert_eq!(rows.len(), df.height());
    assert!(rows.iter().all(|row| row.len() == 3));
}

#[test]
fn test_zero_request_clamps_with_warning() {
    let df = common::create_pca_dataframe();

    let result = run_pca(&df, &common::pca_candidates(), 0).unwrap();

    assert_eq!(result.selected_features.len(), 3);
    assert!(!result.report.warnings.is_empty());
}

#[test]
fn test_clamp_respects_small_candidate_sets() {
    let df = common::create_pca_dataframe();
    let two = vec!["c1".to_string(), "c2".to_string()];

    let result = run_pca(&df, &two, 5).unwrap();

    // The cap is the smaller of candidate count and three
    assert_eq!(
        result.selected_features,
        vec!["PCA_Component_1", "PCA_Component_2"]
    );
    assert!(!result.report.warnings.is_empty());
}

#[test]
fn test_valid_request_is_honored_without_warning() {
    let df = common::create_pca_dataframe();

    let result = run_pca(&df, &common::pca_candidates(), 2).unwrap();

    assert_eq!(
        result.selected_features,
        vec!["PCA_Component_1", "PCA_Component_2"]
    );
    assert!(result.report.warnings.is_empty());
}

#[test]
fn test_request_equal_to_candidate_count() {
    let df = common::create_pca_dataframe();

    let result = run_pca(&df, &common::pca_candidates(), 4).unwrap();

    assert_eq!(result.selected_features.len(), 4);
    assert!(result.report.warnings.is_empty());
}

#[test]
fn test_explained_variance_matches_reference() {
    let df = common::create_pca_dataframe();

    let result = run_pca(&df, &common::pca_candidates(), 3).unwrap();
    let components = &result.report.components;

    // Reference ratios for this fixture (min-max normalized, sample
    // covariance): 0.551777, 0.247676, 0.200451
    let expected = [0.551776670844, 0.247675647994, 0.200450741452];
    assert_eq!(components.len(), 3);
    for (component, expected) in components.iter().zip(expected.iter()) {
        assert!(
            (component.explained_variance - expected).abs() < 1e-6,
            "{} explained variance should be {:.6}, got {:.6}",
            component.component,
            expected,
            component.explained_variance
        );
    }

    // Components come out in decreasing variance order
    for pair in components.windows(2) {
        assert!(pair[0].explained_variance >= pair[1].explained_variance);
    }
}

#[test]
fn test_projected_scores_match_reference() {
    let df = common::create_pca_dataframe();

    let result = run_pca(&df, &common::pca_candidates(), 3).unwrap();
    let rows = feature_vector_rows(&result.data).unwrap();

    let expected_first = [-0.599424085717, -0.220362980951, -0.447310914274];
    let expected_last = [0.951403707089, 0.032055165437, -0.322174895712];
    for (got, expected) in rows[0].iter().zip(expected_first.iter()) {
        assert!(
            (got - expected).abs() < 1e-6,
            "first row score should be {:.6}, got {:.6}",
            expected,
            got
        );
    }
    for (got, expected) in rows[5].iter().zip(expected_last.iter()) {
        assert!((got - expected).abs() < 1e-6);
    }
}

#[test]
fn test_projection_is_deterministic() {
    let df = common::create_pca_dataframe();

    let first = run_pca(&df, &common::pca_candidates(), 3).unwrap();
    let second = run_pca(&df, &common::pca_candidates(), 3).unwrap();

    assert_eq!(
        feature_vector_rows(&first.data).unwrap(),
        feature_vector_rows(&second.data).unwrap()
    );
    assert_eq!(first.report.render(), second.report.render());
}

#[test]
fn test_target_column_passes_through() {
    let df = common::create_pca_dataframe();

    let result = run_pca(&df, &common::pca_candidates(), 2).unwrap();

    common::assert_has_columns(&result.data, &["label", "features"]);
    assert_eq!(result.data.height(), df.height());
}

#[test]
fn test_single_row_rejected() {
    let df = df! {
        "c1" => [1.0f64],
        "c2" => [2.0f64],
        "label" => [0.0f64],
    }
    .unwrap();

    let err = run_pca(&df, &["c1".to_string(), "c2".to_string()], 2).unwrap_err();
    assert!(matches!(err, PrepError::Transform(_)), "got {:?}", err);
}

#[test]
fn test_null_values_rejected() {
    let df = df! {
        "c1" => [Some(1.0f64), None, Some(3.0)],
        "c2" => [2.0f64, 4.0, 6.0],
        "label" => [0.0f64, 1.0, 0.0],
    }
    .unwrap();

    let err = run_pca(&df, &["c1".to_string(), "c2".to_string()], 2).unwrap_err();
    assert!(
        matches!(err, PrepError::Transform(_)),
        "nulls cannot be projected, got {:?}",
        err
    );
}

#[test]
fn test_missing_target_is_schema_error() {
    let df = df! {
        "c1" => [1.0f64, 2.0, 3.0],
        "c2" => [3.0f64, 1.0, 2.0],
    }
    .unwrap();

    let err = run_pca(&df, &["c1".to_string(), "c2".to_string()], 2).unwrap_err();
    assert!(matches!(err, PrepError::Schema(_)), "got {:?}", err);
}

#[test]
fn test_empty_candidates_is_configuration_error() {
    let df = common::create_pca_dataframe();

    let err = run_pca(&df, &[], 2).unwrap_err();
    assert!(matches!(err, PrepError::Configuration(_)), "got {:?}", err);
}

#[test]
fn test_report_structure() {
    let df = common::create_pca_dataframe();

    let result = run_pca(&df, &common::pca_candidates(), 10).unwrap();
    let report = &result.report;

    assert_eq!(report.method, FeatureSelectionMethod::Pca);
    assert_eq!(report.model_type, Some(ModelType::BinaryClassification));
    assert!(report.ranked.is_empty(), "PCA reports no correlation ranking");

    let text = report.render();
    assert!(text.contains("principal components (3):"));
    assert!(text.contains("warning: requested 10 components"));
    assert!(text.contains("selected features (3): PCA_Component_1, PCA_Component_2, PCA_Component_3"));
}
