//! Structured selection reports.
//!
//! The report is plain data produced by the selectors; rendering to text is
//! a separate, deterministic step so tests can assert on either form.
//! Rendered output carries no timestamps and uses fixed four-decimal float
//! formatting.

use std::fmt;
use std::fmt::Write as _;

use serde::Serialize;

use crate::config::{FeatureSelectionMethod, ModelType};

/// One candidate's position in the correlation ranking.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCorrelation {
    /// Candidate column name.
    pub feature: String,
    /// Absolute Pearson correlation against the target.
    pub correlation: f64,
    /// Whether the coefficient degraded to zero instead of being computed.
    pub degraded: bool,
}

/// Share of total variance captured by one principal component.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentVariance {
    pub component: String,
    pub explained_variance: f64,
}

/// Structured account of one feature-selection stage.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionReport {
    /// Strategy that produced this report.
    pub method: FeatureSelectionMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_type: Option<ModelType>,
    /// Candidates ranked by descending absolute target correlation.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ranked: Vec<RankedCorrelation>,
    /// Multicollinearity threshold applied by the correlation selector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multicollinearity_threshold: Option<f64>,
    /// Explained-variance shares for PCA components.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ComponentVariance>,
    /// Final selected feature names, in selection order.
    pub selected: Vec<String>,
    /// Degradations and clamps observed during selection.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl SelectionReport {
    /// Report for a run whose selection stage was skipped.
    pub fn empty() -> Self {
        SelectionReport {
            method: FeatureSelectionMethod::None,
            model_type: None,
            ranked: Vec::new(),
            multicollinearity_threshold: None,
            components: Vec::new(),
            selected: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Report for a correlation-based selection.
    pub fn correlation(
        model_type: ModelType,
        threshold: f64,
        ranked: Vec<RankedCorrelation>,
        selected: Vec<String>,
    ) -> Self {
        SelectionReport {
            method: FeatureSelectionMethod::Correlation,
            model_type: Some(model_type),
            ranked,
            multicollinearity_threshold: Some(threshold),
            components: Vec::new(),
            selected,
            warnings: Vec::new(),
        }
    }

    /// Report for a PCA-based selection.
    pub fn pca(
        model_type: ModelType,
        components: Vec<ComponentVariance>,
        selected: Vec<String>,
        warnings: Vec<String>,
    ) -> Self {
        SelectionReport {
            method: FeatureSelectionMethod::Pca,
            model_type: Some(model_type),
            ranked: Vec::new(),
            multicollinearity_threshold: None,
            components,
            selected,
            warnings,
        }
    }

    /// Render the report as deterministic, human-readable text.
    ///
    /// A skipped stage renders to the empty string. Field order and float
    /// formatting are fixed, so the same report value always produces the
    /// same text.
    pub fn render(&self) -> String {
        if self.method == FeatureSelectionMethod::None {
            return String::new();
        }

        let mut out = String::new();
        let _ = writeln!(out, "feature selection method: {}", self.method);
        if let Some(model_type) = self.model_type {
            let _ = writeln!(out, "model type: {}", model_type);
        }
        if let Some(threshold) = self.multicollinearity_threshold {
            let _ = writeln!(out, "multicollinearity threshold: {:.4}", threshold);
        }

        if !self.ranked.is_empty() {
            let _ = writeln!(out, "ranked candidates by |target correlation|:");
            for (position, entry) in self.ranked.iter().enumerate() {
                let marker = if entry.degraded {
                    " (degraded to zero)"
                } else {
                    ""
                };
                let _ = writeln!(
                    out,
                    "  {:>2}. {}  {:.4}{}",
                    position + 1,
                    entry.feature,
                    entry.correlation,
                    marker
                );
            }
        }

        if !self.components.is_empty() {
            let _ = writeln!(out, "principal components ({}):", self.components.len());
            for component in &self.components {
                let _ = writeln!(
                    out,
                    "  {}  explained variance {:.4}",
                    component.component, component.explained_variance
                );
            }
        }

        for warning in &self.warnings {
            let _ = writeln!(out, "warning: {}", warning);
        }

        let _ = writeln!(
            out,
            "selected features ({}): {}",
            self.selected.len(),
            self.selected.join(", ")
        );

        out
    }
}

impl fmt::Display for SelectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
