//! Core processing pipeline - feature selection and stage orchestration

pub mod balance;
pub mod correlation;
pub mod frame;
pub mod loader;
pub mod pca;
pub mod process;
pub mod selection;

pub use balance::Balancer;
pub use correlation::{analyze_correlations, CorrelationAnalysis, CorrelationValue};
pub use frame::{
    feature_vector_rows, flatten_feature_vector, has_feature_vector, numeric_values,
    replace_feature_vector, with_feature_vector, FEATURE_VECTOR_COLUMN,
};
pub use loader::{load_dataset, save_dataset};
pub use pca::PcaSelector;
pub use process::{process_data, ProcessedData};
pub use selection::{selector_for, CorrelationSelector, FeatureSelector, SelectionResult};
