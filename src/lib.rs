//! Prepline: Tabular Data Preparation Library
//!
//! A library for preparing tabular datasets for model training using
//! correlation-based feature selection, PCA, and pluggable class balancing.

pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod utils;
