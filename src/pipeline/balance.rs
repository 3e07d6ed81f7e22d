//! Class-balancing capability consumed by the orchestrator.

use polars::prelude::DataFrame;

use crate::config::{DataBalancingConfig, ProcessingContext};
use crate::error::Result;

/// Contract a class-balancing implementation satisfies.
///
/// Given a dataset, the current feature list, its configuration, and the
/// target column name, a balancer returns a dataset with an adjusted class
/// distribution. The row count is free to grow or shrink, but the column
/// schema must survive (the orchestrator rejects output that lost the
/// target column). Implementations that sample should draw from
/// `ctx.seed` so runs stay reproducible. This crate ships no
/// implementation; callers inject one.
pub trait Balancer {
    fn balance(
        &self,
        df: &DataFrame,
        feature_names: &[String],
        config: &DataBalancingConfig,
        target: &str,
        ctx: &ProcessingContext,
    ) -> Result<DataFrame>;
}
