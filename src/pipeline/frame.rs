//! Column coercion and feature-vector assembly.
//!
//! Selection strategies operate on plain `f64` sequences extracted straight
//! from scalar columns; the assembled per-row feature vector lives in a
//! single `List(Float64)` column that downstream stages (balancers, model
//! trainers) consume.

use polars::prelude::*;

use crate::error::{PrepError, Result};

/// Name of the list column holding each row's assembled feature vector.
pub const FEATURE_VECTOR_COLUMN: &str = "features";

/// Extract a column as `f64` values, coercing numeric widths and booleans.
///
/// Booleans map to `1.0`/`0.0`; null entries become `NaN` so callers can
/// apply their own degradation policy. A missing column is a `Schema`
/// error; any dtype outside numeric/boolean is an `UnsupportedColumnType`
/// error.
pub fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let column = df
        .column(name)
        .map_err(|_| PrepError::schema(format!("column '{}' not found in dataset", name)))?;

    let dtype = column.dtype();
    if !dtype.is_primitive_numeric() && *dtype != DataType::Boolean {
        return Err(PrepError::unsupported_column(name, dtype));
    }

    let casted = column.cast(&DataType::Float64)?;
    let values = casted
        .f64()?
        .iter()
        .map(|value| value.unwrap_or(f64::NAN))
        .collect();

    Ok(values)
}

/// Whether the dataset already carries a feature-vector column.
pub fn has_feature_vector(df: &DataFrame) -> bool {
    df.column(FEATURE_VECTOR_COLUMN).is_ok()
}

/// Replace (or add) the feature-vector column from per-row value sequences.
///
/// `rows` must hold exactly one sequence per dataset row; every other
/// column passes through unchanged.
pub fn replace_feature_vector(df: &DataFrame, rows: &[Vec<f64>]) -> Result<DataFrame> {
    if rows.len() != df.height() {
        return Err(PrepError::transform(format!(
            "feature vector has {} rows but dataset has {}",
            rows.len(),
            df.height()
        )));
    }

    let values_capacity = rows.first().map_or(0, |row| row.len()) * rows.len();
    let mut builder = ListPrimitiveChunkedBuilder::<Float64Type>::new(
        FEATURE_VECTOR_COLUMN.into(),
        rows.len(),
        values_capacity,
        DataType::Float64,
    );
    for row in rows {
        builder.append_slice(row);
    }

    let mut out = df.clone();
    out.with_column(builder.finish().into_series())?;
    Ok(out)
}

/// Assemble the feature-vector column by concatenating scalar columns.
///
/// Vector dimensions follow the order of `columns`. Row count and row
/// order are unchanged.
pub fn with_feature_vector(df: &DataFrame, columns: &[String]) -> Result<DataFrame> {
    let extracted: Vec<Vec<f64>> = columns
        .iter()
        .map(|name| numeric_values(df, name))
        .collect::<Result<_>>()?;

    let rows: Vec<Vec<f64>> = (0..df.height())
        .map(|row| extracted.iter().map(|column| column[row]).collect())
        .collect();

    replace_feature_vector(df, &rows)
}

/// Read the feature-vector column back as per-row value sequences.
pub fn feature_vector_rows(df: &DataFrame) -> Result<Vec<Vec<f64>>> {
    let column = df.column(FEATURE_VECTOR_COLUMN).map_err(|_| {
        PrepError::schema(format!(
            "column '{}' not found in dataset",
            FEATURE_VECTOR_COLUMN
        ))
    })?;

    let list = column.list()?;
    let mut rows = Vec::with_capacity(list.len());
    for idx in 0..list.len() {
        let entry = list
            .get_as_series(idx)
            .ok_or_else(|| PrepError::transform(format!("feature vector row {} is null", idx)))?;
        let values = entry
            .f64()?
            .iter()
            .map(|value| value.unwrap_or(f64::NAN))
            .collect();
        rows.push(values);
    }
    Ok(rows)
}

/// Expand the feature-vector column into scalar columns for export.
///
/// Produces a frame with one `Float64` column per entry of `names`, in
/// vector order, followed by the target column unchanged.
pub fn flatten_feature_vector(
    df: &DataFrame,
    names: &[String],
    target: &str,
) -> Result<DataFrame> {
    let rows = feature_vector_rows(df)?;
    for (idx, row) in rows.iter().enumerate() {
        if row.len() != names.len() {
            return Err(PrepError::transform(format!(
                "feature vector row {} has {} values but {} names were provided",
                idx,
                row.len(),
                names.len()
            )));
        }
    }

    let mut columns: Vec<Column> = names
        .iter()
        .enumerate()
        .map(|(dim, name)| {
            let values: Vec<f64> = rows.iter().map(|row| row[dim]).collect();
            Column::new(name.as_str().into(), values)
        })
        .collect();

    let target_column = df
        .column(target)
        .map_err(|_| PrepError::schema(format!("column '{}' not found in dataset", target)))?;
    columns.push(target_column.clone());

    Ok(DataFrame::new(columns)?)
}
