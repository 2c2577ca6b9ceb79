//! MAE and MAPE over aligned rows
//!
//! Only rows carrying an observed total are scored.
//! Each metric has its own sufficiency condition and fails on its own.

use super::ComparisonRow;
use crate::error::{HerdError, Metric, Result};
use serde::Serialize;

/// Accuracy of a projection against observations
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AccuracyResult {
    /// Mean absolute error in head
    pub mae: f64,
    /// Mean absolute percentage error (0-100 scale)
    pub mape: f64,
}

/// Mean of |actual - projected| over rows with an observed total
pub fn mean_absolute_error(rows: &[ComparisonRow]) -> Result<f64> {
    mean(
        rows.iter()
            .filter_map(ComparisonRow::pair)
            .map(|(projected, actual)| (actual - projected).abs()),
    )
    .ok_or(HerdError::InsufficientData { metric: Metric::Mae })
}

/// Mean of |actual - projected| / |actual| * 100 over rows with a non-zero
/// observed total
pub fn mean_absolute_percentage_error(rows: &[ComparisonRow]) -> Result<f64> {
    mean(
        rows.iter()
            .filter_map(ComparisonRow::pair)
            .filter(|&(_, actual)| actual != 0.0)
            .map(|(projected, actual)| (actual - projected).abs() / actual.abs()),
    )
    .map(|fraction| fraction * 100.0)
    .ok_or(HerdError::InsufficientData { metric: Metric::Mape })
}

/// Both metrics; fails if either one is undefined
pub fn evaluate(rows: &[ComparisonRow]) -> Result<AccuracyResult> {
    Ok(AccuracyResult {
        mae: mean_absolute_error(rows)?,
        mape: mean_absolute_percentage_error(rows)?,
    })
}

fn mean<I: Iterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
