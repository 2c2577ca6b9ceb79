//! Evaluator wired to an injectable observation source

use super::{
    align, mean_absolute_error, mean_absolute_percentage_error, unprojected_periods,
    AccuracyResult, ComparisonRow,
};
use crate::error::Result;
use crate::observations::ObservationSource;
use crate::projection::ProjectionPoint;

/// Aligned rows plus both metrics, each computed independently
#[derive(Debug)]
pub struct ComparisonReport {
    pub rows: Vec<ComparisonRow>,
    pub mae: Result<f64>,
    pub mape: Result<f64>,
    /// Observed periods outside the projection, not scored
    pub unprojected: Vec<u32>,
}

impl ComparisonReport {
    pub fn from_rows(rows: Vec<ComparisonRow>) -> Self {
        let mae = mean_absolute_error(&rows);
        let mape = mean_absolute_percentage_error(&rows);
        Self { rows, mae, mape, unprojected: Vec::new() }
    }

    /// Rows that contributed to MAE
    pub fn scored_rows(&self) -> usize {
        self.rows.iter().filter(|r| r.pair().is_some()).count()
    }

    /// Rows that contributed to MAPE
    pub fn percentage_rows(&self) -> usize {
        self.rows
            .iter()
            .filter_map(ComparisonRow::pair)
            .filter(|&(_, actual)| actual != 0.0)
            .count()
    }

    /// Both metrics when both are defined
    pub fn accuracy(&self) -> Option<AccuracyResult> {
        match (&self.mae, &self.mape) {
            (Ok(mae), Ok(mape)) => Some(AccuracyResult { mae: *mae, mape: *mape }),
            _ => None,
        }
    }
}

/// Scores projections against whatever source supplies the actual counts
pub struct AccuracyEvaluator<S: ObservationSource> {
    source: S,
}

impl<S: ObservationSource> AccuracyEvaluator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Compare a projection with the source's observations
    ///
    /// Fails only if the source cannot produce observations; metric
    /// insufficiency is reported inside the returned report.
    pub fn compare(&self, projected: &[ProjectionPoint]) -> Result<ComparisonReport> {
        let actual = self.source.observations()?;
        Ok(ComparisonReport {
            unprojected: unprojected_periods(projected, &actual),
            ..ComparisonReport::from_rows(align(projected, &actual))
        })
    }
}
