//! Period-keyed alignment of projected and observed totals
//!
//! Rows are matched on the period key, never on position, so gaps in the
//! observed data cannot shift later years onto the wrong projection. Every
//! projected period gets a row; observations outside the projection have
//! nothing to be compared with and are left out.

use crate::observations::ObservationSeries;
use crate::projection::ProjectionPoint;
use serde::Serialize;
use std::collections::BTreeSet;

/// One period of a projected-vs-actual comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub period: u32,
    pub projected: f64,
    /// Observed total; `None` when no actual data exists for the period
    pub actual: Option<f64>,
}

impl ComparisonRow {
    /// Both values, when the period can be scored
    pub fn pair(&self) -> Option<(f64, f64)> {
        self.actual.map(|actual| (self.projected, actual))
    }
}

/// Align a projection with observations, one row per projected period
pub fn align(projected: &[ProjectionPoint], actual: &ObservationSeries) -> Vec<ComparisonRow> {
    projected
        .iter()
        .map(|p| ComparisonRow {
            period: p.period,
            projected: p.total,
            actual: actual.get(p.period),
        })
        .collect()
}

/// Observed periods with no projected counterpart, in period order
pub fn unprojected_periods(projected: &[ProjectionPoint], actual: &ObservationSeries) -> Vec<u32> {
    let covered: BTreeSet<u32> = projected.iter().map(|p| p.period).collect();
    actual.periods().filter(|period| !covered.contains(period)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{project, ProjectionParameters};

    fn fibonacci_points() -> Vec<ProjectionPoint> {
        project(&ProjectionParameters::new(1.0, 1.0, 1.0, 1.0, 5)).unwrap()
    }

    #[test]
    fn test_gaps_align_by_period() {
        let points = fibonacci_points();
        let actual: ObservationSeries =
            vec![(0u32, 2.5), (2, 4.0), (4, 14.0)].into_iter().collect();

        let rows = align(&points, &actual);

        assert_eq!(rows.len(), 6);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.period as usize, i);
            assert_eq!(row.projected, points[i].total);
        }
        assert_eq!(rows[0].actual, Some(2.5));
        assert_eq!(rows[2].actual, Some(4.0));
        assert_eq!(rows[4].actual, Some(14.0));
        for period in [1, 3, 5] {
            assert_eq!(rows[period].actual, None);
        }
        // Year 4 actual lines up with the year 4 projection (13), not year 2
        assert_eq!(rows[4].pair(), Some((13.0, 14.0)));
    }

    #[test]
    fn test_observations_beyond_horizon() {
        let points = fibonacci_points();
        let actual: ObservationSeries = vec![(5u32, 20.0), (8, 60.0)].into_iter().collect();

        let rows = align(&points, &actual);

        assert_eq!(rows.len(), 6);
        assert_eq!(rows.last().unwrap().period, 5);
        assert_eq!(rows[5].pair(), Some((21.0, 20.0)));
        assert!(rows.iter().all(|r| r.period != 8));
        assert_eq!(unprojected_periods(&points, &actual), vec![8]);
    }

    #[test]
    fn test_listed_year_without_value() {
        let points = fibonacci_points();
        let actual: ObservationSeries =
            vec![(1u32, None), (2, Some(5.0))].into_iter().collect();

        let rows = align(&points, &actual);
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[1].actual, None);
        assert_eq!(rows[2].actual, Some(5.0));
    }

    #[test]
    fn test_empty_observations() {
        let points = fibonacci_points();
        let rows = align(&points, &ObservationSeries::new());
        assert_eq!(rows.len(), 6);
        assert!(rows.iter().all(|r| r.actual.is_none()));
        assert!(unprojected_periods(&points, &ObservationSeries::new()).is_empty());
    }
}
