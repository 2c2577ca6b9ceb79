//! Observed herd counts and the sources that supply them

pub mod loader;

pub use loader::{load_observations, load_observations_from_reader, CsvObservations};

use crate::error::Result;
use std::collections::BTreeMap;

/// Observed total herd size keyed by period
///
/// A missing key and a key mapped to `None` both mean "no actual data for that
/// year", which is distinct from an observed total of zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationSeries {
    values: BTreeMap<u32, Option<f64>>,
}

impl ObservationSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an observed total for a period, replacing any earlier value
    pub fn insert(&mut self, period: u32, total: f64) {
        self.values.insert(period, Some(total));
    }

    /// Record that a period was listed without a value
    pub fn insert_missing(&mut self, period: u32) {
        self.values.insert(period, None);
    }

    /// Observed total for a period, `None` when absent
    pub fn get(&self, period: u32) -> Option<f64> {
        self.values.get(&period).copied().flatten()
    }

    pub fn contains_period(&self, period: u32) -> bool {
        self.values.contains_key(&period)
    }

    /// All listed periods in ascending order, including those without a value
    pub fn periods(&self) -> impl Iterator<Item = u32> + '_ {
        self.values.keys().copied()
    }

    /// Number of periods with an observed value
    pub fn observed_count(&self) -> usize {
        self.values.values().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(u32, f64)> for ObservationSeries {
    fn from_iter<I: IntoIterator<Item = (u32, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(p, v)| (p, Some(v))).collect(),
        }
    }
}

impl FromIterator<(u32, Option<f64>)> for ObservationSeries {
    fn from_iter<I: IntoIterator<Item = (u32, Option<f64>)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Supplier of actual herd counts for comparison against a projection
///
/// Sample data and real observation feeds plug in here without the
/// evaluator knowing which one it is reading.
pub trait ObservationSource {
    fn observations(&self) -> Result<ObservationSeries>;
}

/// Fixed in-memory observations
#[derive(Debug, Clone, Default)]
pub struct StaticObservations {
    series: ObservationSeries,
}

impl StaticObservations {
    pub fn new(series: ObservationSeries) -> Self {
        Self { series }
    }
}

impl ObservationSource for StaticObservations {
    fn observations(&self) -> Result<ObservationSeries> {
        Ok(self.series.clone())
    }
}

impl ObservationSource for ObservationSeries {
    fn observations(&self) -> Result<ObservationSeries> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_vs_zero() {
        let mut series = ObservationSeries::new();
        series.insert(0, 0.0);
        series.insert_missing(1);

        assert_eq!(series.get(0), Some(0.0));
        assert_eq!(series.get(1), None);
        assert_eq!(series.get(2), None);
        assert!(series.contains_period(1));
        assert!(!series.contains_period(2));
        assert_eq!(series.observed_count(), 1);
    }

    #[test]
    fn test_periods_sorted() {
        let series: ObservationSeries = vec![(4u32, 40.0), (0, 10.0), (2, 20.0)].into_iter().collect();
        assert_eq!(series.periods().collect::<Vec<_>>(), vec![0, 2, 4]);
    }

    #[test]
    fn test_static_source() {
        let series: ObservationSeries = vec![(1u32, 5.0)].into_iter().collect();
        let source = StaticObservations::new(series.clone());
        assert_eq!(source.observations().unwrap(), series);
    }
}
