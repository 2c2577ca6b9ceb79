//! Projection inputs
//!
//! Parameters can be built in code, parsed from CLI flags or read from a JSON
//! file where any omitted field falls back to the dashboard defaults.

use super::{DEFAULT_BREEDING_START, DEFAULT_C, DEFAULT_HORIZON, DEFAULT_M, DEFAULT_YOUNG_START};
use crate::error::{HerdError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Initial cohort sizes and biological coefficients for one forecast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParameters {
    /// Initial breeding cohort (B0)
    #[serde(default = "default_b0", alias = "B0")]
    pub b0: f64,

    /// Initial young cohort (Y0)
    #[serde(default = "default_y0", alias = "Y0")]
    pub y0: f64,

    /// Maturation/transition coefficient
    #[serde(default = "default_c", alias = "C")]
    pub c: f64,

    /// Fecundity/birth coefficient
    #[serde(default = "default_m")]
    pub m: f64,

    /// Number of future years to project beyond the initial state
    #[serde(default = "default_horizon", alias = "years")]
    pub horizon: u32,
}

fn default_b0() -> f64 { DEFAULT_BREEDING_START }
fn default_y0() -> f64 { DEFAULT_YOUNG_START }
fn default_c() -> f64 { DEFAULT_C }
fn default_m() -> f64 { DEFAULT_M }
fn default_horizon() -> u32 { DEFAULT_HORIZON }

impl Default for ProjectionParameters {
    fn default() -> Self {
        Self {
            b0: DEFAULT_BREEDING_START,
            y0: DEFAULT_YOUNG_START,
            c: DEFAULT_C,
            m: DEFAULT_M,
            horizon: DEFAULT_HORIZON,
        }
    }
}

impl ProjectionParameters {
    pub fn new(b0: f64, y0: f64, c: f64, m: f64, horizon: u32) -> Self {
        Self { b0, y0, c, m, horizon }
    }

    /// Build from whole head counts; counts are promoted to f64
    pub fn from_counts(b0: u32, y0: u32, c: f64, m: f64, horizon: u32) -> Self {
        Self::new(f64::from(b0), f64::from(y0), c, m, horizon)
    }

    /// Load parameters from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Check every input independently of the recurrence in use
    ///
    /// Cohort sizes and coefficients must be finite and non-negative, and the
    /// horizon must cover at least one future year.
    pub fn validate(&self) -> Result<()> {
        check_non_negative("B0", self.b0)?;
        check_non_negative("Y0", self.y0)?;
        check_non_negative("C", self.c)?;
        check_non_negative("m", self.m)?;

        if self.horizon == 0 {
            return Err(HerdError::invalid_parameter(
                "horizon",
                self.horizon,
                "must be at least 1",
            ));
        }

        Ok(())
    }
}

fn check_non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(HerdError::invalid_parameter(field, value, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(HerdError::invalid_parameter(field, value, "must not be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let params: ProjectionParameters = serde_json::from_str("{}").unwrap();
        assert_eq!(params, ProjectionParameters::default());
        assert_eq!(params.horizon, 10);
        assert_eq!(params.b0, 20.0);
    }

    #[test]
    fn test_partial_json_with_aliases() {
        let params: ProjectionParameters =
            serde_json::from_str(r#"{"B0": 40, "Y0": 12, "years": 5}"#).unwrap();
        assert_eq!(params.b0, 40.0);
        assert_eq!(params.y0, 12.0);
        assert_eq!(params.horizon, 5);
        assert_eq!(params.c, DEFAULT_C);
    }

    #[test]
    fn test_each_field_rejected_independently() {
        let base = ProjectionParameters::new(1.0, 1.0, 1.0, 1.0, 5);
        assert!(base.validate().is_ok());

        let cases = [
            ProjectionParameters { b0: -1.0, ..base },
            ProjectionParameters { y0: -0.5, ..base },
            ProjectionParameters { c: -0.1, ..base },
            ProjectionParameters { m: -2.0, ..base },
            ProjectionParameters { horizon: 0, ..base },
            ProjectionParameters { c: f64::NAN, ..base },
            ProjectionParameters { b0: f64::INFINITY, ..base },
        ];
        for params in cases {
            let err = params.validate().unwrap_err();
            assert!(matches!(err, HerdError::InvalidParameter { .. }), "{:?}", params);
        }
    }

    #[test]
    fn test_zero_inputs_are_valid() {
        let params = ProjectionParameters::new(0.0, 0.0, 0.0, 0.0, 1);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_from_counts() {
        let params = ProjectionParameters::from_counts(20, 10, 0.5, 0.05, 3);
        assert_eq!(params.b0, 20.0);
        assert_eq!(params.y0, 10.0);
    }
}
