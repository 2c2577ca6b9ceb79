//! Core projection loop
//!
//! The engine is a pure function of its inputs: no hidden state, no
//! randomness, and nothing is computed until every parameter is validated.

use super::{CohortState, ProjectionParameters, ProjectionPoint};
use crate::error::{HerdError, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which cohort recurrence drives the projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CohortModel {
    /// B' = B + C*Y, Y' = m*B. Reduces to Fibonacci when C = m = 1.
    #[default]
    Fibonacci,
    /// C = female calves per breeder, m = annual mortality rate (0..=1)
    SurvivalAdjusted,
}

impl CohortModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CohortModel::Fibonacci => "fibonacci",
            CohortModel::SurvivalAdjusted => "survival_adjusted",
        }
    }
}

impl FromStr for CohortModel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "fibonacci" => Ok(CohortModel::Fibonacci),
            "survival_adjusted" | "survival" => Ok(CohortModel::SurvivalAdjusted),
            _ => Err(format!("Unknown cohort model: {}", s)),
        }
    }
}

/// Projection configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectionConfig {
    #[serde(default)]
    pub model: CohortModel,
    /// Round each produced year to whole animals
    #[serde(default)]
    pub round_to_whole_animals: bool,
}

/// Cohort projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project the herd over `params.horizon` years
    ///
    /// Returns `horizon + 1` points; the first is the initial state exactly as
    /// given (never rounded).
    pub fn project(&self, params: &ProjectionParameters) -> Result<Vec<ProjectionPoint>> {
        self.validate(params)?;

        let mut points = Vec::with_capacity(params.horizon as usize + 1);
        let mut state = CohortState::new(params.b0, params.y0);
        points.push(ProjectionPoint::new(0, state.breeding, state.young));

        for period in 1..=params.horizon {
            state = state.advance(self.config.model, params.c, params.m);
            if self.config.round_to_whole_animals {
                state = state.rounded();
            }
            // Large coefficients over a long horizon overflow f64
            if !state.total().is_finite() {
                return Err(HerdError::invalid_parameter(
                    "horizon",
                    params.horizon,
                    &format!("herd size overflows at year {}", period),
                ));
            }
            points.push(ProjectionPoint::new(period, state.breeding, state.young));
        }

        Ok(points)
    }

    /// Project several parameter sets in parallel
    ///
    /// Results keep the input order and fail independently.
    pub fn project_many(
        &self,
        params: &[ProjectionParameters],
    ) -> Vec<Result<Vec<ProjectionPoint>>> {
        params.par_iter().map(|p| self.project(p)).collect()
    }

    fn validate(&self, params: &ProjectionParameters) -> Result<()> {
        params.validate()?;

        // Survival factor (1 - m) must stay non-negative
        if self.config.model == CohortModel::SurvivalAdjusted && params.m > 1.0 {
            return Err(HerdError::invalid_parameter(
                "m",
                params.m,
                "mortality rate must not exceed 1 for the survival-adjusted model",
            ));
        }

        Ok(())
    }
}

/// Project with the default Fibonacci recurrence and no rounding
pub fn project(params: &ProjectionParameters) -> Result<Vec<ProjectionPoint>> {
    ProjectionEngine::default().project(params)
}
