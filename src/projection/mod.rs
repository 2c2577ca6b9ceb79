//! Projection engine for two-cohort herd forecasts

mod params;
mod state;
mod engine;
mod points;

pub use params::ProjectionParameters;
pub use state::CohortState;
pub use engine::{project, CohortModel, ProjectionConfig, ProjectionEngine};
pub use points::{write_points_csv, ProjectionPoint};

// ============================================================================
// Default Herd Inputs
// ============================================================================
// Starting values offered to a user who has not entered their own herd.
// - Cohort sizes are head counts of females only
// - Coefficients are annual rates

/// Default initial breeding females (adults over two years)
pub const DEFAULT_BREEDING_START: f64 = 20.0;

/// Default initial young females (under two years)
pub const DEFAULT_YOUNG_START: f64 = 10.0;

/// Default transition coefficient C (0.5)
pub const DEFAULT_C: f64 = 0.5;

/// Default birth/mortality coefficient m (0.05)
pub const DEFAULT_M: f64 = 0.05;

/// Default projection horizon in years
pub const DEFAULT_HORIZON: u32 = 10;
