//! Herd Projection - two-cohort Fibonacci forecasting for a female cattle herd
//!
//! This library provides:
//! - Deterministic breeding/young cohort projections over a horizon of years
//! - Period-keyed alignment of projections with sparse observed herd counts
//! - MAE and MAPE accuracy metrics with explicit insufficient-data signalling
//! - Pluggable observation sources and projection run storage

pub mod error;
pub mod projection;
pub mod evaluation;
pub mod observations;
pub mod store;

// Re-export commonly used types
pub use error::{HerdError, Metric, Result};
pub use projection::{
    CohortModel, ProjectionConfig, ProjectionEngine, ProjectionParameters, ProjectionPoint,
};
pub use evaluation::{AccuracyEvaluator, AccuracyResult, ComparisonReport, ComparisonRow};
pub use observations::{ObservationSeries, ObservationSource};
pub use store::{MemoryStore, ProjectionRun, RunId, RunStore, RunSummary, SqliteStore};
