//! Accuracy evaluation of saved projections against observed herd counts

mod align;
mod metrics;
mod evaluator;

pub use align::{align, unprojected_periods, ComparisonRow};
pub use metrics::{evaluate, mean_absolute_error, mean_absolute_percentage_error, AccuracyResult};
pub use evaluator::{AccuracyEvaluator, ComparisonReport};
