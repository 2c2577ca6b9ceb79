//! Error taxonomy shared by the engine, evaluator, loaders and stores

use std::fmt;
use thiserror::Error;

/// Accuracy metric an insufficient-data error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Mean absolute error
    Mae,
    /// Mean absolute percentage error
    Mape,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Mae => write!(f, "MAE"),
            Metric::Mape => write!(f, "MAPE"),
        }
    }
}

#[derive(Error, Debug)]
pub enum HerdError {
    /// Malformed projection input, raised before any period is computed
    #[error("Invalid parameter {field} = {value}: {reason}")]
    InvalidParameter {
        field: String,
        value: String,
        reason: String,
    },

    /// No eligible observed rows for the metric
    #[error("Insufficient data to compute {metric}")]
    InsufficientData { metric: Metric },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Projection run not found: {0}")]
    RunNotFound(i64),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl HerdError {
    pub(crate) fn invalid_parameter(field: &str, value: impl fmt::Display, reason: &str) -> Self {
        HerdError::InvalidParameter {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// True for the insufficient-data kind, whichever metric it names
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, HerdError::InsufficientData { .. })
    }
}

pub type Result<T> = std::result::Result<T, HerdError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = HerdError::invalid_parameter("horizon", 0, "must be at least 1");
        assert_eq!(err.to_string(), "Invalid parameter horizon = 0: must be at least 1");

        let err = HerdError::InsufficientData { metric: Metric::Mape };
        assert_eq!(err.to_string(), "Insufficient data to compute MAPE");
        assert!(err.is_insufficient_data());
        assert!(!HerdError::RunNotFound(3).is_insufficient_data());
    }
}
