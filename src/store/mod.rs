//! Storage of completed projection runs
//!
//! A store is an explicit handle: the application opens one at start-up,
//! passes it to whatever needs it, and drops or closes it at shutdown.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::{HerdError, Result};
use crate::projection::{ProjectionConfig, ProjectionParameters, ProjectionPoint};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type RunId = i64;

/// A persisted forecast: its inputs and every projected year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRun {
    pub id: RunId,
    pub created_at: DateTime<Utc>,
    pub params: ProjectionParameters,
    pub config: ProjectionConfig,
    pub points: Vec<ProjectionPoint>,
}

/// Run metadata without the projected series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub id: RunId,
    pub created_at: DateTime<Utc>,
    pub params: ProjectionParameters,
    pub config: ProjectionConfig,
}

impl From<&ProjectionRun> for RunSummary {
    fn from(run: &ProjectionRun) -> Self {
        Self {
            id: run.id,
            created_at: run.created_at,
            params: run.params,
            config: run.config,
        }
    }
}

pub trait RunStore {
    /// Persist a completed projection and return its identifier
    fn save(
        &mut self,
        params: &ProjectionParameters,
        config: &ProjectionConfig,
        points: &[ProjectionPoint],
    ) -> Result<RunId>;

    /// Fetch a run by identifier
    fn get(&self, id: RunId) -> Result<Option<ProjectionRun>>;

    /// All runs, newest first
    fn list(&self) -> Result<Vec<RunSummary>>;

    /// Fetch a run that must exist
    fn load(&self, id: RunId) -> Result<ProjectionRun> {
        self.get(id)?.ok_or(HerdError::RunNotFound(id))
    }
}

/// A run's series must cover period 0 through the horizon, in order, with
/// finite counts (JSON has no representation for infinity or NaN)
pub(crate) fn check_points(params: &ProjectionParameters, points: &[ProjectionPoint]) -> Result<()> {
    let expected = params.horizon as usize + 1;
    if points.len() != expected {
        return Err(HerdError::InvalidData(format!(
            "run has {} points, expected {} for horizon {}",
            points.len(),
            expected,
            params.horizon
        )));
    }
    if let Some((i, p)) = points.iter().enumerate().find(|(i, p)| p.period as usize != *i) {
        return Err(HerdError::InvalidData(format!(
            "point {} has period {}",
            i, p.period
        )));
    }
    if let Some(p) = points
        .iter()
        .find(|p| !(p.breeding.is_finite() && p.young.is_finite() && p.total.is_finite()))
    {
        return Err(HerdError::InvalidData(format!(
            "year {} has a non-finite herd size",
            p.period
        )));
    }
    Ok(())
}
