//! In-memory run store, used by tests and one-shot CLI sessions

use super::{check_points, ProjectionRun, RunId, RunStore, RunSummary};
use crate::error::Result;
use crate::projection::{ProjectionConfig, ProjectionParameters, ProjectionPoint};
use chrono::Utc;

#[derive(Debug, Default)]
pub struct MemoryStore {
    runs: Vec<ProjectionRun>,
    next_id: RunId,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self { runs: Vec::new(), next_id: 1 }
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

impl RunStore for MemoryStore {
    fn save(
        &mut self,
        params: &ProjectionParameters,
        config: &ProjectionConfig,
        points: &[ProjectionPoint],
    ) -> Result<RunId> {
        check_points(params, points)?;

        // Default-constructed stores start at 0
        let id = self.next_id.max(1);
        self.next_id = id + 1;

        self.runs.push(ProjectionRun {
            id,
            created_at: Utc::now(),
            params: *params,
            config: *config,
            points: points.to_vec(),
        });
        log::debug!("Saved run {} ({} points) in memory", id, points.len());
        Ok(id)
    }

    fn get(&self, id: RunId) -> Result<Option<ProjectionRun>> {
        Ok(self.runs.iter().find(|r| r.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<RunSummary>> {
        let mut summaries: Vec<RunSummary> = self.runs.iter().map(RunSummary::from).collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HerdError;
    use crate::projection::project;

    #[test]
    fn test_save_get_list() {
        let mut store = MemoryStore::new();
        let config = ProjectionConfig::default();

        let first = ProjectionParameters::new(1.0, 1.0, 1.0, 1.0, 5);
        let second = ProjectionParameters::new(20.0, 10.0, 0.5, 0.05, 3);
        let id1 = store.save(&first, &config, &project(&first).unwrap()).unwrap();
        let id2 = store.save(&second, &config, &project(&second).unwrap()).unwrap();
        assert_ne!(id1, id2);
        assert_eq!(store.len(), 2);

        let run = store.load(id1).unwrap();
        assert_eq!(run.params, first);
        assert_eq!(run.points, project(&first).unwrap());

        let ids: Vec<RunId> = store.list().unwrap().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![id2, id1]);
    }

    #[test]
    fn test_missing_run() {
        let store = MemoryStore::default();
        assert!(store.get(42).unwrap().is_none());
        assert!(matches!(store.load(42), Err(HerdError::RunNotFound(42))));
    }

    #[test]
    fn test_default_store_ids_start_at_one() {
        let mut store = MemoryStore::default();
        let params = ProjectionParameters::new(1.0, 1.0, 1.0, 1.0, 1);
        let id = store.save(&params, &ProjectionConfig::default(), &project(&params).unwrap()).unwrap();
        assert_eq!(id, 1);
    }

    #[test]
    fn test_rejects_mismatched_points() {
        let mut store = MemoryStore::new();
        let params = ProjectionParameters::new(1.0, 1.0, 1.0, 1.0, 5);
        let points = project(&ProjectionParameters { horizon: 2, ..params }).unwrap();
        assert!(store.save(&params, &ProjectionConfig::default(), &points).is_err());
        assert!(store.is_empty());
    }
}
