//! SQLite-backed run store
//!
//! Each run is one row; the projected series is kept as JSON text beside the
//! input columns so that listing runs never has to decode it.
//!
//! SQLite connections are not thread-safe. Open one store per thread.

use super::{check_points, ProjectionRun, RunId, RunStore, RunSummary};
use crate::error::{HerdError, Result};
use crate::projection::{CohortModel, ProjectionConfig, ProjectionParameters, ProjectionPoint};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a store at the given database path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        log::info!("Opening run store at {}", path.as_ref().display());
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Open a throwaway store that lives as long as the handle
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self { conn })
    }

    /// Close the connection, surfacing any error SQLite reports on shutdown
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| HerdError::Database(e))
    }

    fn summary_from_row(row: &Row<'_>) -> rusqlite::Result<RunSummary> {
        let created_at: String = row.get(1)?;
        let created_at = DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
            })?
            .with_timezone(&Utc);

        let model: String = row.get(7)?;
        let model = model.parse::<CohortModel>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                7,
                rusqlite::types::Type::Text,
                Box::new(HerdError::InvalidData(e)),
            )
        })?;

        Ok(RunSummary {
            id: row.get(0)?,
            created_at,
            params: ProjectionParameters {
                b0: row.get(2)?,
                y0: row.get(3)?,
                c: row.get(4)?,
                m: row.get(5)?,
                horizon: row.get(6)?,
            },
            config: ProjectionConfig {
                model,
                round_to_whole_animals: row.get(8)?,
            },
        })
    }
}

const SUMMARY_COLUMNS: &str =
    "run_id, created_at, b0, y0, c, m, horizon, model, round_to_whole_animals";

impl RunStore for SqliteStore {
    fn save(
        &mut self,
        params: &ProjectionParameters,
        config: &ProjectionConfig,
        points: &[ProjectionPoint],
    ) -> Result<RunId> {
        check_points(params, points)?;

        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        let points_json = serde_json::to_string(points)?;

        self.conn.execute(
            "INSERT INTO projection_runs
             (created_at, b0, y0, c, m, horizon, model, round_to_whole_animals, points_json)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                created_at,
                params.b0,
                params.y0,
                params.c,
                params.m,
                params.horizon,
                config.model.as_str(),
                config.round_to_whole_animals,
                points_json,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        log::debug!("Saved run {} ({} points)", id, points.len());
        Ok(id)
    }

    fn get(&self, id: RunId) -> Result<Option<ProjectionRun>> {
        let sql = format!(
            "SELECT {}, points_json FROM projection_runs WHERE run_id = ?1",
            SUMMARY_COLUMNS
        );
        let found = self
            .conn
            .query_row(&sql, params![id], |row| {
                let summary = Self::summary_from_row(row)?;
                let points_json: String = row.get(9)?;
                Ok((summary, points_json))
            })
            .optional()?;

        let Some((summary, points_json)) = found else {
            return Ok(None);
        };

        let points: Vec<ProjectionPoint> = serde_json::from_str(&points_json)?;
        check_points(&summary.params, &points)?;

        Ok(Some(ProjectionRun {
            id: summary.id,
            created_at: summary.created_at,
            params: summary.params,
            config: summary.config,
            points,
        }))
    }

    fn list(&self) -> Result<Vec<RunSummary>> {
        let sql = format!(
            "SELECT {} FROM projection_runs ORDER BY created_at DESC, run_id DESC",
            SUMMARY_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let summaries = stmt
            .query_map([], Self::summary_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(summaries)
    }
}
