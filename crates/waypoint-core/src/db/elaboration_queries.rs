//! Elaboration session storage, one row per seed.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::{parse_json, parse_text};
use crate::{
    error::{DatabaseResultExt, Result},
    models::ElaborationSession,
};

const UPSERT_ELABORATION_SQL: &str = "INSERT INTO elaborations (seed_id, session_id, state, transcript, completeness, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
    ON CONFLICT(seed_id) DO UPDATE SET session_id = excluded.session_id, state = excluded.state, transcript = excluded.transcript, completeness = excluded.completeness, updated_at = excluded.updated_at";
const SELECT_ELABORATION_SQL: &str = "SELECT seed_id, state, transcript, created_at, updated_at FROM elaborations WHERE seed_id = ?1";

impl super::Database {
    /// Creates or replaces the stored session for its seed.
    pub fn save_elaboration(&self, session: &ElaborationSession) -> Result<()> {
        let state = serde_json::to_string(&session.state)?;
        let transcript = serde_json::to_string(&session.transcript)?;

        self.connection
            .execute(
                UPSERT_ELABORATION_SQL,
                params![
                    session.seed_id as i64,
                    session.session_id(),
                    state,
                    transcript,
                    session.state.completeness,
                    session.created_at.to_string(),
                    session.updated_at.to_string()
                ],
            )
            .db_context("Failed to save elaboration session")?;
        Ok(())
    }

    /// Loads the session stored for a seed, if any.
    pub fn get_elaboration(&self, seed_id: u64) -> Result<Option<ElaborationSession>> {
        self.connection
            .query_row(SELECT_ELABORATION_SQL, params![seed_id as i64], |row| {
                Ok(ElaborationSession {
                    seed_id: row.get::<_, i64>(0)? as u64,
                    state: parse_json(row, 1)?,
                    transcript: parse_json(row, 2)?,
                    created_at: parse_text::<Timestamp>(row, 3)?,
                    updated_at: parse_text::<Timestamp>(row, 4)?,
                })
            })
            .optional()
            .db_context("Failed to query elaboration session")
    }
}
