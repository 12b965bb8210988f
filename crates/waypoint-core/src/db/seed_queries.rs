//! Seed CRUD operations.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::parse_text;
use crate::{
    error::{DatabaseResultExt, Result},
    models::Seed,
};

const INSERT_SEED_SQL: &str = "INSERT INTO seeds (title, description, estimated_participants, estimated_duration_days, created_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_SEED_SQL: &str = "SELECT id, title, description, estimated_participants, estimated_duration_days, created_at FROM seeds WHERE id = ?1";
const SELECT_SEEDS_SQL: &str = "SELECT id, title, description, estimated_participants, estimated_duration_days, created_at FROM seeds ORDER BY created_at DESC, id DESC";

impl super::Database {
    fn build_seed_from_row(row: &rusqlite::Row) -> rusqlite::Result<Seed> {
        Ok(Seed {
            id: row.get::<_, i64>(0)? as u64,
            title: row.get(1)?,
            description: row.get(2)?,
            estimated_participants: row.get(3)?,
            estimated_duration_days: row.get(4)?,
            created_at: parse_text::<Timestamp>(row, 5)?,
        })
    }

    /// Stores a new seed and returns it with its assigned id.
    pub fn create_seed(
        &self,
        title: &str,
        description: Option<&str>,
        estimated_participants: Option<u32>,
        estimated_duration_days: Option<u32>,
    ) -> Result<Seed> {
        let now = Timestamp::now();
        self.connection
            .execute(
                INSERT_SEED_SQL,
                params![
                    title,
                    description,
                    estimated_participants,
                    estimated_duration_days,
                    now.to_string()
                ],
            )
            .db_context("Failed to insert seed")?;

        Ok(Seed {
            id: self.connection.last_insert_rowid() as u64,
            title: title.to_string(),
            description: description.map(String::from),
            estimated_participants,
            estimated_duration_days,
            created_at: now,
        })
    }

    /// Retrieves a seed by its ID.
    pub fn get_seed(&self, id: u64) -> Result<Option<Seed>> {
        self.connection
            .query_row(SELECT_SEED_SQL, params![id as i64], Self::build_seed_from_row)
            .optional()
            .db_context("Failed to query seed")
    }

    /// Lists all seeds, newest first.
    pub fn list_seeds(&self) -> Result<Vec<Seed>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_SEEDS_SQL)
            .db_context("Failed to prepare query")?;

        let seeds = stmt
            .query_map([], Self::build_seed_from_row)
            .db_context("Failed to query seeds")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch seeds")?;
        Ok(seeds)
    }
}
