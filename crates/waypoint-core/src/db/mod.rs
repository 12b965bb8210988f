//! SQLite persistence for seeds, elaboration sessions and projects.
//!
//! The schema lives in `assets/schema.sql` and is applied every time a
//! connection is opened. Query groups are split by table into their own
//! `impl Database` blocks.

use std::{fmt::Display, path::Path, str::FromStr};

use rusqlite::{types::Type, Connection, Row};
use serde::de::DeserializeOwned;

use crate::error::{DatabaseResultExt, Result};

pub mod elaboration_queries;
pub mod project_queries;
pub mod schema;
pub mod seed_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

/// Reads a text column and parses it with [`FromStr`].
fn parse_text<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let text: String = row.get(idx)?;
    text.parse::<T>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("Invalid value '{text}': {e}").into(),
        )
    })
}

/// Like [`parse_text`] for nullable columns.
fn parse_optional_text<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    let text: Option<String> = row.get(idx)?;
    text.map(|text| {
        text.parse::<T>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                Type::Text,
                format!("Invalid value '{text}': {e}").into(),
            )
        })
    })
    .transpose()
}

/// Reads a JSON text column.
fn parse_json<T: DeserializeOwned>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
    let text: String = row.get(idx)?;
    serde_json::from_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
