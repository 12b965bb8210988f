//! Seed operations for the Planner.

use log::debug;

use super::{blocking, Planner};
use crate::{
    db::Database,
    error::{PlannerError, Result},
    models::Seed,
    params::{CreateSeed, Id},
};

impl Planner {
    /// Creates a new seed.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` for an empty title or zero
    /// estimates.
    pub async fn create_seed(&self, params: &CreateSeed) -> Result<Seed> {
        let title = params.title.trim().to_string();
        if title.is_empty() {
            return Err(PlannerError::invalid_input("title", "must not be empty"));
        }
        if params.estimated_participants == Some(0) {
            return Err(PlannerError::invalid_input(
                "estimated_participants",
                "must be greater than zero",
            ));
        }
        if params.estimated_duration_days == Some(0) {
            return Err(PlannerError::invalid_input(
                "estimated_duration_days",
                "must be greater than zero",
            ));
        }

        let db_path = self.db_path.clone();
        let params = params.clone();
        let seed = blocking(move || {
            let db = Database::new(&db_path)?;
            db.create_seed(
                &title,
                params.description.as_deref(),
                params.estimated_participants,
                params.estimated_duration_days,
            )
        })
        .await?;
        debug!("Created seed {}", seed.id);
        Ok(seed)
    }

    /// Retrieves a seed by its ID.
    pub async fn get_seed(&self, params: &Id) -> Result<Option<Seed>> {
        let db_path = self.db_path.clone();
        let seed_id = params.id;

        blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_seed(seed_id)
        })
        .await
    }

    /// Lists all seeds, newest first.
    pub async fn list_seeds(&self) -> Result<Vec<Seed>> {
        let db_path = self.db_path.clone();

        blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_seeds()
        })
        .await
    }

    /// Like [`Planner::get_seed`] but a missing seed is an error.
    pub(crate) async fn require_seed(&self, seed_id: u64) -> Result<Seed> {
        self.get_seed(&Id { id: seed_id })
            .await?
            .ok_or(PlannerError::SeedNotFound { id: seed_id })
    }
}
