//! Elaboration session operations for the Planner.
//!
//! Each operation loads the stored session, runs one conversation step and
//! writes the session back. Steps for the same seed are serialized by a
//! per-seed lock held across the whole read-modify-write.

use log::debug;

use super::{blocking, Planner};
use crate::{
    db::Database,
    elaboration::{ElaborationProgress, ElaborationTurn},
    error::{PlannerError, Result},
    models::ElaborationSession,
    params::{Id, SubmitAnswer},
};

impl Planner {
    /// Starts the elaboration session for a seed, resuming a stored one.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::SeedNotFound` if the seed does not exist.
    pub async fn start_elaboration(&self, params: &Id) -> Result<ElaborationTurn> {
        let lock = self.session_lock(params.id).await;
        let _guard = lock.lock().await;

        let seed = self.require_seed(params.id).await?;
        let prior = self.load_session(seed.id).await?;
        let turn = self.elaborator.start(&seed, prior, self.today());
        self.store_session(&turn.session).await?;
        Ok(turn)
    }

    /// Submits one answer to the question the session is asking.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::NoSession` if the seed has no session and
    /// `PlannerError::SessionMismatch` if the given session id is stale.
    pub async fn submit_answer(&self, params: &SubmitAnswer) -> Result<ElaborationTurn> {
        let lock = self.session_lock(params.seed_id).await;
        let _guard = lock.lock().await;

        let seed = self.require_seed(params.seed_id).await?;
        let session = self
            .load_session(seed.id)
            .await?
            .ok_or(PlannerError::NoSession { seed_id: seed.id })?;

        let turn = self
            .elaborator
            .answer(
                session,
                params.session_id.as_deref(),
                &params.answer,
                &seed,
                self.today(),
            )
            .await?;
        self.store_session(&turn.session).await?;
        Ok(turn)
    }

    /// Completeness and pending question of a seed's session.
    pub async fn elaboration_progress(&self, params: &Id) -> Result<ElaborationProgress> {
        let session = self
            .load_session(params.id)
            .await?
            .ok_or(PlannerError::NoSession { seed_id: params.id })?;
        Ok(ElaborationProgress::of(&session))
    }

    pub(crate) async fn load_session(&self, seed_id: u64) -> Result<Option<ElaborationSession>> {
        let db_path = self.db_path.clone();
        blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_elaboration(seed_id)
        })
        .await
    }

    async fn store_session(&self, session: &ElaborationSession) -> Result<()> {
        let db_path = self.db_path.clone();
        let session = session.clone();
        let seed_id = session.seed_id;
        blocking(move || {
            let db = Database::new(&db_path)?;
            db.save_elaboration(&session)
        })
        .await?;
        debug!("Stored elaboration session for seed {seed_id}");
        Ok(())
    }
}
