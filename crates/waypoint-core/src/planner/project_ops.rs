//! Synthesis and project operations for the Planner.

use std::sync::Arc;

use log::info;

use super::{blocking, Planner};
use crate::{
    db::Database,
    display::ConversionResult,
    error::{PlannerError, Result},
    models::{NewProject, Project, ProjectMetadata, ProjectSummary},
    params::{Id, ListProjects},
    synthesis::synthesize,
};

impl Planner {
    /// Converts a seed's elaborated specification into a stored project.
    ///
    /// Synthesis runs first; the project and all of its phases are then
    /// written in one transaction. Nothing is stored unless every phase is.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::NoSession` when the seed was never elaborated,
    /// `PlannerError::IncompleteSpecification` when required answers are
    /// missing, and `PlannerError::Synthesis` when the project could not be
    /// stored.
    pub async fn convert_seed(&self, params: &Id) -> Result<ConversionResult> {
        let seed = self.require_seed(params.id).await?;
        let session = self
            .load_session(seed.id)
            .await?
            .ok_or(PlannerError::NoSession { seed_id: seed.id })?;

        let output = synthesize(
            &session.state,
            &self.config,
            Arc::clone(&self.countries),
            self.today(),
        )
        .await?;

        let new_project = NewProject {
            seed_id: seed.id,
            name: seed.title.clone(),
            participant_count: session.state.participant_count.unwrap_or_default(),
            total_budget: output.budget.total,
            start_date: output.timeline.exchange.start,
            end_date: output.timeline.exchange.end,
            metadata: ProjectMetadata {
                timeline: output.timeline,
                budget: output.budget,
                requirements: output.requirements,
            },
            phases: output.phases,
        };

        let db_path = self.db_path.clone();
        let project = blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_project_with_phases(&new_project)
        })
        .await
        .map_err(|e| PlannerError::Synthesis {
            message: format!("Failed to store project: {e}"),
        })?;

        info!(
            "Converted seed {} into project {} with {} phases",
            seed.id,
            project.id,
            project.phases.len()
        );
        Ok(ConversionResult::new(project))
    }

    /// Retrieves a project by its ID, with its phases.
    pub async fn get_project(&self, params: &Id) -> Result<Option<Project>> {
        let db_path = self.db_path.clone();
        let project_id = params.id;

        blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_project(project_id)
        })
        .await
    }

    /// Lists project summaries, optionally for one seed.
    pub async fn list_projects(&self, params: &ListProjects) -> Result<Vec<ProjectSummary>> {
        let db_path = self.db_path.clone();
        let seed_id = params.seed_id;

        blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_projects(seed_id)
        })
        .await
    }
}
