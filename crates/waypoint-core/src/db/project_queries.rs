//! Project and phase storage.
//!
//! A project is only ever written together with all of its phases, inside
//! a single transaction.

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, OptionalExtension, ToSql};

use super::{parse_json, parse_optional_text, parse_text};
use crate::{
    error::{DatabaseResultExt, Result},
    models::{
        NewProject, Phase, PhaseStatus, PhaseTemplate, Project, ProjectStatus, ProjectSummary,
    },
};

const INSERT_PROJECT_SQL: &str = "INSERT INTO projects (seed_id, name, participant_count, total_budget, start_date, end_date, status, metadata, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";
const INSERT_PHASE_SQL: &str = "INSERT INTO phases (project_id, phase_key, name, kind, status, start_date, end_date, deadline, budget_allocated, budget_spent, phase_order, dependencies, checklist, editable, skippable) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 0, ?10, ?11, ?12, ?13, ?14)";
const SELECT_PROJECT_SQL: &str = "SELECT id, seed_id, name, participant_count, total_budget, start_date, end_date, status, metadata, created_at FROM projects WHERE id = ?1";
const SELECT_PHASES_SQL: &str = "SELECT id, project_id, phase_key, name, kind, status, start_date, end_date, deadline, budget_allocated, budget_spent, phase_order, dependencies, checklist, editable, skippable FROM phases WHERE project_id = ?1 ORDER BY phase_order, id";
const PROJECT_SUMMARY_COLUMNS: &str = "id, seed_id, name, participant_count, total_budget, start_date, end_date, status, created_at, phase_count";

impl super::Database {
    /// Creates a project and all of its phases atomically.
    ///
    /// If any insert fails the transaction is dropped without committing,
    /// so neither the project nor any of its phases become visible.
    pub fn create_project_with_phases(&mut self, project: &NewProject) -> Result<Project> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let metadata = serde_json::to_string(&project.metadata)?;

        tx.execute(
            INSERT_PROJECT_SQL,
            params![
                project.seed_id as i64,
                &project.name,
                project.participant_count,
                project.total_budget as i64,
                project.start_date.to_string(),
                project.end_date.to_string(),
                ProjectStatus::Planning.as_str(),
                metadata,
                now.to_string()
            ],
        )
        .db_context("Failed to insert project")?;
        let project_id = tx.last_insert_rowid() as u64;

        let mut phases = Vec::with_capacity(project.phases.len());
        {
            let mut stmt = tx
                .prepare(INSERT_PHASE_SQL)
                .db_context("Failed to prepare phase insert")?;
            for template in &project.phases {
                let kind = serde_json::to_string(&template.kind)?;
                let dependencies = serde_json::to_string(&template.dependencies)?;
                let checklist = serde_json::to_string(&template.checklist)?;
                let deadline = template.deadline.map(|d| d.to_string());
                let values: [&dyn ToSql; 14] = [
                    &(project_id as i64),
                    &template.key,
                    &template.name,
                    &kind,
                    &template.status.as_str(),
                    &template.start_date.to_string(),
                    &template.end_date.to_string(),
                    &deadline,
                    &(template.budget_allocated as i64),
                    &template.order,
                    &dependencies,
                    &checklist,
                    &template.editable,
                    &template.skippable,
                ];
                stmt.execute(&values[..])
                    .db_context(&format!("Failed to insert phase '{}'", template.key))?;

                phases.push(Phase {
                    id: tx.last_insert_rowid() as u64,
                    project_id,
                    budget_spent: 0,
                    template: template.clone(),
                });
            }
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Project {
            id: project_id,
            seed_id: project.seed_id,
            name: project.name.clone(),
            participant_count: project.participant_count,
            total_budget: project.total_budget,
            start_date: project.start_date,
            end_date: project.end_date,
            status: ProjectStatus::Planning,
            created_at: now,
            metadata: project.metadata.clone(),
            phases,
        })
    }

    /// Retrieves a project by its ID, with its phases in order.
    pub fn get_project(&self, id: u64) -> Result<Option<Project>> {
        let project = self
            .connection
            .query_row(SELECT_PROJECT_SQL, params![id as i64], |row| {
                Ok(Project {
                    id: row.get::<_, i64>(0)? as u64,
                    seed_id: row.get::<_, i64>(1)? as u64,
                    name: row.get(2)?,
                    participant_count: row.get(3)?,
                    total_budget: row.get::<_, i64>(4)? as u64,
                    start_date: parse_text::<Date>(row, 5)?,
                    end_date: parse_text::<Date>(row, 6)?,
                    status: parse_text::<ProjectStatus>(row, 7)?,
                    metadata: parse_json(row, 8)?,
                    created_at: parse_text::<Timestamp>(row, 9)?,
                    phases: Vec::new(),
                })
            })
            .optional()
            .db_context("Failed to query project")?;

        match project {
            Some(mut project) => {
                project.phases = self.get_phases(project.id)?;
                Ok(Some(project))
            }
            None => Ok(None),
        }
    }

    /// Phases of a project ordered by their position.
    pub fn get_phases(&self, project_id: u64) -> Result<Vec<Phase>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PHASES_SQL)
            .db_context("Failed to prepare query")?;

        let phases = stmt
            .query_map(params![project_id as i64], |row| {
                Ok(Phase {
                    id: row.get::<_, i64>(0)? as u64,
                    project_id: row.get::<_, i64>(1)? as u64,
                    budget_spent: row.get::<_, i64>(10)? as u64,
                    template: PhaseTemplate {
                        key: row.get(2)?,
                        name: row.get(3)?,
                        kind: parse_json(row, 4)?,
                        status: parse_text::<PhaseStatus>(row, 5)?,
                        start_date: parse_text::<Date>(row, 6)?,
                        end_date: parse_text::<Date>(row, 7)?,
                        deadline: parse_optional_text::<Date>(row, 8)?,
                        budget_allocated: row.get::<_, i64>(9)? as u64,
                        order: row.get(11)?,
                        dependencies: parse_json(row, 12)?,
                        checklist: parse_json(row, 13)?,
                        editable: row.get(14)?,
                        skippable: row.get(15)?,
                    },
                })
            })
            .db_context("Failed to query phases")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch phases")?;
        Ok(phases)
    }

    /// Lists project summaries, newest first, optionally for one seed.
    pub fn list_projects(&self, seed_id: Option<u64>) -> Result<Vec<ProjectSummary>> {
        let mut query = format!("SELECT {PROJECT_SUMMARY_COLUMNS} FROM project_summaries");
        let mut params_vec: Vec<Box<dyn ToSql>> = Vec::new();
        if let Some(seed_id) = seed_id {
            query.push_str(" WHERE seed_id = ?");
            params_vec.push(Box::new(seed_id as i64));
        }
        query.push_str(" ORDER BY created_at DESC, id DESC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;
        let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|b| &**b).collect();

        let summaries = stmt
            .query_map(&params_refs[..], |row| {
                Ok(ProjectSummary {
                    id: row.get::<_, i64>(0)? as u64,
                    seed_id: row.get::<_, i64>(1)? as u64,
                    name: row.get(2)?,
                    participant_count: row.get(3)?,
                    total_budget: row.get::<_, i64>(4)? as u64,
                    start_date: parse_text::<Date>(row, 5)?,
                    end_date: parse_text::<Date>(row, 6)?,
                    status: parse_text::<ProjectStatus>(row, 7)?,
                    created_at: parse_text::<Timestamp>(row, 8)?,
                    phase_count: row.get(9)?,
                })
            })
            .db_context("Failed to query projects")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch projects")?;
        Ok(summaries)
    }
}
