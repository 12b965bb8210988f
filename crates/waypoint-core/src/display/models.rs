//! Display implementations for domain models.
//!
//! Kept apart from the model definitions so the data structures stay free
//! of presentation logic. Everything renders as markdown.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    elaboration::{ElaborationProgress, ElaborationTurn},
    models::{
        ChecklistTask, Phase, PhaseStatus, PhaseType, Project, ProjectStatus, ProjectSummary, Seed,
    },
    synthesis::{BudgetAllocation, Requirements, Timeline, Window},
};

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for PhaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for PhaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.title, self.id)?;
        writeln!(f)?;
        if let Some(desc) = &self.description {
            writeln!(f, "- **Description**: {desc}")?;
        }
        if let Some(participants) = self.estimated_participants {
            writeln!(f, "- **Estimated participants**: {participants}")?;
        }
        if let Some(days) = self.estimated_duration_days {
            writeln!(f, "- **Estimated duration**: {days} days")?;
        }
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {} ({} days)", self.start, self.end, self.days)
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Timeline")?;
        writeln!(f)?;
        writeln!(
            f,
            "- **Preparation** ({} weeks): {}",
            self.preparation_weeks, self.preparation
        )?;
        writeln!(f, "- **Exchange**: {}", self.exchange)?;
        writeln!(f, "- **Follow-up**: {}", self.follow_up)?;
        writeln!(f)
    }
}

impl fmt::Display for BudgetAllocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Budget (€{})", self.total)?;
        writeln!(f)?;
        writeln!(f, "| Category | Share | Amount |")?;
        writeln!(f, "|---|---:|---:|")?;
        for allocation in &self.categories {
            writeln!(
                f,
                "| {} | {}.{:02}% | €{} |",
                allocation.category.as_str(),
                allocation.share_bp / 100,
                allocation.share_bp % 100,
                allocation.amount
            )?;
        }
        if !self.adjustments.is_empty() {
            writeln!(f)?;
            writeln!(f, "Adjustments: {}", self.adjustments.join(", "))?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Requirements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Requirements")?;
        writeln!(f)?;

        if self.visas.required {
            write!(
                f,
                "- **Visas** ({}): {}",
                self.visas.visa_type.as_str(),
                self.visas.countries.join(", ")
            )?;
            if let Some(deadline) = self.visas.deadline {
                write!(f, ", apply by {deadline}")?;
            }
            writeln!(f)?;
        } else {
            writeln!(f, "- **Visas**: not required")?;
        }

        writeln!(
            f,
            "- **Insurance** ({}): {}",
            self.insurance.label(),
            self.insurance.coverage.join(", ")
        )?;

        if self.permits.is_empty() {
            writeln!(f, "- **Permits**: none")?;
        } else {
            writeln!(f, "- **Permits**:")?;
            for permit in &self.permits {
                writeln!(
                    f,
                    "  - {}: {} ({})",
                    permit.permit.as_str(),
                    permit.reason,
                    permit.authority
                )?;
            }
        }

        let access = &self.accessibility;
        writeln!(
            f,
            "- **Accessibility**: wheelchair access {}, dietary needs {}, languages {}",
            yes_no(access.wheelchair_access),
            yes_no(access.dietary_requirements),
            access.language_support.join(", ")
        )?;
        writeln!(f)
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

impl fmt::Display for ChecklistTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.completed { "x" } else { " " };
        write!(
            f,
            "- [{mark}] {} ({}, {})",
            self.description,
            self.category.as_str(),
            self.priority.as_str()
        )?;
        if let Some(due) = self.due_date {
            write!(f, " due {due}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = &self.template;
        writeln!(
            f,
            "### {}. {} ({})",
            phase.order + 1,
            phase.name,
            phase.status.with_icon()
        )?;
        writeln!(f)?;
        writeln!(f, "- **Type**: {}", phase.phase_type())?;
        writeln!(f, "- **Dates**: {} to {}", phase.start_date, phase.end_date)?;
        if let Some(deadline) = phase.deadline {
            writeln!(f, "- **Deadline**: {deadline}")?;
        }
        writeln!(
            f,
            "- **Budget**: €{} (spent €{})",
            phase.budget_allocated, self.budget_spent
        )?;
        if !phase.dependencies.is_empty() {
            writeln!(f, "- **After**: {}", phase.dependencies.join(", "))?;
        }
        if phase.skippable {
            writeln!(f, "- Skippable")?;
        }

        if !phase.checklist.is_empty() {
            writeln!(f)?;
            for task in &phase.checklist {
                write!(f, "{task}")?;
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;
        writeln!(f, "- Status: {}", self.status)?;
        writeln!(f, "- Seed: {}", self.seed_id)?;
        writeln!(f, "- Participants: {}", self.participant_count)?;
        writeln!(f, "- Exchange: {} to {}", self.start_date, self.end_date)?;
        writeln!(
            f,
            "- Budget: €{} (€{} unassigned reserve)",
            self.total_budget,
            self.unassigned_budget()
        )?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;

        if self.phases.is_empty() {
            writeln!(f, "\nNo phases in this project.")?;
        } else {
            writeln!(f, "\n## Phases")?;
            writeln!(f)?;
            for phase in &self.phases {
                write!(f, "{phase}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for ProjectSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Seed**: {}", self.seed_id)?;
        writeln!(f, "- **Status**: {}", self.status)?;
        writeln!(f, "- **Exchange**: {} to {}", self.start_date, self.end_date)?;
        writeln!(
            f,
            "- **Participants**: {}, **Budget**: €{}, **Phases**: {}",
            self.participant_count, self.total_budget, self.phase_count
        )?;
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)
    }
}

impl fmt::Display for ElaborationProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Elaboration of seed {}", self.seed_id)?;
        writeln!(f)?;
        if let Some(session_id) = &self.session_id {
            writeln!(f, "- Session: {session_id}")?;
        }
        writeln!(f, "- Completeness: {}%", self.completeness)?;
        if self.missing_fields.is_empty() {
            writeln!(f, "- Missing: nothing required")?;
        } else {
            writeln!(f, "- Missing: {}", self.missing_fields.join(", "))?;
        }
        match self.pending_question {
            Some(question) => writeln!(f, "\n**Next question**: {question}"),
            None => writeln!(f, "\nAll questions have been answered."),
        }
    }
}

impl fmt::Display for ElaborationTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.understood {
            writeln!(f, "_I couldn't extract anything from that answer._")?;
            writeln!(f)?;
        }
        for advice in &self.validation_errors {
            writeln!(f, "> {advice}")?;
        }
        if !self.validation_errors.is_empty() {
            writeln!(f)?;
        }

        match &self.prompt {
            Some(prompt) => {
                writeln!(f, "**{prompt}**")?;
                for suggestion in &self.suggestions {
                    writeln!(f, "\nSuggestion: {suggestion}")?;
                }
            }
            None => writeln!(f, "{}", crate::elaboration::COMPLETE_MESSAGE)?,
        }
        writeln!(f)?;
        writeln!(f, "Completeness: {}%", self.session.state.completeness)
    }
}
