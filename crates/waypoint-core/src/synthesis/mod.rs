//! Turning a complete specification into a scheduled, budgeted plan.
//!
//! Timeline, budget and requirements are independent of each other and are
//! computed in parallel. Their outputs feed the phase generator, and every
//! phase then gets its checklist. Nothing here touches the database.

pub mod budget;
pub mod checklist;
pub mod phases;
pub mod requirements;
pub mod timeline;

use std::sync::Arc;

use jiff::civil::Date;
use log::debug;

pub use self::budget::{BudgetAllocation, BudgetCategory, BudgetSignals, CategoryAllocation};
pub use self::requirements::{
    AccessibilityRequirement, InsurancePolicy, InsuranceRequirement, PermitRequirement,
    Requirements, VisaSummary, VisaType,
};
pub use self::timeline::{Timeline, Window};
use crate::{
    config::PlanningConfig,
    countries::CountryClassifier,
    elaboration::{missing_fields, recompute_visas},
    error::{PlannerError, Result},
    models::{PhaseTemplate, SpecificationState},
};

/// Everything synthesis produces before the project is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisOutput {
    pub timeline: Timeline,
    pub budget: BudgetAllocation,
    pub requirements: Requirements,
    pub phases: Vec<PhaseTemplate>,
}

/// Runs every generator over a specification.
///
/// Fails with [`PlannerError::IncompleteSpecification`] when a required
/// field is unset.
pub async fn synthesize(
    spec: &SpecificationState,
    config: &PlanningConfig,
    countries: Arc<dyn CountryClassifier>,
    today: Date,
) -> Result<SynthesisOutput> {
    let missing = missing_fields(spec);
    if !missing.is_empty() {
        return Err(PlannerError::IncompleteSpecification { missing });
    }

    let mut spec = spec.clone();
    recompute_visas(&mut spec, config, countries.as_ref());
    let spec = Arc::new(spec);
    let total = spec.budget.map_or(0, |b| b.total);

    let timeline_task = {
        let spec = Arc::clone(&spec);
        let config = config.clone();
        tokio::task::spawn_blocking(move || timeline::generate(&spec, &config, today))
    };
    let budget_task = {
        let spec = Arc::clone(&spec);
        let countries = Arc::clone(&countries);
        tokio::task::spawn_blocking(move || {
            budget::allocate(total, &BudgetSignals::from_spec(&spec, countries.as_ref()))
        })
    };
    let requirements_task = {
        let spec = Arc::clone(&spec);
        let config = config.clone();
        let countries = Arc::clone(&countries);
        tokio::task::spawn_blocking(move || {
            requirements::analyze(&spec, &config, countries.as_ref(), today)
        })
    };

    let (timeline, budget, requirements) =
        tokio::try_join!(timeline_task, budget_task, requirements_task)
            .map_err(PlannerError::join)?;
    let timeline = timeline?;
    let requirements = requirements?;
    debug!(
        "Generated timeline ({} weeks preparation), budget ({:?}) and {} permits",
        timeline.preparation_weeks,
        budget.adjustments,
        requirements.permits.len()
    );

    let mut phases = phases::generate(&spec, &timeline, &budget, &requirements)?;
    for phase in &mut phases {
        phase.checklist = checklist::generate(phase, &spec, &requirements);
    }

    Ok(SynthesisOutput {
        timeline,
        budget,
        requirements,
        phases,
    })
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::{
        countries::StaticCountries,
        models::{BudgetFigure, Destination},
    };

    fn complete_spec() -> SpecificationState {
        SpecificationState {
            participant_count: Some(20),
            duration_days: Some(5),
            budget: Some(BudgetFigure::from_total(10_000, 20)),
            destination: Some(Destination {
                country: "DE".to_string(),
                city: "Leipzig".to_string(),
                ..Default::default()
            }),
            participant_countries: vec!["FR".to_string(), "PL".to_string()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_incomplete_specification_is_rejected() {
        let mut spec = complete_spec();
        spec.participant_countries.clear();
        let result = synthesize(
            &spec,
            &PlanningConfig::default(),
            Arc::new(StaticCountries),
            date(2026, 1, 1),
        )
        .await;
        match result {
            Err(PlannerError::IncompleteSpecification { missing }) => {
                assert_eq!(missing, ["participantCountries"]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_every_phase_has_a_checklist() {
        let output = synthesize(
            &complete_spec(),
            &PlanningConfig::default(),
            Arc::new(StaticCountries),
            date(2026, 1, 1),
        )
        .await
        .unwrap();
        assert!(!output.phases.is_empty());
        assert!(output.phases.iter().all(|p| !p.checklist.is_empty()));
        assert_eq!(
            output.budget.categories.iter().map(|c| c.amount).sum::<u64>(),
            10_000
        );
        assert!(!output.requirements.visas.required);
    }
}
