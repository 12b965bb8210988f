//! Applying extracted values to the specification.

use log::debug;

use super::extraction::ExtractedValue;
use crate::{
    config::PlanningConfig,
    countries::CountryClassifier,
    models::{BudgetFigure, SpecificationState, VisaRequirement},
};

/// Merges one extracted value into the state and recomputes derived fields.
///
/// `None` is an empty merge: the raw fields stay as they were.
pub fn merge(
    mut state: SpecificationState,
    value: Option<ExtractedValue>,
    config: &PlanningConfig,
    countries: &dyn CountryClassifier,
) -> SpecificationState {
    if let Some(value) = value {
        apply(&mut state, value, config, countries);
    }
    recompute_visas(&mut state, config, countries);
    state
}

fn apply(
    state: &mut SpecificationState,
    value: ExtractedValue,
    config: &PlanningConfig,
    countries: &dyn CountryClassifier,
) {
    let participants = state.participant_count.unwrap_or(config.default_participants);

    match value {
        ExtractedValue::ParticipantCount(count) => {
            state.participant_count = Some(count);
            state.budget = state.budget.map(|b| b.rescaled(count));
        }
        ExtractedValue::Budget { per_person, total } => {
            let figure = match (per_person, total) {
                (Some(per_person), _) => Some(BudgetFigure::from_per_person(per_person, participants)),
                (None, Some(total)) => Some(BudgetFigure::from_total(total, participants)),
                (None, None) => None,
            };
            if figure.is_some() {
                state.budget = figure;
            }
        }
        ExtractedValue::Duration(days) => state.duration_days = Some(days),
        ExtractedValue::Destination(mut destination) => {
            if let Some(code) = countries.resolve(&destination.country) {
                destination.country = code;
            }
            state.destination = Some(destination);
        }
        ExtractedValue::ParticipantCountries(list) => {
            let mut codes: Vec<String> = Vec::with_capacity(list.len());
            for entry in list {
                let code = countries
                    .resolve(&entry)
                    .unwrap_or_else(|| entry.trim().to_ascii_uppercase());
                if !code.is_empty() && !codes.contains(&code) {
                    codes.push(code);
                }
            }
            state.participant_countries = codes;
        }
        ExtractedValue::StartDate(date) => state.start_date = Some(date),
        ExtractedValue::Activities(activities) => state.activities = activities,
        ExtractedValue::IsPublicEvent(flag) => state.is_public_event = Some(flag),
        ExtractedValue::Priorities(priorities) => state.priorities = priorities,
        ExtractedValue::LearningObjectives(objectives) => state.learning_objectives = objectives,
    }
}

/// Classifies every origin country once both destination and origins are
/// known. A visa is needed unless origin and destination are both EU members.
/// With either side missing the list is empty.
pub fn recompute_visas(
    state: &mut SpecificationState,
    config: &PlanningConfig,
    countries: &dyn CountryClassifier,
) {
    let destination = state
        .destination_country()
        .filter(|_| !state.participant_countries.is_empty())
        .map(str::to_string);
    let Some(destination) = destination else {
        state.requirements.visas.clear();
        return;
    };

    let destination_in_eu = countries.is_eu_member(&destination);
    state.requirements.visas = state
        .participant_countries
        .iter()
        .map(|origin| {
            let needed = !(destination_in_eu && countries.is_eu_member(origin));
            VisaRequirement {
                country: origin.clone(),
                needed,
                estimated_cost: if needed { config.visa_cost_per_person } else { 0 },
            }
        })
        .collect();
    debug!(
        "Recomputed visa requirements for {} origin countries to {destination}",
        state.requirements.visas.len()
    );
}
