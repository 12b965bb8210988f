//! Completeness scoring.

use super::questions::QUESTIONS;
use crate::models::SpecificationState;

/// Weighted share of answered questions, rounded to a whole percent.
pub fn score(state: &SpecificationState) -> u8 {
    let total: f64 = QUESTIONS.iter().map(|q| q.weight).sum();
    if total <= 0.0 {
        return 0;
    }
    let achieved: f64 = QUESTIONS
        .iter()
        .filter(|q| state.is_answered(q.field))
        .map(|q| q.weight)
        .sum();

    (100.0 * achieved / total).round().clamp(0.0, 100.0) as u8
}

/// Names of required fields that are still unset.
pub fn missing_fields(state: &SpecificationState) -> Vec<String> {
    QUESTIONS
        .iter()
        .filter(|q| q.required && !state.is_answered(q.field))
        .map(|q| q.field.as_str().to_string())
        .collect()
}

/// Recomputes completeness and the missing-field list in place.
pub fn rescore(state: &mut SpecificationState) {
    state.completeness = score(state);
    state.missing_fields = missing_fields(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetFigure, Destination};

    #[test]
    fn test_empty_state_scores_zero() {
        let state = SpecificationState::default();
        assert_eq!(score(&state), 0);
        assert_eq!(missing_fields(&state).len(), 5);
    }

    #[test]
    fn test_score_is_weighted_and_idempotent() {
        let state = SpecificationState {
            participant_count: Some(30),
            ..Default::default()
        };
        // 0.20 of 1.15 total weight
        assert_eq!(score(&state), 17);
        assert_eq!(score(&state), score(&state.clone()));
    }

    #[test]
    fn test_score_monotonic_in_required_fields() {
        let mut state = SpecificationState::default();
        let mut last = score(&state);

        state.participant_count = Some(24);
        state.budget = Some(BudgetFigure::from_per_person(400, 24));
        state.duration_days = Some(8);
        state.destination = Some(Destination {
            country: "PT".to_string(),
            city: "Porto".to_string(),
            ..Default::default()
        });
        state.participant_countries = vec!["ES".to_string()];

        let mut probe = SpecificationState::default();
        for step in 0..5 {
            match step {
                0 => probe.participant_count = state.participant_count,
                1 => probe.budget = state.budget,
                2 => probe.duration_days = state.duration_days,
                3 => probe.destination = state.destination.clone(),
                _ => probe.participant_countries = state.participant_countries.clone(),
            }
            let current = score(&probe);
            assert!(current >= last);
            last = current;
        }
        assert!(missing_fields(&probe).is_empty());
    }

    #[test]
    fn test_empty_list_does_not_score() {
        let mut state = SpecificationState {
            activities: Vec::new(),
            ..Default::default()
        };
        rescore(&mut state);
        assert_eq!(state.completeness, 0);
    }
}
