//! Question selection.

use super::questions::{QuestionDefinition, QUESTIONS};
use crate::models::SpecificationState;

/// Finds the next question to ask, scanning from `from`.
///
/// Any unanswered question in `from..` qualifies. The scan then wraps to the
/// start of the list, where only unanswered required questions qualify, so
/// optional questions are asked once and required ones until answered.
/// `None` means the session is complete.
pub fn next_question(
    state: &SpecificationState,
    from: usize,
) -> Option<(usize, &'static QuestionDefinition)> {
    let from = from.min(QUESTIONS.len());

    QUESTIONS
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, q)| !state.is_answered(q.field))
        .or_else(|| {
            QUESTIONS
                .iter()
                .enumerate()
                .take(from)
                .find(|(_, q)| q.required && !state.is_answered(q.field))
        })
}

/// The question pending at the state's cursor, if any.
pub fn current_question(state: &SpecificationState) -> Option<(usize, &'static QuestionDefinition)> {
    next_question(state, state.cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Destination, SpecField};

    #[test]
    fn test_starts_with_first_unanswered() {
        let state = SpecificationState::default();
        let (index, question) = next_question(&state, 0).unwrap();
        assert_eq!(index, 0);
        assert_eq!(question.field, SpecField::ParticipantCount);
    }

    #[test]
    fn test_skips_answered_fields() {
        let state = SpecificationState {
            participant_count: Some(30),
            duration_days: Some(7),
            ..Default::default()
        };
        let (index, _) = next_question(&state, 0).unwrap();
        assert_eq!(index, 1);
        let (index, _) = next_question(&state, 2).unwrap();
        assert_eq!(index, 3);
    }

    #[test]
    fn test_wraps_to_unanswered_required_only() {
        // Everything after the cursor answered, budget still missing
        let state = SpecificationState {
            participant_count: Some(30),
            duration_days: Some(7),
            destination: Some(Destination {
                country: "DE".to_string(),
                city: "Berlin".to_string(),
                ..Default::default()
            }),
            participant_countries: vec!["FR".to_string()],
            ..Default::default()
        };
        // From the end: optional questions behind the cursor are not re-asked
        let (index, question) = next_question(&state, QUESTIONS.len()).unwrap();
        assert_eq!(index, 1);
        assert_eq!(question.field, SpecField::Budget);
    }

    #[test]
    fn test_complete_when_required_answered_and_past_optionals() {
        let state = SpecificationState {
            participant_count: Some(30),
            budget: Some(crate::models::BudgetFigure::from_total(10_000, 30)),
            duration_days: Some(7),
            destination: Some(Destination {
                country: "DE".to_string(),
                city: "Berlin".to_string(),
                ..Default::default()
            }),
            participant_countries: vec!["FR".to_string()],
            ..Default::default()
        };
        assert!(next_question(&state, QUESTIONS.len()).is_none());
        // Optional questions ahead of the cursor are still offered
        assert_eq!(next_question(&state, 5).unwrap().1.field, SpecField::StartDate);
    }
}
