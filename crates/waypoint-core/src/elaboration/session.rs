//! The elaboration conversation.
//!
//! Every step takes the session by value and returns the updated one, so
//! the cursor is threaded explicitly through each call.

use std::sync::Arc;

use jiff::{civil::Date, Timestamp};
use log::debug;
use uuid::Uuid;

use super::{
    extraction::{extract_bounded, Extractor},
    flow::{current_question, next_question},
    merge::merge,
    questions::{FlowContext, QUESTIONS},
    scoring::rescore,
};
use crate::{
    config::PlanningConfig,
    countries::CountryClassifier,
    error::{PlannerError, Result},
    models::{ElaborationSession, Role, Seed, SpecificationState, TranscriptMessage},
};

/// Message shown once every question has been asked or answered.
pub const COMPLETE_MESSAGE: &str = "All information collected! Ready to proceed.";

/// Outcome of starting a session or answering a question.
#[derive(Debug, Clone)]
pub struct ElaborationTurn {
    pub session: ElaborationSession,

    /// Next question, `None` once complete
    pub prompt: Option<String>,

    /// Computed default for the next question
    pub suggestions: Vec<String>,

    pub complete: bool,

    /// Advisory messages from the validator; never block progression
    pub validation_errors: Vec<String>,

    /// Whether anything was extracted from the last answer
    pub understood: bool,
}

/// Read-only snapshot of how far a session has come.
#[derive(Debug, Clone, PartialEq)]
pub struct ElaborationProgress {
    pub seed_id: u64,
    pub session_id: Option<String>,
    pub completeness: u8,
    pub missing_fields: Vec<String>,
    pub complete: bool,
    /// Question awaiting an answer, `None` once complete
    pub pending_question: Option<&'static str>,
    pub state: SpecificationState,
}

impl ElaborationProgress {
    pub fn of(session: &ElaborationSession) -> Self {
        Self {
            seed_id: session.seed_id,
            session_id: session.state.session_id.clone(),
            completeness: session.state.completeness,
            missing_fields: session.state.missing_fields.clone(),
            complete: session.is_complete(),
            pending_question: current_question(&session.state).map(|(_, q)| q.prompt),
            state: session.state.clone(),
        }
    }
}

/// Drives question, extraction, validation, merge and scoring for one seed.
pub struct Elaborator {
    config: PlanningConfig,
    extractor: Arc<dyn Extractor>,
    countries: Arc<dyn CountryClassifier>,
}

impl Elaborator {
    pub fn new(
        config: PlanningConfig,
        extractor: Arc<dyn Extractor>,
        countries: Arc<dyn CountryClassifier>,
    ) -> Self {
        Self {
            config,
            extractor,
            countries,
        }
    }

    /// Starts a session, or resumes `prior` if given.
    ///
    /// A fresh session takes the duration from the seed estimate.
    pub fn start(
        &self,
        seed: &Seed,
        prior: Option<ElaborationSession>,
        today: Date,
    ) -> ElaborationTurn {
        let now = Timestamp::now();
        let mut session = prior.unwrap_or_else(|| ElaborationSession {
            seed_id: seed.id,
            state: SpecificationState {
                duration_days: seed.estimated_duration_days,
                ..Default::default()
            },
            transcript: Vec::new(),
            created_at: now,
            updated_at: now,
        });

        if session.state.session_id.is_none() {
            let id = Uuid::new_v4().to_string();
            debug!("Starting elaboration session {id} for seed {}", seed.id);
            session.state.session_id = Some(id);
        } else {
            debug!(
                "Resuming elaboration session {} for seed {}",
                session.session_id().unwrap_or_default(),
                seed.id
            );
        }

        session.state = merge(session.state, None, &self.config, self.countries.as_ref());
        rescore(&mut session.state);
        let from = session.state.cursor;
        self.advance(session, seed, today, from, Vec::new(), true)
    }

    /// Processes one answer to the question at the cursor.
    ///
    /// Extraction failures leave the field unset and validation failures
    /// are returned as advice; the only hard error is a session-id mismatch.
    pub async fn answer(
        &self,
        mut session: ElaborationSession,
        session_id: Option<&str>,
        text: &str,
        seed: &Seed,
        today: Date,
    ) -> Result<ElaborationTurn> {
        if let (Some(given), Some(active)) = (session_id, session.session_id()) {
            if given != active {
                return Err(PlannerError::SessionMismatch {
                    active: active.to_string(),
                    given: given.to_string(),
                });
            }
        }

        session
            .transcript
            .push(TranscriptMessage::new(Role::User, text));

        let Some((index, question)) = current_question(&session.state) else {
            debug!("Answer received for completed session of seed {}", seed.id);
            return Ok(self.advance(session, seed, today, QUESTIONS.len(), Vec::new(), false));
        };

        let ctx = FlowContext {
            seed,
            config: &self.config,
            today,
        };
        let contract = question.contract();
        let extracted = extract_bounded(
            self.extractor.as_ref(),
            &contract,
            text,
            self.config.extraction_timeout(),
        )
        .await;

        let understood = extracted.is_some();
        let validation_errors: Vec<String> = extracted
            .as_ref()
            .and_then(|value| question.check(value, &ctx).advisory())
            .into_iter()
            .collect();

        session.state = merge(session.state, extracted, &self.config, self.countries.as_ref());
        rescore(&mut session.state);
        debug!(
            "Answered {} for seed {}: completeness {}%",
            question.id, seed.id, session.state.completeness
        );

        Ok(self.advance(session, seed, today, index + 1, validation_errors, understood))
    }

    /// Moves the cursor to the next question from `from` and renders it.
    fn advance(
        &self,
        mut session: ElaborationSession,
        seed: &Seed,
        today: Date,
        from: usize,
        validation_errors: Vec<String>,
        understood: bool,
    ) -> ElaborationTurn {
        let ctx = FlowContext {
            seed,
            config: &self.config,
            today,
        };
        let next = next_question(&session.state, from);
        session.state.cursor = next.map_or(QUESTIONS.len(), |(index, _)| index);
        session.updated_at = Timestamp::now();

        let (prompt, suggestions, message) = match next {
            Some((_, question)) => {
                let prompt = question.full_prompt();
                let suggestions: Vec<String> =
                    question.suggestion(&session.state, &ctx).into_iter().collect();
                (Some(prompt.clone()), suggestions, prompt)
            }
            None => (None, Vec::new(), COMPLETE_MESSAGE.to_string()),
        };
        session
            .transcript
            .push(TranscriptMessage::new(Role::Assistant, message));

        ElaborationTurn {
            complete: prompt.is_none(),
            session,
            prompt,
            suggestions,
            validation_errors,
            understood,
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::{
        countries::StaticCountries,
        elaboration::{
            extraction::{ExtractedValue, ExtractionContract, ExtractionError},
            HeuristicExtractor,
        },
        models::SpecField,
    };

    struct NothingExtractor;

    #[async_trait]
    impl Extractor for NothingExtractor {
        async fn extract(
            &self,
            contract: &ExtractionContract,
            _text: &str,
        ) -> std::result::Result<ExtractedValue, ExtractionError> {
            Err(ExtractionError::Unparseable {
                field: contract.field,
            })
        }
    }

    fn seed() -> Seed {
        Seed {
            id: 7,
            title: "Voices of the Coast".to_string(),
            description: Some("Inclusion through storytelling".to_string()),
            estimated_participants: None,
            estimated_duration_days: None,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn elaborator(extractor: Arc<dyn Extractor>) -> Elaborator {
        Elaborator::new(PlanningConfig::default(), extractor, Arc::new(StaticCountries))
    }

    fn heuristic() -> Elaborator {
        let countries: Arc<dyn CountryClassifier> = Arc::new(StaticCountries);
        elaborator(Arc::new(HeuristicExtractor::new(countries).unwrap()))
    }

    fn today() -> Date {
        jiff::civil::date(2026, 3, 1)
    }

    #[test]
    fn test_start_assigns_session_and_first_prompt() {
        let turn = heuristic().start(&seed(), None, today());
        assert!(turn.session.session_id().is_some());
        assert_eq!(turn.session.state.cursor, 0);
        assert!(turn.prompt.unwrap().contains("How many participants"));
        assert_eq!(turn.suggestions.len(), 1);
        assert!(!turn.complete);
        assert_eq!(turn.session.transcript.len(), 1);
    }

    #[test]
    fn test_start_prefills_seed_duration() {
        let mut seed = seed();
        seed.estimated_duration_days = Some(9);
        let turn = heuristic().start(&seed, None, today());
        assert_eq!(turn.session.state.duration_days, Some(9));
        assert!(turn.session.state.completeness > 0);
    }

    #[tokio::test]
    async fn test_answer_advances_exactly_one_question() {
        let engine = heuristic();
        let seed = seed();
        let turn = engine.start(&seed, None, today());
        let id = turn.session.session_id().map(str::to_string);

        let turn = engine
            .answer(turn.session, id.as_deref(), "30 participants", &seed, today())
            .await
            .unwrap();
        assert_eq!(turn.session.state.participant_count, Some(30));
        assert_eq!(turn.session.state.cursor, 1);
        assert!(turn.understood);
        assert!(turn.validation_errors.is_empty());
        assert!(turn.prompt.unwrap().contains("budget"));
    }

    #[tokio::test]
    async fn test_validation_is_advisory() {
        let engine = heuristic();
        let seed = seed();
        let turn = engine.start(&seed, None, today());

        let turn = engine
            .answer(turn.session, None, "8 people", &seed, today())
            .await
            .unwrap();
        assert_eq!(turn.session.state.participant_count, Some(8));
        assert_eq!(turn.validation_errors.len(), 1);
        assert!(turn.validation_errors[0].contains("suggested: 16"));
        assert_eq!(turn.session.state.cursor, 1);
    }

    #[tokio::test]
    async fn test_unparsed_answer_keeps_session_alive() {
        let engine = elaborator(Arc::new(NothingExtractor));
        let seed = seed();
        let turn = engine.start(&seed, None, today());
        let before = turn.session.state.completeness;

        let mut turn = engine
            .answer(turn.session, None, "hmm", &seed, today())
            .await
            .unwrap();
        assert!(!turn.understood);
        assert_eq!(turn.session.state.participant_count, None);
        assert_eq!(turn.session.state.completeness, before);
        assert!(!turn.complete);
        assert!(turn
            .session
            .state
            .missing_fields
            .contains(&SpecField::ParticipantCount.as_str().to_string()));
        assert_eq!(turn.session.state.cursor, 1);

        // Once every question has been passed the cursor wraps to the first
        // unanswered required question
        for _ in 1..QUESTIONS.len() {
            turn = engine
                .answer(turn.session, None, "hmm", &seed, today())
                .await
                .unwrap();
        }
        assert_eq!(turn.session.state.cursor, 0);
        assert_eq!(turn.session.state.completeness, before);
        assert!(!turn.complete);
        assert!(turn.prompt.unwrap().contains("How many participants"));
    }

    #[tokio::test]
    async fn test_mismatched_session_id_is_rejected() {
        let engine = heuristic();
        let seed = seed();
        let turn = engine.start(&seed, None, today());

        let result = engine
            .answer(turn.session, Some("not-the-session"), "30", &seed, today())
            .await;
        assert!(matches!(result, Err(PlannerError::SessionMismatch { .. })));
    }

    #[tokio::test]
    async fn test_full_conversation_completes() {
        let engine = heuristic();
        let seed = seed();
        let mut turn = engine.start(&seed, None, today());
        let answers = [
            "24 participants",
            "€400 per person",
            "8 days",
            "Porto, Portugal",
            "Spain, Italy and Ukraine",
            "2026-09-14",
            "a cooking workshop, a city tour",
            "no",
            "inclusion",
            "intercultural communication",
        ];
        for answer in answers {
            assert!(!turn.complete, "completed early before {answer:?}");
            turn = engine
                .answer(turn.session, None, answer, &seed, today())
                .await
                .unwrap();
        }

        assert!(turn.complete);
        assert_eq!(turn.prompt, None);
        let state = &turn.session.state;
        assert_eq!(state.completeness, 100);
        assert!(state.missing_fields.is_empty());
        assert_eq!(state.budget.unwrap().total, 9_600);
        assert_eq!(state.is_public_event, Some(false));
        let ua = state
            .requirements
            .visas
            .iter()
            .find(|v| v.country == "UA")
            .unwrap();
        assert!(ua.needed);
        assert_eq!(
            turn.session.transcript.last().unwrap().content,
            COMPLETE_MESSAGE
        );
    }
}
