//! Boundary to the extraction service.
//!
//! An [`Extractor`] turns one free-text answer into a typed value for the
//! question being asked. Extraction is treated as unreliable: every call is
//! bounded by a timeout and any failure degrades to "nothing extracted".

use std::time::Duration;

use async_trait::async_trait;
use jiff::civil::Date;
use log::{debug, warn};
use schemars::{schema_for, JsonSchema};
use serde::Deserialize;
use thiserror::Error;

use crate::models::{Activity, Destination, SpecField};

/// Errors an extraction service may report. Never surfaced past the
/// elaboration engine.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Could not extract {field} from the answer")]
    Unparseable { field: SpecField },

    #[error("Extraction timed out after {0:?}")]
    Timeout(Duration),

    #[error("Extraction service unavailable: {0}")]
    Unavailable(String),
}

/// A structured value extracted for one question.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractedValue {
    ParticipantCount(u32),
    Budget {
        per_person: Option<u64>,
        total: Option<u64>,
    },
    Duration(u32),
    Destination(Destination),
    ParticipantCountries(Vec<String>),
    StartDate(Date),
    Activities(Vec<Activity>),
    IsPublicEvent(bool),
    Priorities(Vec<String>),
    LearningObjectives(Vec<String>),
}

impl ExtractedValue {
    /// The specification field this value fills.
    pub fn field(&self) -> SpecField {
        match self {
            ExtractedValue::ParticipantCount(_) => SpecField::ParticipantCount,
            ExtractedValue::Budget { .. } => SpecField::Budget,
            ExtractedValue::Duration(_) => SpecField::Duration,
            ExtractedValue::Destination(_) => SpecField::Destination,
            ExtractedValue::ParticipantCountries(_) => SpecField::ParticipantCountries,
            ExtractedValue::StartDate(_) => SpecField::StartDate,
            ExtractedValue::Activities(_) => SpecField::Activities,
            ExtractedValue::IsPublicEvent(_) => SpecField::IsPublicEvent,
            ExtractedValue::Priorities(_) => SpecField::Priorities,
            ExtractedValue::LearningObjectives(_) => SpecField::LearningObjectives,
        }
    }
}

/// What a question expects back: the target field plus natural-language
/// instructions for the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionContract {
    pub field: SpecField,
    pub instructions: &'static str,
}

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct ParticipantCountPayload {
    participant_count: u32,
}

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct BudgetPayload {
    budget_per_participant: Option<u64>,
    total_budget: Option<u64>,
}

#[derive(Deserialize, JsonSchema)]
struct DurationPayload {
    /// Days; weeks are converted at seven days each
    duration: u32,
}

#[derive(Deserialize, JsonSchema)]
struct DestinationPayload {
    destination: Destination,
}

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct CountriesPayload {
    participant_countries: Vec<String>,
}

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct StartDatePayload {
    /// ISO 8601 calendar date
    start_date: String,
}

#[derive(Deserialize, JsonSchema)]
struct ActivitiesPayload {
    activities: Vec<Activity>,
}

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct PublicEventPayload {
    is_public_event: bool,
}

#[derive(Deserialize, JsonSchema)]
struct PrioritiesPayload {
    priorities: Vec<String>,
}

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct ObjectivesPayload {
    learning_objectives: Vec<String>,
}

impl ExtractionContract {
    /// JSON schema of the response a JSON-speaking service must return.
    pub fn json_schema(&self) -> serde_json::Value {
        let schema = match self.field {
            SpecField::ParticipantCount => schema_for!(ParticipantCountPayload),
            SpecField::Budget => schema_for!(BudgetPayload),
            SpecField::Duration => schema_for!(DurationPayload),
            SpecField::Destination => schema_for!(DestinationPayload),
            SpecField::ParticipantCountries => schema_for!(CountriesPayload),
            SpecField::StartDate => schema_for!(StartDatePayload),
            SpecField::Activities => schema_for!(ActivitiesPayload),
            SpecField::IsPublicEvent => schema_for!(PublicEventPayload),
            SpecField::Priorities => schema_for!(PrioritiesPayload),
            SpecField::LearningObjectives => schema_for!(ObjectivesPayload),
        };
        schema.to_value()
    }

    /// Parses a JSON response shaped like [`Self::json_schema`].
    pub fn parse_response(
        &self,
        response: serde_json::Value,
    ) -> Result<ExtractedValue, ExtractionError> {
        let unparseable = |_| ExtractionError::Unparseable { field: self.field };
        let value = match self.field {
            SpecField::ParticipantCount => {
                let p: ParticipantCountPayload =
                    serde_json::from_value(response).map_err(unparseable)?;
                ExtractedValue::ParticipantCount(p.participant_count)
            }
            SpecField::Budget => {
                let p: BudgetPayload = serde_json::from_value(response).map_err(unparseable)?;
                if p.budget_per_participant.is_none() && p.total_budget.is_none() {
                    return Err(ExtractionError::Unparseable { field: self.field });
                }
                ExtractedValue::Budget {
                    per_person: p.budget_per_participant,
                    total: p.total_budget,
                }
            }
            SpecField::Duration => {
                let p: DurationPayload = serde_json::from_value(response).map_err(unparseable)?;
                ExtractedValue::Duration(p.duration)
            }
            SpecField::Destination => {
                let p: DestinationPayload =
                    serde_json::from_value(response).map_err(unparseable)?;
                ExtractedValue::Destination(p.destination)
            }
            SpecField::ParticipantCountries => {
                let p: CountriesPayload = serde_json::from_value(response).map_err(unparseable)?;
                ExtractedValue::ParticipantCountries(p.participant_countries)
            }
            SpecField::StartDate => {
                let p: StartDatePayload = serde_json::from_value(response).map_err(unparseable)?;
                let date = p
                    .start_date
                    .parse::<Date>()
                    .map_err(|_| ExtractionError::Unparseable { field: self.field })?;
                ExtractedValue::StartDate(date)
            }
            SpecField::Activities => {
                let p: ActivitiesPayload = serde_json::from_value(response).map_err(unparseable)?;
                ExtractedValue::Activities(p.activities)
            }
            SpecField::IsPublicEvent => {
                let p: PublicEventPayload =
                    serde_json::from_value(response).map_err(unparseable)?;
                ExtractedValue::IsPublicEvent(p.is_public_event)
            }
            SpecField::Priorities => {
                let p: PrioritiesPayload = serde_json::from_value(response).map_err(unparseable)?;
                ExtractedValue::Priorities(p.priorities)
            }
            SpecField::LearningObjectives => {
                let p: ObjectivesPayload = serde_json::from_value(response).map_err(unparseable)?;
                ExtractedValue::LearningObjectives(p.learning_objectives)
            }
        };
        Ok(value)
    }
}

/// Extraction service: idempotent, side-effect-free, possibly slow.
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(
        &self,
        contract: &ExtractionContract,
        text: &str,
    ) -> Result<ExtractedValue, ExtractionError>;
}

/// Runs one extraction under `limit`; every failure becomes `None`.
pub async fn extract_bounded(
    extractor: &dyn Extractor,
    contract: &ExtractionContract,
    text: &str,
    limit: Duration,
) -> Option<ExtractedValue> {
    let outcome = match tokio::time::timeout(limit, extractor.extract(contract, text)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(ExtractionError::Timeout(limit)),
    };

    match outcome {
        Ok(value) if value.field() == contract.field => {
            debug!("Extracted {} from answer", contract.field);
            Some(value)
        }
        Ok(value) => {
            warn!(
                "Extractor returned {} while {} was asked; ignoring",
                value.field(),
                contract.field
            );
            None
        }
        Err(e) => {
            warn!("Extraction failed, treating answer as unparsed: {e}");
            None
        }
    }
}
