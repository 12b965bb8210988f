//! The fixed question list.
//!
//! Each question is a plain record: target field, weight, required flag,
//! extraction instructions, and optional suggestion and validation functions.

use jiff::{civil::Date, Span};

use super::extraction::{ExtractedValue, ExtractionContract};
use crate::{
    config::PlanningConfig,
    models::{Seed, SpecField, SpecificationState},
};

/// Read-only inputs for suggestions and validators.
#[derive(Debug, Clone, Copy)]
pub struct FlowContext<'a> {
    pub seed: &'a Seed,
    pub config: &'a PlanningConfig,
    pub today: Date,
}

/// Outcome of a question's validator. Advisory only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Validation {
    pub valid: bool,
    pub message: Option<String>,
    pub suggested: Option<String>,
}

impl Validation {
    pub fn ok() -> Self {
        Self {
            valid: true,
            ..Default::default()
        }
    }

    pub fn invalid(message: impl Into<String>, suggested: Option<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
            suggested,
        }
    }

    /// Human-readable advisory text, or `None` when valid.
    pub fn advisory(&self) -> Option<String> {
        if self.valid {
            return None;
        }
        let message = self.message.as_deref().unwrap_or("Invalid input");
        Some(match &self.suggested {
            Some(s) => format!("{message} (suggested: {s})"),
            None => message.to_string(),
        })
    }
}

pub type SuggestFn = fn(&SpecificationState, &FlowContext<'_>) -> Option<String>;
pub type ValidateFn = fn(&ExtractedValue, &FlowContext<'_>) -> Validation;

/// One elicited fact.
#[derive(Debug)]
pub struct QuestionDefinition {
    pub id: &'static str,
    pub field: SpecField,
    pub prompt: &'static str,
    pub follow_up: Option<&'static str>,
    /// Contribution to completeness, 0 to 1
    pub weight: f64,
    pub required: bool,
    pub instructions: &'static str,
    pub suggest: Option<SuggestFn>,
    pub validate: Option<ValidateFn>,
}

impl QuestionDefinition {
    pub fn contract(&self) -> ExtractionContract {
        ExtractionContract {
            field: self.field,
            instructions: self.instructions,
        }
    }

    /// Prompt text with the follow-up appended.
    pub fn full_prompt(&self) -> String {
        match self.follow_up {
            Some(follow_up) => format!("{}\n\n{}", self.prompt, follow_up),
            None => self.prompt.to_string(),
        }
    }

    pub fn suggestion(&self, state: &SpecificationState, ctx: &FlowContext<'_>) -> Option<String> {
        self.suggest.and_then(|suggest| suggest(state, ctx))
    }

    pub fn check(&self, value: &ExtractedValue, ctx: &FlowContext<'_>) -> Validation {
        self.validate
            .map_or_else(Validation::ok, |validate| validate(value, ctx))
    }
}

pub static QUESTIONS: [QuestionDefinition; 10] = [
    QuestionDefinition {
        id: "participant-count",
        field: SpecField::ParticipantCount,
        prompt: "How many participants are you planning for this exchange?",
        follow_up: Some("Youth exchanges typically range from 16 to 60 participants."),
        weight: 0.20,
        required: true,
        instructions: "Extract the participant count as a whole number. Look for phrases like \
                       \"30 participants\", \"about 25 people\" or \"around thirty young people\".",
        suggest: Some(suggest_participants),
        validate: Some(validate_participants),
    },
    QuestionDefinition {
        id: "budget",
        field: SpecField::Budget,
        prompt: "What's your estimated budget per participant? (Or the total budget if you prefer)",
        follow_up: Some(
            "Typical exchanges range from €300 to €500 per participant, depending on duration \
             and destination.",
        ),
        weight: 0.15,
        required: true,
        instructions: "Extract budget information in euros. \"€400 each\" or \"500 per person\" \
                       is a per-participant amount; \"total budget of 15000\" is a total.",
        suggest: Some(suggest_budget),
        validate: Some(validate_budget),
    },
    QuestionDefinition {
        id: "duration",
        field: SpecField::Duration,
        prompt: "How long will the exchange last? (e.g., 7 days, 2 weeks)",
        follow_up: Some("Most youth exchanges run for 5 to 21 days, including travel days."),
        weight: 0.15,
        required: true,
        instructions: "Extract the duration in days. Convert weeks to days at 7 days per week.",
        suggest: Some(suggest_duration),
        validate: Some(validate_duration),
    },
    QuestionDefinition {
        id: "destination",
        field: SpecField::Destination,
        prompt: "Where will this exchange take place? (Country and city)",
        follow_up: Some(
            "Please mention the country and city. You can also add venue details if known.",
        ),
        weight: 0.15,
        required: true,
        instructions: "Extract the location. Convert the country to its ISO 3166-1 alpha-2 code \
                       and keep the city name. Include venue or accessibility notes if given.",
        suggest: None,
        validate: Some(validate_destination),
    },
    QuestionDefinition {
        id: "participant-countries",
        field: SpecField::ParticipantCountries,
        prompt: "Which countries will participants come from?",
        follow_up: Some(
            "List the countries whose young people will participate. This is used to work out \
             visa requirements.",
        ),
        weight: 0.10,
        required: true,
        instructions: "Extract every participant country as an ISO 3166-1 alpha-2 code.",
        suggest: None,
        validate: Some(validate_countries),
    },
    QuestionDefinition {
        id: "start-date",
        field: SpecField::StartDate,
        prompt: "When should the exchange start?",
        follow_up: Some("A specific date helps schedule bookings and permit deadlines."),
        weight: 0.05,
        required: false,
        instructions: "Extract the first day of the exchange as an ISO 8601 date.",
        suggest: Some(suggest_start_date),
        validate: Some(validate_start_date),
    },
    QuestionDefinition {
        id: "activities",
        field: SpecField::Activities,
        prompt: "What are the main activities or workshops planned?",
        follow_up: Some(
            "Describe the key learning activities, workshops, or sessions. Be as specific as \
             possible.",
        ),
        weight: 0.15,
        required: false,
        instructions: "Extract each activity with a name, a type (workshop, cultural_visit, \
                       team_building, reflection, cooking_workshop, public_event, other), an \
                       estimated duration in hours, whether an external facilitator runs it and \
                       whether it happens outdoors.",
        suggest: None,
        validate: None,
    },
    QuestionDefinition {
        id: "public-event",
        field: SpecField::IsPublicEvent,
        prompt: "Will any part of the exchange be open to the public?",
        follow_up: Some("Public events usually need a permit from the local authorities."),
        weight: 0.05,
        required: false,
        instructions: "Extract a yes/no answer.",
        suggest: None,
        validate: None,
    },
    QuestionDefinition {
        id: "priorities",
        field: SpecField::Priorities,
        prompt: "Which programme priorities does this address? (e.g., Inclusion, Green, \
                 Digital transformation, Participation)",
        follow_up: Some("Multiple selections are encouraged."),
        weight: 0.10,
        required: false,
        instructions: "Map the answer to: \"Inclusion and diversity\", \"Environment and fight \
                       against climate change\", \"Digital transformation\", \"Participation in \
                       democratic life\".",
        suggest: Some(suggest_priorities),
        validate: None,
    },
    QuestionDefinition {
        id: "learning-objectives",
        field: SpecField::LearningObjectives,
        prompt: "What should participants learn or take home from the exchange?",
        follow_up: None,
        weight: 0.05,
        required: false,
        instructions: "Extract each learning objective as a short phrase.",
        suggest: None,
        validate: None,
    },
];

/// Official priority names and the description keywords that suggest them.
pub(crate) const PRIORITY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Inclusion and diversity",
        &["inclusion", "inclusive", "disadvantaged", "diverse", "diversity"],
    ),
    (
        "Environment and fight against climate change",
        &["environment", "green", "climate", "sustainab", "ecolog"],
    ),
    (
        "Digital transformation",
        &["digital", "technology", "online", "media literacy"],
    ),
    (
        "Participation in democratic life",
        &["democra", "civic", "participation", "citizenship"],
    ),
];

fn estimated_participants(state: &SpecificationState, ctx: &FlowContext<'_>) -> u32 {
    state
        .participant_count
        .or(ctx.seed.estimated_participants)
        .unwrap_or(ctx.config.default_participants)
}

fn estimated_duration(state: &SpecificationState, ctx: &FlowContext<'_>) -> u32 {
    state
        .duration_days
        .or(ctx.seed.estimated_duration_days)
        .unwrap_or(ctx.config.default_duration_days)
}

fn suggest_participants(state: &SpecificationState, ctx: &FlowContext<'_>) -> Option<String> {
    let estimate = estimated_participants(state, ctx);
    Some(format!(
        "Consider {estimate} participants as a good starting point."
    ))
}

fn suggest_budget(state: &SpecificationState, ctx: &FlowContext<'_>) -> Option<String> {
    let days = estimated_duration(state, ctx);
    let participants = estimated_participants(state, ctx);
    let per_person = u64::from(days)
        .saturating_mul(ctx.config.daily_rate_per_person)
        .saturating_add(ctx.config.base_cost_per_person);
    Some(format!(
        "Based on {days} days and {participants} participants, consider €{per_person} per \
         participant (total: €{}).",
        per_person.saturating_mul(u64::from(participants))
    ))
}

fn suggest_duration(state: &SpecificationState, ctx: &FlowContext<'_>) -> Option<String> {
    let estimate = estimated_duration(state, ctx);
    Some(format!("Consider {estimate} days for a well-paced program."))
}

fn suggest_start_date(_state: &SpecificationState, ctx: &FlowContext<'_>) -> Option<String> {
    let horizon = i64::from(ctx.config.start_horizon_days);
    let date = ctx.today.checked_add(Span::new().days(horizon)).ok()?;
    Some(format!(
        "Exchanges are usually planned about {horizon} days ahead; consider starting on {date}."
    ))
}

fn suggest_priorities(_state: &SpecificationState, ctx: &FlowContext<'_>) -> Option<String> {
    let description = ctx.seed.description.as_deref().unwrap_or_default().to_lowercase();
    let matched: Vec<&str> = PRIORITY_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| description.contains(k)))
        .map(|(name, _)| *name)
        .collect();

    if matched.is_empty() {
        Some("Consider which programme priorities your project addresses.".to_string())
    } else {
        Some(format!(
            "Based on your project description, consider: {}",
            matched.join(", ")
        ))
    }
}

fn validate_participants(value: &ExtractedValue, _ctx: &FlowContext<'_>) -> Validation {
    match value {
        ExtractedValue::ParticipantCount(count) if !(16..=60).contains(count) => {
            Validation::invalid(
                "Youth exchanges require 16-60 participants",
                Some(if *count < 16 { "16" } else { "60" }.to_string()),
            )
        }
        _ => Validation::ok(),
    }
}

fn validate_budget(value: &ExtractedValue, _ctx: &FlowContext<'_>) -> Validation {
    match value {
        ExtractedValue::Budget {
            per_person: Some(per_person),
            ..
        } if !(200..=700).contains(per_person) => Validation::invalid(
            "Budget seems unusual. Typical range is €200-700 per participant.",
            Some(if *per_person < 200 { "€300" } else { "€500" }.to_string()),
        ),
        _ => Validation::ok(),
    }
}

fn validate_duration(value: &ExtractedValue, _ctx: &FlowContext<'_>) -> Validation {
    match value {
        ExtractedValue::Duration(days) if !(5..=21).contains(days) => Validation::invalid(
            "Youth exchanges typically last 5-21 days.",
            Some(if *days < 5 { "7 days" } else { "14 days" }.to_string()),
        ),
        _ => Validation::ok(),
    }
}

fn validate_destination(value: &ExtractedValue, _ctx: &FlowContext<'_>) -> Validation {
    match value {
        ExtractedValue::Destination(d) if d.country.trim().is_empty() || d.city.trim().is_empty() => {
            Validation::invalid("Please provide both country and city.", None)
        }
        _ => Validation::ok(),
    }
}

fn validate_countries(value: &ExtractedValue, _ctx: &FlowContext<'_>) -> Validation {
    match value {
        ExtractedValue::ParticipantCountries(countries) if countries.is_empty() => {
            Validation::invalid("Please specify at least one participant country.", None)
        }
        _ => Validation::ok(),
    }
}

fn validate_start_date(value: &ExtractedValue, ctx: &FlowContext<'_>) -> Validation {
    match value {
        ExtractedValue::StartDate(date) if *date < ctx.today => {
            Validation::invalid("The start date cannot be in the past.", None)
        }
        _ => Validation::ok(),
    }
}

/// Looks up the question for a field.
pub fn question_for(field: SpecField) -> Option<&'static QuestionDefinition> {
    QUESTIONS.iter().find(|q| q.field == field)
}
