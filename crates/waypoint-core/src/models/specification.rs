//! The evolving specification a seed accumulates during elaboration.

use std::{fmt, str::FromStr};

use jiff::civil::Date;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Addressable fields of a [`SpecificationState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpecField {
    ParticipantCount,
    Budget,
    Duration,
    Destination,
    ParticipantCountries,
    StartDate,
    Activities,
    IsPublicEvent,
    Priorities,
    LearningObjectives,
}

impl SpecField {
    /// Field name as shown to users and stored in the missing-field list.
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecField::ParticipantCount => "participantCount",
            SpecField::Budget => "budget",
            SpecField::Duration => "duration",
            SpecField::Destination => "destination",
            SpecField::ParticipantCountries => "participantCountries",
            SpecField::StartDate => "startDate",
            SpecField::Activities => "activities",
            SpecField::IsPublicEvent => "isPublicEvent",
            SpecField::Priorities => "priorities",
            SpecField::LearningObjectives => "learningObjectives",
        }
    }
}

impl fmt::Display for SpecField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of a budget figure the user actually stated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetBasis {
    PerPerson,
    Total,
}

/// Budget stated either per participant or in total; the other side is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetFigure {
    /// Total budget in whole euros
    pub total: u64,
    /// Budget per participant in whole euros
    pub per_person: u64,
    /// The figure the user gave; the other one is recomputed from it
    pub basis: BudgetBasis,
}

impl BudgetFigure {
    /// Builds the figure from a per-person amount.
    pub fn from_per_person(per_person: u64, participants: u32) -> Self {
        Self {
            total: per_person.saturating_mul(u64::from(participants)),
            per_person,
            basis: BudgetBasis::PerPerson,
        }
    }

    /// Builds the figure from a total amount, rounding the per-person share.
    pub fn from_total(total: u64, participants: u32) -> Self {
        let count = u64::from(participants.max(1));
        Self {
            total,
            per_person: total / count + u64::from((total % count) * 2 >= count),
            basis: BudgetBasis::Total,
        }
    }

    /// Re-derives the non-stated side for a new participant count.
    pub fn rescaled(self, participants: u32) -> Self {
        match self.basis {
            BudgetBasis::PerPerson => Self::from_per_person(self.per_person, participants),
            BudgetBasis::Total => Self::from_total(self.total, participants),
        }
    }
}

/// Where the exchange takes place.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Destination {
    /// ISO 3166-1 alpha-2 country code
    pub country: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<String>,
}

impl Destination {
    /// An object with no entries counts as unanswered.
    pub fn is_empty(&self) -> bool {
        self.country.trim().is_empty() && self.city.trim().is_empty()
    }

    /// City and country, for template text.
    pub fn label(&self) -> String {
        match (self.city.trim().is_empty(), self.country.trim().is_empty()) {
            (false, false) => format!("{}, {}", self.city, self.country),
            (false, true) => self.city.clone(),
            _ => self.country.clone(),
        }
    }
}

/// Kind of planned activity; drives permits, budget rules and checklists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Workshop,
    CulturalVisit,
    TeamBuilding,
    Reflection,
    CookingWorkshop,
    PublicEvent,
    #[default]
    Other,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Workshop => "workshop",
            ActivityType::CulturalVisit => "cultural_visit",
            ActivityType::TeamBuilding => "team_building",
            ActivityType::Reflection => "reflection",
            ActivityType::CookingWorkshop => "cooking_workshop",
            ActivityType::PublicEvent => "public_event",
            ActivityType::Other => "other",
        }
    }

    /// Workshops of any flavour count towards the workshop-heavy signals.
    pub fn is_workshop(&self) -> bool {
        matches!(self, ActivityType::Workshop | ActivityType::CookingWorkshop)
    }
}

impl FromStr for ActivityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "workshop" => Ok(ActivityType::Workshop),
            "cultural_visit" => Ok(ActivityType::CulturalVisit),
            "team_building" => Ok(ActivityType::TeamBuilding),
            "reflection" => Ok(ActivityType::Reflection),
            "cooking_workshop" => Ok(ActivityType::CookingWorkshop),
            "public_event" => Ok(ActivityType::PublicEvent),
            "other" => Ok(ActivityType::Other),
            _ => Err(format!("Invalid activity type: {s}")),
        }
    }
}

/// One planned activity of the exchange programme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub name: String,
    #[serde(rename = "type", default)]
    pub activity_type: ActivityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<u32>,
    /// Run by an external facilitator rather than the organisers
    #[serde(default)]
    pub requires_facilitator: bool,
    #[serde(default)]
    pub is_outdoor: bool,
}

/// Visa need for one origin country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisaRequirement {
    /// Origin country code
    pub country: String,
    pub needed: bool,
    /// Flat per-person estimate in euros, zero when not needed
    pub estimated_cost: u64,
}

/// Fields derived from other answers, never set by an answer directly.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DerivedRequirements {
    #[serde(default)]
    pub visas: Vec<VisaRequirement>,
}

/// The running specification document of one seed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpecificationState {
    pub participant_count: Option<u32>,
    pub budget: Option<BudgetFigure>,
    pub duration_days: Option<u32>,
    pub destination: Option<Destination>,
    pub participant_countries: Vec<String>,
    pub start_date: Option<Date>,
    pub activities: Vec<Activity>,
    pub is_public_event: Option<bool>,
    pub priorities: Vec<String>,
    pub learning_objectives: Vec<String>,

    pub requirements: DerivedRequirements,

    /// Weighted completeness, 0 to 100; always recomputed, never answered
    pub completeness: u8,
    pub missing_fields: Vec<String>,
    pub session_id: Option<String>,
    /// Index of the question currently awaiting an answer
    pub cursor: usize,
}

impl SpecificationState {
    /// Whether a field holds a non-empty value. Empty lists and objects
    /// count as unanswered.
    pub fn is_answered(&self, field: SpecField) -> bool {
        match field {
            SpecField::ParticipantCount => self.participant_count.is_some(),
            SpecField::Budget => self.budget.is_some(),
            SpecField::Duration => self.duration_days.is_some(),
            SpecField::Destination => self.destination.as_ref().is_some_and(|d| !d.is_empty()),
            SpecField::ParticipantCountries => !self.participant_countries.is_empty(),
            SpecField::StartDate => self.start_date.is_some(),
            SpecField::Activities => !self.activities.is_empty(),
            SpecField::IsPublicEvent => self.is_public_event.is_some(),
            SpecField::Priorities => !self.priorities.is_empty(),
            SpecField::LearningObjectives => !self.learning_objectives.is_empty(),
        }
    }

    /// Destination country code, when known.
    pub fn destination_country(&self) -> Option<&str> {
        self.destination
            .as_ref()
            .map(|d| d.country.trim())
            .filter(|c| !c.is_empty())
    }

    /// Number of workshop-type activities.
    pub fn workshop_count(&self) -> usize {
        self.activities
            .iter()
            .filter(|a| a.activity_type.is_workshop())
            .count()
    }

    /// Whether any origin country needs a visa.
    pub fn needs_visa(&self) -> bool {
        self.requirements.visas.iter().any(|v| v.needed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collections_count_as_unanswered() {
        let mut state = SpecificationState {
            destination: Some(Destination::default()),
            ..Default::default()
        };
        assert!(!state.is_answered(SpecField::Destination));
        assert!(!state.is_answered(SpecField::ParticipantCountries));

        state.participant_countries.push("DE".to_string());
        assert!(state.is_answered(SpecField::ParticipantCountries));
    }

    #[test]
    fn test_budget_rescales_from_stated_side() {
        let per_person = BudgetFigure::from_per_person(400, 28);
        assert_eq!(per_person.total, 11_200);
        assert_eq!(per_person.rescaled(30).total, 12_000);

        let total = BudgetFigure::from_total(10_000, 30);
        assert_eq!(total.per_person, 333);
        assert_eq!(total.rescaled(20).per_person, 500);
        assert_eq!(total.rescaled(20).total, 10_000);
    }

    #[test]
    fn test_budget_saturates_at_extremes() {
        let per_person = BudgetFigure::from_per_person(u64::MAX, 30);
        assert_eq!(per_person.total, u64::MAX);
        assert_eq!(per_person.rescaled(60).total, u64::MAX);

        let total = BudgetFigure::from_total(u64::MAX, 2);
        assert_eq!(total.per_person, u64::MAX / 2 + 1);
        assert_eq!(BudgetFigure::from_total(u64::MAX, 1).per_person, u64::MAX);
    }

    #[test]
    fn test_state_round_trips_through_json() {
        let state = SpecificationState {
            participant_count: Some(30),
            start_date: Some(jiff::civil::date(2027, 5, 1)),
            activities: vec![Activity {
                name: "Cooking together".to_string(),
                activity_type: ActivityType::CookingWorkshop,
                duration_hours: Some(3),
                requires_facilitator: false,
                is_outdoor: false,
            }],
            ..Default::default()
        };
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"participantCount\":30"));
        assert!(json.contains("\"type\":\"cooking_workshop\""));
        let parsed: SpecificationState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }
}
