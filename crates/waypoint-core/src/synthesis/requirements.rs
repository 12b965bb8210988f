//! Visa, insurance, permit and accessibility requirements.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::timeline::{add_days, exchange_start};
use crate::{
    config::PlanningConfig,
    countries::CountryClassifier,
    error::Result,
    models::{ActivityType, PermitType, SpecificationState, VisaRequirement},
};

/// Visa applications are due this many weeks before the exchange.
const VISA_LEAD_WEEKS: i64 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisaType {
    None,
    Schengen,
    National,
}

impl VisaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisaType::None => "none",
            VisaType::Schengen => "schengen",
            VisaType::National => "national",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisaSummary {
    pub required: bool,
    pub visa_type: VisaType,
    /// Origin countries whose participants need a visa
    pub countries: Vec<String>,
    /// Classification of every origin country
    pub per_country: Vec<VisaRequirement>,
    pub deadline: Option<Date>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsurancePolicy {
    GroupTravel,
    Individual,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceRequirement {
    pub policy: InsurancePolicy,
    pub coverage: Vec<String>,
}

impl InsuranceRequirement {
    pub fn is_group(&self) -> bool {
        self.policy == InsurancePolicy::GroupTravel
    }

    /// "group" or "individual", for task and phase wording.
    pub fn label(&self) -> &'static str {
        match self.policy {
            InsurancePolicy::GroupTravel => "group",
            InsurancePolicy::Individual => "individual",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitRequirement {
    pub permit: PermitType,
    pub reason: String,
    pub authority: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilityRequirement {
    pub wheelchair_access: bool,
    pub dietary_requirements: bool,
    pub language_support: Vec<String>,
}

/// Everything the project has to arrange beyond bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirements {
    pub visas: VisaSummary,
    pub insurance: InsuranceRequirement,
    pub permits: Vec<PermitRequirement>,
    pub accessibility: AccessibilityRequirement,
}

impl Requirements {
    pub fn permit(&self, permit: PermitType) -> Option<&PermitRequirement> {
        self.permits.iter().find(|p| p.permit == permit)
    }
}

/// Analyzes a specification. Pure: no lookups beyond the classifier.
///
/// Independent of the timeline; the visa deadline counts back from the
/// exchange start directly.
pub fn analyze(
    spec: &SpecificationState,
    config: &PlanningConfig,
    countries: &dyn CountryClassifier,
    today: Date,
) -> Result<Requirements> {
    Ok(Requirements {
        visas: analyze_visas(spec, config, countries, today)?,
        insurance: analyze_insurance(spec, config),
        permits: analyze_permits(spec),
        accessibility: AccessibilityRequirement {
            wheelchair_access: true,
            dietary_requirements: true,
            language_support: vec!["EN".to_string()],
        },
    })
}

fn analyze_visas(
    spec: &SpecificationState,
    config: &PlanningConfig,
    countries: &dyn CountryClassifier,
    today: Date,
) -> Result<VisaSummary> {
    let destination = spec.destination_country().unwrap_or_default();
    let destination_in_eu = countries.is_eu_member(destination);

    let per_country: Vec<VisaRequirement> = spec
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

    let countries_needing: Vec<String> = per_country
        .iter()
        .filter(|v| v.needed)
        .map(|v| v.country.clone())
        .collect();

    if countries_needing.is_empty() {
        return Ok(VisaSummary {
            required: false,
            visa_type: VisaType::None,
            countries: countries_needing,
            per_country,
            deadline: None,
        });
    }

    let start = exchange_start(spec, config, today)?;
    let deadline = add_days(start, -VISA_LEAD_WEEKS * 7)?.max(today);
    Ok(VisaSummary {
        required: true,
        visa_type: if countries.is_schengen(destination) {
            VisaType::Schengen
        } else {
            VisaType::National
        },
        countries: countries_needing,
        per_country,
        deadline: Some(deadline),
    })
}

fn analyze_insurance(spec: &SpecificationState, config: &PlanningConfig) -> InsuranceRequirement {
    let participants = spec.participant_count.unwrap_or(0);
    if participants >= config.group_insurance_threshold {
        InsuranceRequirement {
            policy: InsurancePolicy::GroupTravel,
            coverage: ["medical", "liability", "trip_cancellation", "emergency_evacuation"]
                .iter()
                .map(|c| (*c).to_string())
                .collect(),
        }
    } else {
        InsuranceRequirement {
            policy: InsurancePolicy::Individual,
            coverage: vec!["medical".to_string(), "liability".to_string()],
        }
    }
}

fn analyze_permits(spec: &SpecificationState) -> Vec<PermitRequirement> {
    let has = |wanted: ActivityType| spec.activities.iter().any(|a| a.activity_type == wanted);
    let mut permits = Vec::new();

    if spec.is_public_event == Some(true) || has(ActivityType::PublicEvent) {
        permits.push(permit(
            PermitType::Event,
            "Public gathering of participants",
            "Local municipality / city hall",
        ));
    }
    if spec
        .activities
        .iter()
        .any(|a| a.activity_type.is_workshop() && a.requires_facilitator)
    {
        permits.push(permit(
            PermitType::Venue,
            "Externally facilitated workshops at a rented venue",
            "Venue owner / local municipality",
        ));
    }
    if has(ActivityType::CookingWorkshop) {
        permits.push(permit(
            PermitType::FoodHandling,
            "Serving food to participants or cooking activities",
            "Local health department",
        ));
    }
    if spec.activities.iter().any(|a| a.is_outdoor) {
        permits.push(permit(
            PermitType::PublicAssembly,
            "Outdoor activities in public spaces",
            "Parks department / public space authority",
        ));
    }
    permits
}

fn permit(permit: PermitType, reason: &str, authority: &str) -> PermitRequirement {
    PermitRequirement {
        permit,
        reason: reason.to_string(),
        authority: authority.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::{
        countries::StaticCountries,
        models::{Activity, BudgetFigure, Destination},
    };

    fn spec(destination: &str, origins: &[&str]) -> SpecificationState {
        SpecificationState {
            participant_count: Some(20),
            duration_days: Some(7),
            budget: Some(BudgetFigure::from_total(10_000, 20)),
            destination: Some(Destination {
                country: destination.to_string(),
                city: "Somewhere".to_string(),
                ..Default::default()
            }),
            participant_countries: origins.iter().map(|c| (*c).to_string()).collect(),
            ..Default::default()
        }
    }

    fn analyzed(spec: &SpecificationState) -> Requirements {
        let config = PlanningConfig::default();
        analyze(spec, &config, &StaticCountries, date(2026, 1, 1)).unwrap()
    }

    #[test]
    fn test_eu_pairs_need_no_visa() {
        let requirements = analyzed(&spec("DE", &["FR", "ES", "PL"]));
        assert!(!requirements.visas.required);
        assert_eq!(requirements.visas.visa_type, VisaType::None);
        assert!(requirements.visas.deadline.is_none());
        assert!(requirements.visas.per_country.iter().all(|v| !v.needed));
    }

    #[test]
    fn test_non_eu_destination_needs_visa_for_all() {
        let requirements = analyzed(&spec("MA", &["ES", "FR", "IT", "DE"]));
        assert!(requirements.visas.required);
        assert_eq!(requirements.visas.visa_type, VisaType::National);
        assert_eq!(requirements.visas.countries.len(), 4);
        assert!(requirements
            .visas
            .per_country
            .iter()
            .all(|v| v.needed && v.estimated_cost > 0));
    }

    #[test]
    fn test_schengen_destination_with_non_eu_origin() {
        let requirements = analyzed(&spec("DE", &["FR", "UA"]));
        assert_eq!(requirements.visas.visa_type, VisaType::Schengen);
        assert_eq!(requirements.visas.countries, ["UA"]);
        // Exchange starts 2026-05-01; twelve weeks earlier
        assert_eq!(requirements.visas.deadline, Some(date(2026, 2, 6)));
    }

    #[test]
    fn test_insurance_threshold() {
        let requirements = analyzed(&spec("DE", &["FR"]));
        assert!(requirements.insurance.is_group());
        assert_eq!(requirements.insurance.coverage.len(), 4);

        let mut small = spec("DE", &["FR"]);
        small.participant_count = Some(8);
        assert_eq!(
            analyzed(&small).insurance.policy,
            InsurancePolicy::Individual
        );
    }

    #[test]
    fn test_permits_from_activities() {
        let mut s = spec("PT", &["ES"]);
        s.is_public_event = Some(true);
        s.activities = vec![
            Activity {
                name: "Cooking workshop".to_string(),
                activity_type: ActivityType::CookingWorkshop,
                duration_hours: Some(3),
                requires_facilitator: true,
                is_outdoor: false,
            },
            Activity {
                name: "Beach clean-up".to_string(),
                activity_type: ActivityType::Other,
                duration_hours: None,
                requires_facilitator: false,
                is_outdoor: true,
            },
        ];
        let requirements = analyzed(&s);
        let kinds: Vec<PermitType> = requirements.permits.iter().map(|p| p.permit).collect();
        assert_eq!(
            kinds,
            [
                PermitType::Event,
                PermitType::Venue,
                PermitType::FoodHandling,
                PermitType::PublicAssembly
            ]
        );
        assert_eq!(
            requirements.permit(PermitType::FoodHandling).unwrap().authority,
            "Local health department"
        );
    }
}
