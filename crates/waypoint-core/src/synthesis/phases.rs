//! Phase templates derived from timeline, budget and requirements.
//!
//! Preparation phases are placed at fixed fractions of the preparation
//! window; activity phases are spread over the exchange itself. Each phase
//! takes the budget of its matching category. Staffing and contingency are
//! never assigned to a phase and stay as the project's unassigned reserve.

use jiff::civil::Date;

use super::{
    budget::{BudgetAllocation, BudgetCategory},
    requirements::Requirements,
    timeline::{add_days, Timeline, Window},
};
use crate::{
    error::Result,
    models::{
        Activity, ActivityType, PermitType, PhaseKind, PhaseStatus, PhaseTemplate,
        SpecificationState, TravelDirection,
    },
};

/// Permit phases: key, name, position in the preparation window (percent)
/// and relative budget weight.
const PERMIT_PHASES: [(PermitType, &str, &str, u32, u32, u64); 5] = [
    (PermitType::Visa, "permit-visa", "Visa Applications", 15, 50, 5),
    (PermitType::Event, "permit-event", "Event Permits", 35, 65, 3),
    (PermitType::Venue, "permit-venue", "Venue Permits", 40, 75, 2),
    (
        PermitType::FoodHandling,
        "permit-food-handling",
        "Food Handling Permits",
        50,
        85,
        2,
    ),
    (
        PermitType::PublicAssembly,
        "permit-public-assembly",
        "Public Assembly Permits",
        35,
        65,
        2,
    ),
];

const APPLICATION: &str = "application";
const INSURANCE: &str = "insurance";
const ACCOMMODATION: &str = "accommodation";
const TRAVEL_OUTBOUND: &str = "travel-outbound";
const FOOD: &str = "food";
const TRAVEL_RETURN: &str = "travel-return";
const REPORTING: &str = "reporting";

struct Draft {
    key: String,
    name: String,
    kind: PhaseKind,
    window: (Date, Date),
    deadline: Option<Date>,
    budget: u64,
    dependencies: Vec<String>,
    skippable: bool,
}

impl Draft {
    fn new(key: &str, name: impl Into<String>, kind: PhaseKind, window: (Date, Date)) -> Self {
        Self {
            key: key.to_string(),
            name: name.into(),
            kind,
            window,
            deadline: Some(window.1),
            budget: 0,
            dependencies: Vec::new(),
            skippable: false,
        }
    }

    fn deadline(mut self, deadline: Date) -> Self {
        self.deadline = Some(clamp(deadline, self.window.0, self.window.1));
        self
    }

    fn budget(mut self, amount: u64) -> Self {
        self.budget = amount;
        self
    }

    fn after(mut self, keys: &[&str]) -> Self {
        self.dependencies
            .extend(keys.iter().map(|k| (*k).to_string()));
        self
    }

    fn skippable(mut self) -> Self {
        self.skippable = true;
        self
    }

    fn into_template(self, order: u32) -> PhaseTemplate {
        PhaseTemplate {
            key: self.key,
            name: self.name,
            kind: self.kind,
            status: PhaseStatus::NotStarted,
            start_date: self.window.0,
            end_date: self.window.1,
            deadline: self.deadline,
            budget_allocated: self.budget,
            order,
            dependencies: self.dependencies,
            checklist: Vec::new(),
            editable: true,
            skippable: self.skippable,
        }
    }
}

fn clamp(date: Date, low: Date, high: Date) -> Date {
    date.max(low).min(high)
}

/// Slice of the preparation window between two percentages.
fn slice(window: &Window, from: u32, to: u32) -> Result<(Date, Date)> {
    let start = window.at_percent(from)?;
    let end = window.at_percent(to)?.max(start);
    Ok((start, end))
}

/// Distinct activities by case-insensitive name, in the order given.
fn distinct_activities(spec: &SpecificationState) -> Vec<&Activity> {
    let mut seen: Vec<String> = Vec::new();
    spec.activities
        .iter()
        .filter(|a| {
            let name = a.name.trim().to_lowercase();
            if name.is_empty() || seen.contains(&name) {
                false
            } else {
                seen.push(name);
                true
            }
        })
        .collect()
}

/// Splits `amount` by weight with floors; the remainder goes to the first.
fn split_weighted(amount: u64, weights: &[u64]) -> Vec<u64> {
    let total_weight: u64 = weights.iter().sum();
    if total_weight == 0 {
        return vec![0; weights.len()];
    }
    let mut shares: Vec<u64> = weights
        .iter()
        .map(|w| {
            let share = u128::from(amount) * u128::from(*w) / u128::from(total_weight);
            u64::try_from(share).unwrap_or(0)
        })
        .collect();
    let assigned: u64 = shares.iter().sum();
    if let Some(first) = shares.first_mut() {
        *first += amount - assigned;
    }
    shares
}

/// Generates the ordered phase list. Checklists are left empty.
pub fn generate(
    spec: &SpecificationState,
    timeline: &Timeline,
    budget: &BudgetAllocation,
    requirements: &Requirements,
) -> Result<Vec<PhaseTemplate>> {
    let preparation = &timeline.preparation;
    let exchange = &timeline.exchange;
    let start = exchange.start;
    let mut drafts: Vec<Draft> = Vec::new();

    drafts.push(
        Draft::new(
            APPLICATION,
            "Grant Application Preparation",
            PhaseKind::Application,
            slice(preparation, 0, 25)?,
        )
        .budget(budget.amount(BudgetCategory::Application)),
    );

    // Permits, visas first
    let required: Vec<_> = PERMIT_PHASES
        .iter()
        .filter(|(permit, ..)| match permit {
            PermitType::Visa => requirements.visas.required,
            other => requirements.permit(*other).is_some(),
        })
        .collect();
    let weights: Vec<u64> = required.iter().map(|p| p.5).collect();
    let permit_budgets = split_weighted(budget.amount(BudgetCategory::Permits), &weights);
    for ((permit, key, name, from, to, _), amount) in required.iter().zip(permit_budgets) {
        let mut draft = Draft::new(
            key,
            *name,
            PhaseKind::Permit { permit: *permit },
            slice(preparation, *from, *to)?,
        )
        .budget(amount);
        draft = match permit {
            PermitType::Visa => match requirements.visas.deadline {
                Some(deadline) => draft.deadline(deadline),
                None => draft,
            },
            _ => draft,
        };
        draft = match permit {
            PermitType::FoodHandling => draft.after(&[ACCOMMODATION]).skippable(),
            _ => draft.after(&[APPLICATION]),
        };
        drafts.push(draft);
    }
    let has_visa_phase = requirements.visas.required;

    let insurance_name = if requirements.insurance.is_group() {
        "Group Travel Insurance"
    } else {
        "Individual Travel Insurance"
    };
    drafts.push(
        Draft::new(
            INSURANCE,
            insurance_name,
            PhaseKind::Insurance {
                group: requirements.insurance.is_group(),
            },
            slice(preparation, 50, 67)?,
        )
        .budget(budget.amount(BudgetCategory::Insurance))
        .after(&[APPLICATION]),
    );

    drafts.push(
        Draft::new(
            ACCOMMODATION,
            "Accommodation Booking",
            PhaseKind::Accommodation,
            slice(preparation, 50, 83)?,
        )
        .deadline(add_days(start, -28)?)
        .budget(budget.amount(BudgetCategory::Accommodation))
        .after(&[APPLICATION]),
    );

    let travel = budget.amount(BudgetCategory::Travel);
    let outbound_budget = travel - travel / 2;
    let mut outbound = Draft::new(
        TRAVEL_OUTBOUND,
        "Outbound Travel Arrangements",
        PhaseKind::Travel {
            direction: TravelDirection::Outbound,
        },
        (preparation.at_percent(67)?, preparation.end),
    )
    .deadline(add_days(start, -14)?)
    .budget(outbound_budget)
    .after(&[INSURANCE, ACCOMMODATION]);
    if has_visa_phase {
        outbound = outbound.after(&["permit-visa"]);
    }
    drafts.push(outbound);

    drafts.push(
        Draft::new(
            FOOD,
            "Catering and Meals",
            PhaseKind::Food,
            (preparation.at_percent(83)?, exchange.end),
        )
        .deadline(add_days(start, -7)?)
        .budget(budget.amount(BudgetCategory::Food))
        .after(&[ACCOMMODATION]),
    );

    // One phase per distinct activity, spread across the exchange
    let activities = distinct_activities(spec);
    let activity_total = budget.amount(BudgetCategory::Activities);
    let mut activity_keys: Vec<String> = Vec::new();
    if activities.is_empty() {
        activity_keys.push("activity-programme".to_string());
        drafts.push(
            Draft::new(
                "activity-programme",
                "Programme Activities",
                PhaseKind::Activity {
                    activity_type: ActivityType::Other,
                },
                (exchange.start, exchange.end),
            )
            .budget(activity_total)
            .after(&[TRAVEL_OUTBOUND])
            .skippable(),
        );
    } else {
        let count = activities.len() as u64;
        let per_activity = activity_total / count;
        let days = u64::from(exchange.days);
        for (i, activity) in activities.iter().enumerate() {
            let i = i as u64;
            let last = i + 1 == count;
            let offset = i64::try_from(i * days / count).unwrap_or(0);
            let first_day = add_days(exchange.start, offset)?.min(exchange.end);
            let span = activity.duration_hours.map_or(1, |h| h.div_ceil(8).max(1));
            let last_day = if last {
                exchange.end
            } else {
                add_days(first_day, i64::from(span) - 1)?.min(exchange.end)
            };
            let amount = if last {
                activity_total - per_activity * (count - 1)
            } else {
                per_activity
            };

            let key = format!("activity-{}", i + 1);
            activity_keys.push(key.clone());
            drafts.push(
                Draft::new(
                    &key,
                    activity.name.trim(),
                    PhaseKind::Activity {
                        activity_type: activity.activity_type,
                    },
                    (first_day, last_day),
                )
                .budget(amount)
                .after(&[TRAVEL_OUTBOUND])
                .skippable(),
            );
        }
    }

    let activity_refs: Vec<&str> = activity_keys.iter().map(String::as_str).collect();
    drafts.push(
        Draft::new(
            TRAVEL_RETURN,
            "Return Travel Arrangements",
            PhaseKind::Travel {
                direction: TravelDirection::Return,
            },
            (exchange.end, add_days(exchange.end, 1)?),
        )
        .deadline(exchange.end)
        .budget(travel / 2)
        .after(&activity_refs),
    );

    drafts.push(
        Draft::new(
            REPORTING,
            "Final Report and Documentation",
            PhaseKind::Reporting,
            (timeline.follow_up.start, timeline.follow_up.end),
        )
        .after(&[TRAVEL_RETURN]),
    );

    let phases: Vec<PhaseTemplate> = drafts
        .into_iter()
        .zip(1..)
        .map(|(draft, order)| draft.into_template(order))
        .collect();

    debug_assert_eq!(
        phases.iter().map(|p| p.budget_allocated).sum::<u64>() + reserve(budget, &phases),
        budget.total
    );
    Ok(phases)
}

/// Budget left unassigned: staffing, contingency, and the permit share when
/// no permit phase exists.
pub fn reserve(budget: &BudgetAllocation, phases: &[PhaseTemplate]) -> u64 {
    let has_permits = phases
        .iter()
        .any(|p| matches!(p.kind, PhaseKind::Permit { .. }));
    let mut reserve =
        budget.amount(BudgetCategory::Staffing) + budget.amount(BudgetCategory::Contingency);
    if !has_permits {
        reserve += budget.amount(BudgetCategory::Permits);
    }
    reserve
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use jiff::civil::date;

    use super::*;
    use crate::{
        config::PlanningConfig,
        countries::StaticCountries,
        models::{BudgetFigure, Destination, PhaseType},
        synthesis::{budget, requirements, timeline},
    };

    fn spec() -> SpecificationState {
        SpecificationState {
            participant_count: Some(24),
            duration_days: Some(8),
            budget: Some(BudgetFigure::from_total(12_000, 24)),
            destination: Some(Destination {
                country: "PT".to_string(),
                city: "Porto".to_string(),
                ..Default::default()
            }),
            participant_countries: vec!["ES".to_string(), "UA".to_string()],
            start_date: Some(date(2026, 9, 7)),
            ..Default::default()
        }
    }

    fn activity(name: &str, activity_type: ActivityType, hours: Option<u32>) -> Activity {
        Activity {
            name: name.to_string(),
            activity_type,
            duration_hours: hours,
            requires_facilitator: false,
            is_outdoor: false,
        }
    }

    fn phases_for(spec: &SpecificationState) -> (Vec<PhaseTemplate>, BudgetAllocation, Timeline) {
        let config = PlanningConfig::default();
        let today = date(2026, 1, 1);
        let mut spec = spec.clone();
        crate::elaboration::recompute_visas(&mut spec, &config, &StaticCountries);
        let timeline = timeline::generate(&spec, &config, today).unwrap();
        let allocation = budget::allocate(
            spec.budget.unwrap().total,
            &budget::BudgetSignals::from_spec(&spec, &StaticCountries),
        );
        let requirements =
            requirements::analyze(&spec, &config, &StaticCountries, today).unwrap();
        (
            generate(&spec, &timeline, &allocation, &requirements).unwrap(),
            allocation,
            timeline,
        )
    }

    #[test]
    fn test_core_phases_in_order() {
        let (phases, _, _) = phases_for(&spec());
        let keys: Vec<&str> = phases.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(
            keys,
            [
                "application",
                "permit-visa",
                "insurance",
                "accommodation",
                "travel-outbound",
                "food",
                "activity-programme",
                "travel-return",
                "reporting"
            ]
        );
        let orders: Vec<u32> = phases.iter().map(|p| p.order).collect();
        assert_eq!(orders, (1..=9).collect::<Vec<u32>>());
    }

    #[test]
    fn test_phase_budgets_plus_reserve_equal_total() {
        let mut s = spec();
        s.activities = vec![
            activity("Storytelling", ActivityType::Workshop, Some(3)),
            activity("Harbour tour", ActivityType::CulturalVisit, None),
            activity("Cooking night", ActivityType::CookingWorkshop, Some(4)),
        ];
        let (phases, allocation, _) = phases_for(&s);
        let assigned: u64 = phases.iter().map(|p| p.budget_allocated).sum();
        assert_eq!(assigned + reserve(&allocation, &phases), 12_000);
    }

    #[test]
    fn test_windows_follow_timeline() {
        let (phases, _, timeline) = phases_for(&spec());
        for phase in &phases {
            assert!(phase.start_date <= phase.end_date, "{}", phase.key);
            if let Some(deadline) = phase.deadline {
                assert!(phase.start_date <= deadline && deadline <= phase.end_date);
            }
        }
        let outbound = phases.iter().find(|p| p.key == "travel-outbound").unwrap();
        assert_eq!(outbound.end_date, timeline.preparation.end);
        assert_eq!(outbound.deadline, Some(date(2026, 8, 24)));
        let reporting = phases.last().unwrap();
        assert_eq!(reporting.start_date, timeline.follow_up.start);
    }

    #[test]
    fn test_one_phase_per_distinct_activity() {
        let mut s = spec();
        s.activities = vec![
            activity("Storytelling", ActivityType::Workshop, Some(16)),
            activity("storytelling ", ActivityType::Workshop, None),
            activity("Harbour tour", ActivityType::CulturalVisit, None),
        ];
        let (phases, _, timeline) = phases_for(&s);
        let activities: Vec<&PhaseTemplate> = phases
            .iter()
            .filter(|p| p.phase_type() == PhaseType::Activities)
            .collect();
        assert_eq!(activities.len(), 2);
        assert_eq!(activities[0].start_date, timeline.exchange.start);
        // 16 hours span two days
        assert_eq!(activities[0].end_date, date(2026, 9, 8));
        assert_eq!(activities[1].start_date, date(2026, 9, 11));
        assert_eq!(activities[1].end_date, timeline.exchange.end);

        let ret = phases.iter().find(|p| p.key == "travel-return").unwrap();
        assert_eq!(ret.dependencies, ["activity-1", "activity-2"]);
    }

    #[test]
    fn test_dependencies_reference_existing_phases() {
        let mut s = spec();
        s.is_public_event = Some(true);
        s.activities = vec![activity("Cooking", ActivityType::CookingWorkshop, None)];
        let (phases, _, _) = phases_for(&s);
        let keys: HashSet<&str> = phases.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys.len(), phases.len());
        for phase in &phases {
            for dependency in &phase.dependencies {
                assert!(keys.contains(dependency.as_str()), "{dependency}");
            }
        }
        let outbound = phases.iter().find(|p| p.key == "travel-outbound").unwrap();
        assert!(outbound.dependencies.contains(&"permit-visa".to_string()));
    }

    #[test]
    fn test_split_weighted_keeps_every_euro() {
        assert_eq!(split_weighted(100, &[5, 3, 2]), [50, 30, 20]);
        assert_eq!(split_weighted(7, &[1, 1]), [4, 3]);
        assert!(split_weighted(10, &[]).is_empty());
    }
}
