//! Budget allocation across fixed categories.
//!
//! A base split (in basis points) is adjusted by an ordered list of named
//! rules, each moving weight from some categories into one target category.
//! Amounts are then floored and the rounding remainder goes to contingency,
//! so the categories always add up to the total.

use serde::{Deserialize, Serialize};

use crate::{countries::CountryClassifier, models::SpecificationState};

const TOTAL_BASIS_POINTS: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetCategory {
    Travel,
    Accommodation,
    Food,
    Activities,
    Staffing,
    Insurance,
    Permits,
    Application,
    Contingency,
}

impl BudgetCategory {
    pub const ALL: [BudgetCategory; 9] = [
        BudgetCategory::Travel,
        BudgetCategory::Accommodation,
        BudgetCategory::Food,
        BudgetCategory::Activities,
        BudgetCategory::Staffing,
        BudgetCategory::Insurance,
        BudgetCategory::Permits,
        BudgetCategory::Application,
        BudgetCategory::Contingency,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetCategory::Travel => "travel",
            BudgetCategory::Accommodation => "accommodation",
            BudgetCategory::Food => "food",
            BudgetCategory::Activities => "activities",
            BudgetCategory::Staffing => "staffing",
            BudgetCategory::Insurance => "insurance",
            BudgetCategory::Permits => "permits",
            BudgetCategory::Application => "application",
            BudgetCategory::Contingency => "contingency",
        }
    }

    fn base_weight(self) -> u32 {
        match self {
            BudgetCategory::Travel => 3_000,
            BudgetCategory::Accommodation => 2_500,
            BudgetCategory::Food => 1_500,
            BudgetCategory::Activities => 1_500,
            BudgetCategory::Staffing => 800,
            BudgetCategory::Insurance => 300,
            BudgetCategory::Permits => 100,
            BudgetCategory::Application => 100,
            BudgetCategory::Contingency => 200,
        }
    }

    fn index(self) -> usize {
        BudgetCategory::ALL
            .iter()
            .position(|c| *c == self)
            .unwrap_or(BudgetCategory::ALL.len() - 1)
    }
}

/// One category's share of the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAllocation {
    pub category: BudgetCategory,
    /// Share in basis points (1/100 of a percent)
    pub share_bp: u32,
    pub amount: u64,
}

/// Category split of a total budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetAllocation {
    pub total: u64,
    pub categories: Vec<CategoryAllocation>,
    /// Names of the adjustment rules that fired, in order
    pub adjustments: Vec<String>,
}

impl BudgetAllocation {
    pub fn amount(&self, category: BudgetCategory) -> u64 {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map_or(0, |c| c.amount)
    }

    pub fn share_bp(&self, category: BudgetCategory) -> u32 {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map_or(0, |c| c.share_bp)
    }
}

/// Facts about the specification the adjustment rules look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BudgetSignals {
    pub destination_in_eu: bool,
    pub origin_outside_europe: bool,
    pub high_cost_city: bool,
    pub workshop_count: usize,
    pub participants: u32,
    pub duration_days: u32,
}

impl BudgetSignals {
    pub fn from_spec(spec: &SpecificationState, countries: &dyn CountryClassifier) -> Self {
        let destination = spec.destination.as_ref();
        Self {
            destination_in_eu: spec
                .destination_country()
                .is_some_and(|c| countries.is_eu_member(c)),
            origin_outside_europe: spec
                .participant_countries
                .iter()
                .any(|c| !countries.is_european(c)),
            high_cost_city: destination.is_some_and(|d| countries.is_high_cost_city(&d.city)),
            workshop_count: spec.workshop_count(),
            participants: spec.participant_count.unwrap_or(0),
            duration_days: spec.duration_days.unwrap_or(0),
        }
    }
}

/// A named weight transfer applied when its condition holds.
pub struct AdjustmentRule {
    pub name: &'static str,
    pub applies: fn(&BudgetSignals) -> bool,
    pub to: BudgetCategory,
    pub from: &'static [(BudgetCategory, u32)],
}

fn is_long_distance(s: &BudgetSignals) -> bool {
    !s.destination_in_eu || s.origin_outside_europe
}

fn is_workshop_heavy(s: &BudgetSignals) -> bool {
    s.workshop_count >= 3
}

fn is_high_cost(s: &BudgetSignals) -> bool {
    s.high_cost_city
}

fn is_large_group(s: &BudgetSignals) -> bool {
    s.participants >= 50
}

fn is_short_trip(s: &BudgetSignals) -> bool {
    s.duration_days > 0 && s.duration_days <= 3
}

/// Applied in order; each transfer is capped at what the source still holds.
pub static ADJUSTMENT_RULES: [AdjustmentRule; 5] = [
    AdjustmentRule {
        name: "long_distance_or_non_eu",
        applies: is_long_distance,
        to: BudgetCategory::Travel,
        from: &[
            (BudgetCategory::Accommodation, 500),
            (BudgetCategory::Food, 300),
            (BudgetCategory::Staffing, 400),
        ],
    },
    AdjustmentRule {
        name: "workshop_heavy",
        applies: is_workshop_heavy,
        to: BudgetCategory::Activities,
        from: &[
            (BudgetCategory::Accommodation, 400),
            (BudgetCategory::Food, 200),
        ],
    },
    AdjustmentRule {
        name: "high_cost_destination",
        applies: is_high_cost,
        to: BudgetCategory::Accommodation,
        from: &[
            (BudgetCategory::Food, 200),
            (BudgetCategory::Activities, 300),
        ],
    },
    AdjustmentRule {
        name: "large_group",
        applies: is_large_group,
        to: BudgetCategory::Contingency,
        from: &[
            (BudgetCategory::Activities, 100),
            (BudgetCategory::Accommodation, 200),
        ],
    },
    AdjustmentRule {
        name: "short_trip",
        applies: is_short_trip,
        to: BudgetCategory::Travel,
        from: &[(BudgetCategory::Food, 500)],
    },
];

/// Splits `total` across the categories for the given signals.
pub fn allocate(total: u64, signals: &BudgetSignals) -> BudgetAllocation {
    let mut weights: Vec<u32> = BudgetCategory::ALL.iter().map(|c| c.base_weight()).collect();
    let mut adjustments = Vec::new();

    for rule in &ADJUSTMENT_RULES {
        if !(rule.applies)(signals) {
            continue;
        }
        let mut moved = 0;
        for (source, bp) in rule.from {
            let slot = &mut weights[source.index()];
            let taken = (*bp).min(*slot);
            *slot -= taken;
            moved += taken;
        }
        weights[rule.to.index()] += moved;
        adjustments.push(rule.name.to_string());
    }
    debug_assert_eq!(weights.iter().sum::<u32>(), TOTAL_BASIS_POINTS);

    let mut categories: Vec<CategoryAllocation> = BudgetCategory::ALL
        .iter()
        .zip(&weights)
        .map(|(category, share_bp)| CategoryAllocation {
            category: *category,
            share_bp: *share_bp,
            amount: floor_share(total, *share_bp),
        })
        .collect();

    let assigned: u64 = categories.iter().map(|c| c.amount).sum();
    let remainder = total - assigned;
    if let Some(contingency) = categories
        .iter_mut()
        .find(|c| c.category == BudgetCategory::Contingency)
    {
        contingency.amount += remainder;
    }
    debug_assert_eq!(categories.iter().map(|c| c.amount).sum::<u64>(), total);

    BudgetAllocation {
        total,
        categories,
        adjustments,
    }
}

fn floor_share(total: u64, share_bp: u32) -> u64 {
    let amount = u128::from(total) * u128::from(share_bp) / u128::from(TOTAL_BASIS_POINTS);
    u64::try_from(amount).unwrap_or(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eu_signals() -> BudgetSignals {
        BudgetSignals {
            destination_in_eu: true,
            participants: 20,
            duration_days: 7,
            ..Default::default()
        }
    }

    fn sum(allocation: &BudgetAllocation) -> u64 {
        allocation.categories.iter().map(|c| c.amount).sum()
    }

    #[test]
    fn test_base_split_sums_to_total() {
        let allocation = allocate(10_000, &eu_signals());
        assert_eq!(sum(&allocation), 10_000);
        assert_eq!(allocation.amount(BudgetCategory::Travel), 3_000);
        assert_eq!(allocation.amount(BudgetCategory::Accommodation), 2_500);
        assert!(allocation.adjustments.is_empty());
    }

    #[test]
    fn test_remainder_goes_to_contingency() {
        for total in [0, 1, 7, 999, 10_001, 33_333, 123_457, u64::MAX / 3] {
            for signals in [
                eu_signals(),
                BudgetSignals::default(),
                BudgetSignals {
                    workshop_count: 4,
                    high_cost_city: true,
                    participants: 55,
                    duration_days: 2,
                    ..Default::default()
                },
            ] {
                let allocation = allocate(total, &signals);
                assert_eq!(sum(&allocation), total, "total {total}");
            }
        }
        let allocation = allocate(999, &eu_signals());
        // 999 * 2% floors to 19, plus the rounding remainder
        assert!(allocation.amount(BudgetCategory::Contingency) >= 19);
    }

    #[test]
    fn test_non_eu_destination_raises_travel_into_band() {
        let allocation = allocate(
            50_000,
            &BudgetSignals {
                destination_in_eu: false,
                participants: 20,
                duration_days: 10,
                ..Default::default()
            },
        );
        let travel = allocation.share_bp(BudgetCategory::Travel);
        assert!((4_000..=6_000).contains(&travel), "travel share {travel}");
        assert_eq!(allocation.adjustments, ["long_distance_or_non_eu"]);
    }

    #[test]
    fn test_workshop_heavy_raises_activities_into_band() {
        let allocation = allocate(
            20_000,
            &BudgetSignals {
                workshop_count: 3,
                ..eu_signals()
            },
        );
        let activities = allocation.share_bp(BudgetCategory::Activities);
        assert!((1_500..=2_500).contains(&activities));
        assert!(activities > BudgetCategory::Activities.base_weight());
    }

    #[test]
    fn test_short_trip_reduces_food() {
        let short = allocate(10_000, &BudgetSignals { duration_days: 3, ..eu_signals() });
        let long = allocate(10_000, &eu_signals());
        assert!(short.amount(BudgetCategory::Food) < long.amount(BudgetCategory::Food));
    }
}
