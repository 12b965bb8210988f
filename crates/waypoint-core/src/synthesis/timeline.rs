//! Preparation, exchange and follow-up windows.

use jiff::{civil::Date, Span};
use serde::{Deserialize, Serialize};

use crate::{
    config::PlanningConfig,
    error::{PlannerError, Result},
    models::SpecificationState,
};

/// An inclusive run of whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub start: Date,
    pub end: Date,
    pub days: u32,
}

impl Window {
    /// Window of `days` days starting on `start`.
    pub fn starting(start: Date, days: u32) -> Result<Self> {
        if days == 0 {
            return Err(PlannerError::invalid_input(
                "window",
                "a window must span at least one day",
            ));
        }
        Ok(Self {
            start,
            end: add_days(start, i64::from(days) - 1)?,
            days,
        })
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// The date `percent` of the way through the window, rounded down.
    pub fn at_percent(&self, percent: u32) -> Result<Date> {
        let offset = u64::from(self.days) * u64::from(percent.min(100)) / 100;
        let offset = i64::try_from(offset).unwrap_or(i64::MAX).min(i64::from(self.days) - 1);
        add_days(self.start, offset.max(0))
    }
}

/// The three consecutive windows of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub preparation: Window,
    pub exchange: Window,
    pub follow_up: Window,
    pub preparation_weeks: u32,
}

pub(crate) fn add_days(date: Date, days: i64) -> Result<Date> {
    Ok(date.checked_add(Span::new().try_days(days)?)?)
}

/// First day of the exchange: the stated start date, else today plus the
/// configured horizon.
pub fn exchange_start(
    spec: &SpecificationState,
    config: &PlanningConfig,
    today: Date,
) -> Result<Date> {
    match spec.start_date {
        Some(date) => Ok(date),
        None => add_days(today, i64::from(config.start_horizon_days)),
    }
}

/// Preparation length in weeks: six by default, longer for bigger groups,
/// bigger budgets and anything needing permits or visas.
pub fn preparation_weeks(spec: &SpecificationState, config: &PlanningConfig) -> u32 {
    let participants = spec.participant_count.unwrap_or(0);
    let total_budget = spec.budget.map_or(0, |b| b.total);

    let mut weeks = 6;
    if participants >= 30 {
        weeks += 2;
    }
    if participants >= 50 {
        weeks += 2;
    }
    if total_budget >= 30_000 {
        weeks += 2;
    }
    if spec.needs_visa() || spec.is_public_event == Some(true) || spec.workshop_count() >= 3 {
        weeks += 2;
    }

    let min = config.min_preparation_weeks;
    let max = config.max_preparation_weeks.max(min);
    weeks.clamp(min, max)
}

/// Builds the timeline for a specification.
pub fn generate(
    spec: &SpecificationState,
    config: &PlanningConfig,
    today: Date,
) -> Result<Timeline> {
    let duration = spec.duration_days.unwrap_or(0);
    if duration == 0 {
        return Err(PlannerError::invalid_input(
            "duration",
            "the exchange must last at least one day",
        ));
    }

    let start = exchange_start(spec, config, today)?;
    let weeks = preparation_weeks(spec, config);
    let preparation = Window::starting(add_days(start, -i64::from(weeks * 7))?, weeks * 7)?;
    let exchange = Window::starting(start, duration)?;
    let follow_up = Window::starting(add_days(exchange.end, 1)?, config.follow_up_days.max(1))?;

    debug_assert!(preparation.end < exchange.start);
    debug_assert!(exchange.end < follow_up.start);

    Ok(Timeline {
        preparation,
        exchange,
        follow_up,
        preparation_weeks: weeks,
    })
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::models::{BudgetFigure, VisaRequirement};

    fn spec(participants: u32, days: u32, total: u64) -> SpecificationState {
        SpecificationState {
            participant_count: Some(participants),
            duration_days: Some(days),
            budget: Some(BudgetFigure::from_total(total, participants)),
            ..Default::default()
        }
    }

    #[test]
    fn test_windows_are_contiguous() {
        let config = PlanningConfig::default();
        let timeline = generate(&spec(20, 5, 10_000), &config, date(2026, 1, 1)).unwrap();

        assert_eq!(timeline.preparation_weeks, 6);
        assert_eq!(timeline.exchange.start, date(2026, 5, 1));
        assert_eq!(timeline.exchange.end, date(2026, 5, 5));
        assert_eq!(timeline.exchange.days, 5);
        assert_eq!(timeline.preparation.days, 42);
        assert_eq!(timeline.preparation.end, date(2026, 4, 30));
        assert_eq!(timeline.follow_up.start, date(2026, 5, 6));
        assert_eq!(timeline.follow_up.days, 30);
    }

    #[test]
    fn test_large_expensive_exchange_prepares_longer() {
        let config = PlanningConfig::default();
        assert_eq!(preparation_weeks(&spec(60, 14, 50_000), &config), 12);
        assert_eq!(preparation_weeks(&spec(35, 7, 12_000), &config), 8);

        let mut visa = spec(20, 7, 9_000);
        visa.requirements.visas.push(VisaRequirement {
            country: "UA".to_string(),
            needed: true,
            estimated_cost: 80,
        });
        assert_eq!(preparation_weeks(&visa, &config), 8);
    }

    #[test]
    fn test_explicit_start_date_is_kept() {
        let mut s = spec(20, 7, 9_000);
        s.start_date = Some(date(2027, 7, 12));
        let timeline = generate(&s, &PlanningConfig::default(), date(2026, 1, 1)).unwrap();
        assert_eq!(timeline.exchange.start, date(2027, 7, 12));
        assert_eq!(timeline.exchange.end, date(2027, 7, 18));
    }

    #[test]
    fn test_zero_duration_is_rejected() {
        let s = spec(20, 0, 9_000);
        assert!(generate(&s, &PlanningConfig::default(), date(2026, 1, 1)).is_err());
    }

    #[test]
    fn test_window_percentages() {
        let w = Window::starting(date(2026, 3, 1), 10).unwrap();
        assert_eq!(w.at_percent(0).unwrap(), date(2026, 3, 1));
        assert_eq!(w.at_percent(50).unwrap(), date(2026, 3, 6));
        assert_eq!(w.at_percent(100).unwrap(), date(2026, 3, 10));
        assert!(w.contains(date(2026, 3, 10)));
        assert!(!w.contains(date(2026, 3, 11)));
    }
}
