#![allow(dead_code)]

use jiff::civil::{date, Date};
use tempfile::TempDir;
use waypoint_core::{
    models::{BudgetFigure, Destination, SpecificationState},
    Planner, PlannerBuilder,
};

/// Fixed "today" so timelines are reproducible.
pub fn today() -> Date {
    date(2026, 1, 1)
}

/// Helper function to create a test planner
pub async fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_today(today())
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

/// A specification with every required field answered.
pub fn spec(
    participants: u32,
    days: u32,
    total: u64,
    destination: (&str, &str),
    origins: &[&str],
) -> SpecificationState {
    SpecificationState {
        participant_count: Some(participants),
        duration_days: Some(days),
        budget: Some(BudgetFigure::from_total(total, participants)),
        destination: Some(Destination {
            city: destination.0.to_string(),
            country: destination.1.to_string(),
            ..Default::default()
        }),
        participant_countries: origins.iter().map(|c| (*c).to_string()).collect(),
        ..Default::default()
    }
}
