mod common;

use std::sync::Arc;

use jiff::Timestamp;
use tempfile::NamedTempFile;
use waypoint_core::{
    models::{ElaborationSession, NewProject, ProjectMetadata, Role, TranscriptMessage},
    synthesis::synthesize,
    Database, PlannerError, PlanningConfig, StaticCountries,
};

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

async fn new_project(seed_id: u64) -> NewProject {
    let spec = common::spec(20, 5, 10_000, ("Leipzig", "DE"), &["FR", "PL"]);
    let output = synthesize(
        &spec,
        &PlanningConfig::default(),
        Arc::new(StaticCountries),
        common::today(),
    )
    .await
    .expect("Failed to synthesize");

    NewProject {
        seed_id,
        name: "Leipzig exchange".to_string(),
        participant_count: 20,
        total_budget: output.budget.total,
        start_date: output.timeline.exchange.start,
        end_date: output.timeline.exchange.end,
        metadata: ProjectMetadata {
            timeline: output.timeline,
            budget: output.budget,
            requirements: output.requirements,
        },
        phases: output.phases,
    }
}

#[test]
fn test_database_initialization() {
    let (temp_file, _db) = create_test_db();
    assert!(temp_file.path().exists());

    // Reopening applies the schema again without error
    Database::new(temp_file.path()).expect("Failed to reopen database");
}

#[test]
fn test_create_and_get_seed() {
    let (_temp_file, db) = create_test_db();

    let seed = db
        .create_seed("Green futures", Some("Climate action"), Some(24), None)
        .expect("Failed to create seed");
    assert!(seed.id > 0);

    let fetched = db.get_seed(seed.id).unwrap().expect("Seed should exist");
    assert_eq!(fetched, seed);
    assert!(db.get_seed(seed.id + 1).unwrap().is_none());

    db.create_seed("Second", None, None, Some(10)).unwrap();
    assert_eq!(db.list_seeds().unwrap().len(), 2);
}

#[test]
fn test_save_elaboration_upserts() {
    let (_temp_file, db) = create_test_db();
    let seed = db.create_seed("Green futures", None, None, None).unwrap();
    assert!(db.get_elaboration(seed.id).unwrap().is_none());

    let now = Timestamp::now();
    let mut session = ElaborationSession {
        seed_id: seed.id,
        state: Default::default(),
        transcript: vec![TranscriptMessage::new(Role::Assistant, "How many?")],
        created_at: now,
        updated_at: now,
    };
    session.state.session_id = Some("session-1".to_string());
    db.save_elaboration(&session).unwrap();

    session.state.participant_count = Some(30);
    session.state.completeness = 17;
    session
        .transcript
        .push(TranscriptMessage::new(Role::User, "30"));
    db.save_elaboration(&session).unwrap();

    let stored = db.get_elaboration(seed.id).unwrap().expect("Session stored");
    assert_eq!(stored, session);
}

#[test]
fn test_elaboration_requires_existing_seed() {
    let (_temp_file, db) = create_test_db();
    let now = Timestamp::now();
    let session = ElaborationSession {
        seed_id: 42,
        state: Default::default(),
        transcript: Vec::new(),
        created_at: now,
        updated_at: now,
    };
    assert!(matches!(
        db.save_elaboration(&session),
        Err(PlannerError::Database { .. })
    ));
}

#[tokio::test]
async fn test_create_project_with_phases() {
    let (_temp_file, mut db) = create_test_db();
    let seed = db.create_seed("Leipzig", None, None, None).unwrap();
    let input = new_project(seed.id).await;

    let project = db.create_project_with_phases(&input).unwrap();
    assert_eq!(project.phases.len(), input.phases.len());
    assert!(project.phases.iter().all(|p| p.project_id == project.id));

    let stored = db.get_project(project.id).unwrap().expect("Project stored");
    assert_eq!(stored, project);

    let summaries = db.list_projects(None).unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].phase_count as usize, input.phases.len());
    assert!(db.list_projects(Some(seed.id + 1)).unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_phase_rolls_back_project() {
    let (_temp_file, mut db) = create_test_db();
    let seed = db.create_seed("Leipzig", None, None, None).unwrap();
    let mut input = new_project(seed.id).await;

    // The last phase reuses the first phase's key
    let duplicate_key = input.phases[0].key.clone();
    if let Some(last) = input.phases.last_mut() {
        last.key = duplicate_key;
    }

    let result = db.create_project_with_phases(&input);
    assert!(matches!(result, Err(PlannerError::Database { .. })));
    assert!(db.list_projects(None).unwrap().is_empty());
    assert!(db.get_project(1).unwrap().is_none());
    assert!(db.get_phases(1).unwrap().is_empty());
}

#[tokio::test]
async fn test_inverted_phase_dates_are_rejected() {
    let (_temp_file, mut db) = create_test_db();
    let seed = db.create_seed("Leipzig", None, None, None).unwrap();
    let mut input = new_project(seed.id).await;

    let phase = &mut input.phases[1];
    std::mem::swap(&mut phase.start_date, &mut phase.end_date);
    if phase.start_date == phase.end_date {
        phase.start_date = input.end_date;
    }

    assert!(db.create_project_with_phases(&input).is_err());
    assert!(db.list_projects(None).unwrap().is_empty());
}

#[tokio::test]
async fn test_project_requires_existing_seed() {
    let (_temp_file, mut db) = create_test_db();
    let input = new_project(99).await;
    assert!(db.create_project_with_phases(&input).is_err());
    assert!(db.list_projects(None).unwrap().is_empty());
}
