//! Tests for the planner module.

use jiff::civil::date;
use tempfile::TempDir;

use super::*;
use crate::params::{CreateSeed, Id, ListProjects, SubmitAnswer};

const ANSWERS: [&str; 10] = [
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

/// Helper function to create a test planner
async fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_today(date(2026, 3, 1))
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

async fn create_seed(planner: &Planner) -> u64 {
    planner
        .create_seed(&CreateSeed {
            title: "Voices of the Coast".to_string(),
            description: Some("Inclusion through storytelling".to_string()),
            ..Default::default()
        })
        .await
        .expect("Failed to create seed")
        .id
}

async fn answer(planner: &Planner, seed_id: u64, text: &str) -> crate::elaboration::ElaborationTurn {
    planner
        .submit_answer(&SubmitAnswer {
            seed_id,
            session_id: None,
            answer: text.to_string(),
        })
        .await
        .expect("Failed to submit answer")
}

#[tokio::test]
async fn test_create_and_list_seeds() {
    let (_temp_dir, planner) = create_test_planner().await;

    let first = create_seed(&planner).await;
    let second = planner
        .create_seed(&CreateSeed {
            title: "  Digital bridges ".to_string(),
            estimated_participants: Some(30),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(second.title, "Digital bridges");

    let seeds = planner.list_seeds().await.unwrap();
    assert_eq!(seeds.len(), 2);
    let fetched = planner.get_seed(&Id { id: first }).await.unwrap().unwrap();
    assert_eq!(fetched.title, "Voices of the Coast");
    assert!(planner.get_seed(&Id { id: 999 }).await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_seed_rejects_blank_title() {
    let (_temp_dir, planner) = create_test_planner().await;
    let result = planner
        .create_seed(&CreateSeed {
            title: "   ".to_string(),
            ..Default::default()
        })
        .await;
    assert!(matches!(result, Err(PlannerError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_answer_without_session_is_an_error() {
    let (_temp_dir, planner) = create_test_planner().await;
    let seed_id = create_seed(&planner).await;

    let result = planner
        .submit_answer(&SubmitAnswer {
            seed_id,
            session_id: None,
            answer: "30".to_string(),
        })
        .await;
    assert!(matches!(result, Err(PlannerError::NoSession { .. })));

    let result = planner.start_elaboration(&Id { id: 404 }).await;
    assert!(matches!(result, Err(PlannerError::SeedNotFound { id: 404 })));
}

#[tokio::test]
async fn test_idle_session_locks_are_pruned() {
    let (_temp_dir, planner) = create_test_planner().await;

    drop(planner.session_lock(1).await);
    let held = planner.session_lock(2).await;
    assert_eq!(planner.session_locks.lock().await.len(), 1);

    drop(planner.session_lock(3).await);
    {
        let locks = planner.session_locks.lock().await;
        assert!(locks.contains_key(&2));
        assert!(locks.contains_key(&3));
    }
    assert!(Arc::ptr_eq(&held, &planner.session_lock(2).await));
}

#[tokio::test]
async fn test_session_survives_restart() {
    let (_temp_dir, planner) = create_test_planner().await;
    let seed_id = create_seed(&planner).await;

    let started = planner.start_elaboration(&Id { id: seed_id }).await.unwrap();
    let session_id = started.session.session_id().unwrap().to_string();
    answer(&planner, seed_id, "30 participants").await;

    let resumed = planner.start_elaboration(&Id { id: seed_id }).await.unwrap();
    assert_eq!(resumed.session.session_id(), Some(session_id.as_str()));
    assert_eq!(resumed.session.state.participant_count, Some(30));
    assert_eq!(resumed.session.state.cursor, 1);

    let progress = planner
        .elaboration_progress(&Id { id: seed_id })
        .await
        .unwrap();
    // 0.20 of a total weight of 1.15
    assert_eq!(progress.completeness, 17);
    assert!(!progress.complete);
    assert!(progress.missing_fields.contains(&"budget".to_string()));
}

#[tokio::test]
async fn test_oversized_answers_do_not_end_the_session() {
    let (_temp_dir, planner) = create_test_planner().await;
    let seed_id = create_seed(&planner).await;
    planner.start_elaboration(&Id { id: seed_id }).await.unwrap();

    answer(&planner, seed_id, "30 participants").await;
    let turn = answer(&planner, seed_id, "99999999999999999999 per person").await;
    assert!(!turn.understood);
    assert!(turn.session.state.budget.is_none());

    let turn = answer(&planner, seed_id, "999999999 weeks").await;
    assert!(!turn.understood);
    assert_eq!(turn.session.state.duration_days, None);

    let progress = planner
        .elaboration_progress(&Id { id: seed_id })
        .await
        .unwrap();
    assert_eq!(progress.state.participant_count, Some(30));
    assert!(progress.missing_fields.contains(&"budget".to_string()));
    assert!(progress.missing_fields.contains(&"duration".to_string()));
}

#[tokio::test]
async fn test_stale_session_id_is_rejected() {
    let (_temp_dir, planner) = create_test_planner().await;
    let seed_id = create_seed(&planner).await;
    planner.start_elaboration(&Id { id: seed_id }).await.unwrap();

    let result = planner
        .submit_answer(&SubmitAnswer {
            seed_id,
            session_id: Some("an-old-session".to_string()),
            answer: "30".to_string(),
        })
        .await;
    assert!(matches!(result, Err(PlannerError::SessionMismatch { .. })));

    // Nothing was stored for the rejected answer
    let progress = planner
        .elaboration_progress(&Id { id: seed_id })
        .await
        .unwrap();
    assert_eq!(progress.completeness, 0);
}

#[tokio::test]
async fn test_convert_incomplete_specification_stores_nothing() {
    let (_temp_dir, planner) = create_test_planner().await;
    let seed_id = create_seed(&planner).await;
    planner.start_elaboration(&Id { id: seed_id }).await.unwrap();
    answer(&planner, seed_id, "30 participants").await;

    let result = planner.convert_seed(&Id { id: seed_id }).await;
    match result {
        Err(PlannerError::IncompleteSpecification { missing }) => {
            assert!(missing.contains(&"destination".to_string()));
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("conversion should have failed"),
    }
    assert!(planner
        .list_projects(&ListProjects::default())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_full_elaboration_converts_to_project() {
    let (_temp_dir, planner) = create_test_planner().await;
    let seed_id = create_seed(&planner).await;
    planner.start_elaboration(&Id { id: seed_id }).await.unwrap();

    let mut last = None;
    for text in ANSWERS {
        last = Some(answer(&planner, seed_id, text).await);
    }
    assert!(last.unwrap().complete);

    let result = planner.convert_seed(&Id { id: seed_id }).await.unwrap();
    let project = &result.project;
    assert_eq!(project.name, "Voices of the Coast");
    assert_eq!(project.total_budget, 9_600);
    assert_eq!(project.start_date, date(2026, 9, 14));
    assert_eq!(project.end_date, date(2026, 9, 21));
    assert!(result.requirements().visas.required);

    let allocated: u64 = project.phases.iter().map(|p| p.template.budget_allocated).sum();
    assert_eq!(allocated + project.unassigned_budget(), project.total_budget);

    let stored = planner
        .get_project(&Id { id: project.id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(&stored, project);

    let listed = planner
        .list_projects(&ListProjects {
            seed_id: Some(seed_id),
        })
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].phase_count as usize, project.phases.len());

    let other_seed = planner
        .list_projects(&ListProjects {
            seed_id: Some(seed_id + 1),
        })
        .await
        .unwrap();
    assert!(other_seed.is_empty());
}
