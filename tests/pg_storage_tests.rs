// tests/pg_storage_tests.rs
//
// Needs a running Postgres: DATABASE_URL=... cargo test -- --ignored

use exam_simulator::{
    models::{attempt::AttemptResult, question::NewQuestion},
    storage::{PgStorage, Storage, StoreError},
};
use sqlx::postgres::PgPoolOptions;

async fn storage() -> PgStorage {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .expect("Failed to connect to Postgres for testing. Make sure DATABASE_URL is set.");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    PgStorage::new(pool)
}

#[tokio::test]
#[ignore]
async fn question_round_trips_through_text_array() {
    let store = storage().await;

    let created = store
        .create_question(NewQuestion {
            source: Some("pg test".to_string()),
            text: "Which electrolyte causes peaked T waves?".to_string(),
            options: vec!["Hyperkalemia".into(), "Hypocalcemia".into()],
            correct_answer: 0,
            rationale: None,
        })
        .await
        .unwrap();

    let listed = store.list_questions().await.unwrap();
    let found = listed.iter().find(|q| q.id == created.id).unwrap();
    assert_eq!(found.options, vec!["Hyperkalemia", "Hypocalcemia"]);
    assert_eq!(found.correct_index(), Some(0));
}

#[tokio::test]
#[ignore]
async fn attempts_are_stamped_and_listed_newest_first() {
    let store = storage().await;
    let attempt = AttemptResult {
        score: 67,
        total_questions: 3,
        correct_count: 2,
        wrong_count: 1,
        time_spent_seconds: 90,
    };

    let first = store.create_attempt(attempt).await.unwrap();
    let second = store.create_attempt(attempt).await.unwrap();

    let listed = store.list_attempts().await.unwrap();
    let first_pos = listed.iter().position(|a| a.id == first.id).unwrap();
    let second_pos = listed.iter().position(|a| a.id == second.id).unwrap();
    assert!(second_pos < first_pos);
    assert!(second.completed_at >= first.completed_at);
}

#[tokio::test]
#[ignore]
async fn invalid_attempt_never_hits_the_table() {
    let store = storage().await;
    let err = store
        .create_attempt(AttemptResult {
            score: 101,
            total_questions: 1,
            correct_count: 1,
            wrong_count: 0,
            time_spent_seconds: 1,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Validation { .. }));
}
