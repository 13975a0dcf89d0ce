// tests/api_tests.rs

mod common;

use common::{seed_questions, spawn_app};
use exam_simulator::storage::Storage;

#[tokio::test]
async fn unknown_route_is_404() {
    // Arrange
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(&format!("{}/random_path_that_does_not_exist", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["message"].as_str().is_some());
}

#[tokio::test]
async fn health_check_works() {
    let app = spawn_app().await;

    let body: serde_json::Value = reqwest::get(&format!("{}/api/health", app.address))
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn list_questions_returns_bank_in_order() {
    // Arrange
    let app = spawn_app().await;
    seed_questions(&app.store, 3).await;

    // Act
    let response = reqwest::get(&format!("{}/api/questions", app.address))
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let questions: Vec<serde_json::Value> = response.json().await.unwrap();
    assert_eq!(questions.len(), 3);
    assert_eq!(questions[0]["id"], 1);
    assert_eq!(questions[2]["text"], "Question 2");
    assert_eq!(questions[1]["correctAnswer"], 1);
    assert_eq!(questions[1]["options"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn create_attempt_works() {
    // Arrange
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .post(&format!("{}/api/attempts", app.address))
        .json(&serde_json::json!({
            "score": 70,
            "totalQuestions": 10,
            "correctCount": 7,
            "wrongCount": 3,
            "timeSpentSeconds": 2700
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 201);
    let created: serde_json::Value = response.json().await.unwrap();
    assert_eq!(created["id"], 1);
    assert_eq!(created["score"], 70);
    assert!(created["completedAt"].as_str().is_some());
    assert_eq!(app.store.list_attempts().await.unwrap().len(), 1);
}

#[tokio::test]
async fn create_attempt_fails_validation_with_field() {
    // Arrange
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    // Act: 1 of 3 correct rounds to 33, not 34
    let response = client
        .post(&format!("{}/api/attempts", app.address))
        .json(&serde_json::json!({
            "score": 34,
            "totalQuestions": 3,
            "correctCount": 1,
            "wrongCount": 2,
            "timeSpentSeconds": 60
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["field"], "score");
    assert!(body["message"].as_str().unwrap().contains("33"));
    assert!(app.store.list_attempts().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_attempt_missing_field_is_400() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/api/attempts", app.address))
        .json(&serde_json::json!({
            "score": 100,
            "totalQuestions": 1,
            "correctCount": 1,
            "timeSpentSeconds": 5
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["field"], "wrongCount");
}

#[tokio::test]
async fn create_attempt_truncated_json_is_400_json() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/api/attempts", app.address))
        .header("content-type", "application/json")
        .body(r#"{"score": 100, "totalQuestions": 1,"#)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["message"].is_string());
    assert!(body.get("field").is_none());
    assert!(app.store.list_attempts().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_attempt_without_content_type_is_400_json() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/api/attempts", app.address))
        .body(
            r#"{"score": 100, "totalQuestions": 1, "correctCount": 1, "wrongCount": 0, "timeSpentSeconds": 5}"#,
        )
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("Content-Type"));
}

#[tokio::test]
async fn list_attempts_is_newest_first() {
    // Arrange
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    for (score, correct) in [(50, 1), (100, 2)] {
        let response = client
            .post(&format!("{}/api/attempts", app.address))
            .json(&serde_json::json!({
                "score": score,
                "totalQuestions": 2,
                "correctCount": correct,
                "wrongCount": 2 - correct,
                "timeSpentSeconds": 30
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status().as_u16(), 201);
    }

    // Act
    let attempts: Vec<serde_json::Value> = client
        .get(&format!("{}/api/attempts", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();

    // Assert
    assert_eq!(attempts.len(), 2);
    assert_eq!(attempts[0]["score"], 100);
    assert_eq!(attempts[1]["score"], 50);
}

#[tokio::test]
async fn store_outage_is_500_without_detail() {
    let app = spawn_app().await;
    app.store.set_available(false);

    let response = reqwest::get(&format!("{}/api/attempts", app.address))
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Internal Server Error");
}
