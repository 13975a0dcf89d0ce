// tests/common/mod.rs

use std::sync::Arc;

use exam_simulator::{
    config::Config,
    models::question::NewQuestion,
    routes,
    state::AppState,
    storage::{MemStorage, Storage},
};

#[allow(dead_code)]
pub struct TestApp {
    pub address: String,
    pub store: Arc<MemStorage>,
}

/// Spawns the app on a random port, backed by an in-memory store.
pub async fn spawn_app() -> TestApp {
    let store = Arc::new(MemStorage::new());

    let config = Config {
        rust_log: "error".to_string(),
        ..Config::default()
    };

    let state = AppState {
        store: store.clone(),
        config,
    };

    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp { address, store }
}

/// Inserts `n` four-option questions; question i has correct answer `i % 4`.
#[allow(dead_code)]
pub async fn seed_questions(store: &MemStorage, n: usize) {
    for i in 0..n {
        store
            .create_question(NewQuestion {
                source: Some("Test bank".to_string()),
                text: format!("Question {}", i),
                options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
                correct_answer: (i % 4) as i32,
                rationale: Some(format!("Because {}", i % 4)),
            })
            .await
            .expect("Failed to seed question");
    }
}
