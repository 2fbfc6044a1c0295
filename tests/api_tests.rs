// tests/api_tests.rs

use quiz_board::{
    config::Config,
    quiz::Catalog,
    routes,
    state::AppState,
    store::{ResultStore, SqliteResultStore},
};
use serde_json::{Value, json};
use std::sync::Arc;

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    spawn_app_with_ttl(3600).await
}

async fn spawn_app_with_ttl(session_ttl_secs: u64) -> String {
    // 1. Open a private in-memory database
    let store = SqliteResultStore::connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    // 2. Create the schema
    store.initialize().await.expect("Failed to create schema");

    // 3. Create test configuration and state
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        rust_log: "error".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        log_dir: "logs".to_string(),
        cors_origins: vec!["http://localhost:3000".to_string()],
        session_ttl_secs,
    };

    let state = AppState::new(Arc::new(store), Catalog::builtin(), config);

    // 4. Create the router with the app state
    let app = routes::create_router(state);

    // 5. Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // 6. Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

async fn new_session(client: &reqwest::Client, address: &str) -> String {
    let resp = client
        .post(&format!("{}/api/sessions", address))
        .send()
        .await
        .expect("Failed to create session");
    assert_eq!(resp.status().as_u16(), 201);

    let body: Value = resp.json().await.unwrap();
    body["session_id"].as_str().unwrap().to_string()
}

fn all_correct() -> Value {
    json!({
        "0": "Paris",
        "1": "Mars",
        "2": "Blue Whale",
        "3": "William Shakespeare",
        "4": "3.14"
    })
}

#[tokio::test]
async fn unknown_path_is_404() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(&format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn questions_are_listed_without_answers() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let questions: Vec<Value> = client
        .get(&format!("{}/api/quiz/questions", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(questions.len(), 5);
    assert_eq!(questions[0]["text"], "What is the capital of France?");
    assert_eq!(questions[0]["options"].as_array().unwrap().len(), 4);
    assert!(questions.iter().all(|q| q.get("answer").is_none()));
}

#[tokio::test]
async fn empty_leaderboard_invites_players() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let board: Value = client
        .get(&format!("{}/api/leaderboard", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(board["entries"].as_array().unwrap().len(), 0);
    assert_eq!(board["message"], "No results yet. Be the first!");
}

#[tokio::test]
async fn full_quiz_flow() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let id = new_session(&client, &address).await;

    // 1. Blank name is rejected and the session stays put
    let resp = client
        .post(&format!("{}/api/sessions/{}/start", address, id))
        .json(&json!({ "name": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Please enter your name to start the quiz.");

    // 2. Start with a name
    let view: Value = client
        .post(&format!("{}/api/sessions/{}/start", address, id))
        .json(&json!({ "name": "Alice" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view["state"], "in_progress");
    assert_eq!(view["greeting"], "Good luck, Alice!");

    // 3. Partial submission is rejected
    let resp = client
        .post(&format!("{}/api/sessions/{}/submit", address, id))
        .json(&json!({ "answers": { "0": "Paris" } }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);

    let view: Value = client
        .get(&format!("{}/api/sessions/{}", address, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view["state"], "in_progress");

    // 4. Full submission is graded and saved
    let resp = client
        .post(&format!("{}/api/sessions/{}/submit", address, id))
        .json(&json!({ "answers": all_correct() }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let view: Value = resp.json().await.unwrap();
    assert_eq!(view["state"], "submitted");
    assert_eq!(view["result_saved"], true);
    assert_eq!(view["result"]["score"], 5);
    assert_eq!(view["result"]["total"], 5);
    assert_eq!(
        view["result"]["message"],
        "Quiz Submitted! Your final score is: 5/5"
    );
    assert_eq!(view["result"]["review"].as_array().unwrap().len(), 5);

    // 5. Re-rendering and re-submitting do not write again
    for _ in 0..3 {
        let resp = client
            .get(&format!("{}/api/sessions/{}", address, id))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 200);
    }
    let resp = client
        .post(&format!("{}/api/sessions/{}/submit", address, id))
        .json(&json!({ "answers": all_correct() }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 409);

    let board: Value = client
        .get(&format!("{}/api/leaderboard", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let entries = board["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["name"], "Alice");
    assert_eq!(entries[0]["score"], 5);
    assert_eq!(entries[0]["total_questions"], 5);
    assert!(board.get("message").is_none());

    // 6. Restart clears the session
    let view: Value = client
        .post(&format!("{}/api/sessions/{}/restart", address, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view["state"], "not_started");
    assert_eq!(view["result_saved"], false);
    assert_eq!(view["answers"], json!({}));
    assert!(view.get("user_name").is_none());
}

#[tokio::test]
async fn review_shows_the_correct_answer() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let id = new_session(&client, &address).await;

    client
        .post(&format!("{}/api/sessions/{}/start", address, id))
        .json(&json!({ "name": "Bob" }))
        .send()
        .await
        .unwrap();

    let mut answers = all_correct();
    answers["0"] = json!("Rome");

    let view: Value = client
        .post(&format!("{}/api/sessions/{}/submit", address, id))
        .json(&json!({ "answers": answers }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(view["result"]["score"], 4);
    let first = &view["result"]["review"][0];
    assert_eq!(first["is_correct"], false);
    assert_eq!(first["user_answer"], "Rome");
    assert_eq!(first["correct_answer"], "Paris");
}

#[tokio::test]
async fn leaderboard_ranks_independent_sessions() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    for (name, wrong) in [("Low", 3), ("High", 0), ("Mid", 1)] {
        let id = new_session(&client, &address).await;
        client
            .post(&format!("{}/api/sessions/{}/start", address, id))
            .json(&json!({ "name": name }))
            .send()
            .await
            .unwrap();

        // Answer the first `wrong` questions with a wrong option.
        let wrong_picks = ["Rome", "Venus", "Giraffe", "Mark Twain"];
        let mut answers = all_correct();
        for (i, pick) in wrong_picks.iter().enumerate().take(wrong) {
            answers[i.to_string()] = json!(pick);
        }

        let resp = client
            .post(&format!("{}/api/sessions/{}/submit", address, id))
            .json(&json!({ "answers": answers }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 200);
    }

    let board: Value = client
        .get(&format!("{}/api/leaderboard", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<&str> = board["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["High", "Mid", "Low"]);
}

#[tokio::test]
async fn actions_on_unknown_session_are_404() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let id = uuid::Uuid::new_v4();

    let resp = client
        .get(&format!("{}/api/sessions/{}", address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);

    let resp = client
        .post(&format!("{}/api/sessions/{}/restart", address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);
}

#[tokio::test]
async fn submitting_before_start_is_a_conflict() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let id = new_session(&client, &address).await;

    let resp = client
        .post(&format!("{}/api/sessions/{}/submit", address, id))
        .json(&json!({ "answers": all_correct() }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 409);
}

#[tokio::test]
async fn names_are_stored_exactly_as_typed() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    for name in ["Tom & Jerry", "<Bob>", "<3 Ana"] {
        let id = new_session(&client, &address).await;

        let view: Value = client
            .post(&format!("{}/api/sessions/{}/start", address, id))
            .json(&json!({ "name": name }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(view["state"], "in_progress");
        assert_eq!(view["user_name"], name);

        let view: Value = client
            .post(&format!("{}/api/sessions/{}/submit", address, id))
            .json(&json!({ "answers": all_correct() }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(view["user_name"], name);
    }

    let board: Value = client
        .get(&format!("{}/api/leaderboard", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let mut names: Vec<&str> = board["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    names.sort_unstable();
    assert_eq!(names, ["<3 Ana", "<Bob>", "Tom & Jerry"]);
}

#[tokio::test]
async fn concurrent_submits_on_one_session_write_once() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let id = new_session(&client, &address).await;

    client
        .post(&format!("{}/api/sessions/{}/start", address, id))
        .json(&json!({ "name": "Racer" }))
        .send()
        .await
        .unwrap();

    let url = format!("{}/api/sessions/{}/submit", address, id);
    let body = json!({ "answers": all_correct() });
    let (first, second) = tokio::join!(
        client.post(&url).json(&body).send(),
        client.post(&url).json(&body).send(),
    );

    let mut statuses = vec![
        first.unwrap().status().as_u16(),
        second.unwrap().status().as_u16(),
    ];
    statuses.sort_unstable();
    assert_eq!(statuses, [200, 409]);

    let board: Value = client
        .get(&format!("{}/api/leaderboard", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(board["entries"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn idle_session_expires() {
    let address = spawn_app_with_ttl(1).await;
    let client = reqwest::Client::new();
    let id = new_session(&client, &address).await;

    tokio::time::sleep(std::time::Duration::from_millis(1500)).await;

    let resp = client
        .get(&format!("{}/api/sessions/{}", address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);
}
