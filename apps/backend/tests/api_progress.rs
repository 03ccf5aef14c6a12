//! Study progress API tests.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;

use common::fixtures;
use common::TestContext;

/// Test marking and unmarking a card as missed.
#[tokio::test]
async fn test_mark_and_unmark_missed() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let id = fixtures::card_id("Adenosine", "Adult");
    let path = format!("/api/progress/missed/{}", TestContext::id_path(&id));

    server.put(&path).await.assert_status(StatusCode::NO_CONTENT);

    let body: Value = server.get("/api/progress/missed").await.json();
    assert_eq!(body["cards"].as_array().unwrap().len(), 1);
    assert_eq!(body["cards"][0]["id"], "adenosine__adult");

    let detail: Value = server
        .get(&format!("/api/cards/{}", TestContext::id_path(&id)))
        .await
        .json();
    assert_eq!(detail["missed"], true);

    server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);

    let body: Value = server.get("/api/progress/missed").await.json();
    assert!(body["cards"].as_array().unwrap().is_empty());
}

/// Test marking an unknown card returns 404.
#[tokio::test]
async fn test_mark_unknown_card() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.put("/api/progress/missed/morphine__adult").await;

    response.assert_status(StatusCode::NOT_FOUND);
}

/// Test recording outcomes updates history and the missed set.
#[tokio::test]
async fn test_record_outcome() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/progress/history")
        .json(&fixtures::outcome_request("Atropine", "Adult", "wrong"))
        .await;
    response.assert_status(StatusCode::CREATED);

    let missed: Value = server.get("/api/progress/missed").await.json();
    assert_eq!(missed["cards"][0]["drug"], "Atropine");

    server
        .post("/api/progress/history")
        .json(&fixtures::outcome_request("Atropine", "Adult", "correct"))
        .await
        .assert_status(StatusCode::CREATED);

    let missed: Value = server.get("/api/progress/missed").await.json();
    assert!(missed["cards"].as_array().unwrap().is_empty());

    let history: Value = server.get("/api/progress/history").await.json();
    let results: Vec<&str> = history["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["result"].as_str().unwrap())
        .collect();
    assert_eq!(results, vec!["correct", "wrong"]);
}

/// Test history is capped at the configured limit.
#[tokio::test]
async fn test_history_cap() {
    let ctx = TestContext::new();
    let server = ctx.server();

    for _ in 0..(fixtures::HISTORY_LIMIT + 3) {
        server
            .post("/api/progress/history")
            .json(&fixtures::outcome_request("Aspirin", "Adult", "revealed"))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let history: Value = server.get("/api/progress/history").await.json();
    assert_eq!(
        history["entries"].as_array().unwrap().len(),
        fixtures::HISTORY_LIMIT
    );

    let limited: Value = server
        .get("/api/progress/history")
        .add_query_param("limit", 2)
        .await
        .json();
    assert_eq!(limited["entries"].as_array().unwrap().len(), 2);
}

/// Test recording without a drug is rejected.
#[tokio::test]
async fn test_record_outcome_requires_drug() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/progress/history")
        .json(&fixtures::outcome_request("  ", "Adult", "wrong"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

/// Test reset clears missed items and history.
#[tokio::test]
async fn test_reset_progress() {
    let ctx = TestContext::new();
    let server = ctx.server();

    server
        .post("/api/progress/history")
        .json(&fixtures::outcome_request("Amiodarone", "Adult", "missed"))
        .await
        .assert_status(StatusCode::CREATED);

    server.delete("/api/progress").await.assert_status(StatusCode::NO_CONTENT);

    let missed: Value = server.get("/api/progress/missed").await.json();
    let history: Value = server.get("/api/progress/history").await.json();
    assert!(missed["cards"].as_array().unwrap().is_empty());
    assert!(history["entries"].as_array().unwrap().is_empty());
    assert!(ctx.state.progress.read().await.missed().is_empty());
}
