//! Status endpoint responses.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{TestApp, down_app};

const STATUS: &str = "/api/waiting-queue/status";

#[tokio::test]
async fn test_missing_token_is_bad_request() {
    let app = TestApp::new(1);
    let response = app.get(STATUS, None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(response.token_cookie().is_none());
}

#[tokio::test]
async fn test_blank_token_is_bad_request() {
    let app = TestApp::new(1);
    let response = app.get(STATUS, Some("")).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_active_token() {
    let app = TestApp::new(1);
    let (_, token) = app.visit().await;

    let response = app.get(STATUS, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({ "status": "ACTIVE", "rank": 0, "totalWaiting": 0 })
    );
}

#[tokio::test]
async fn test_waiting_tokens_report_rank() {
    let app = TestApp::new(1);
    app.visit().await;
    let (_, first) = app.visit().await;
    let (_, second) = app.visit().await;

    let response = app.get(STATUS, Some(&first)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({ "status": "WAITING", "rank": 1, "totalWaiting": 2 })
    );

    let response = app.get(STATUS, Some(&second)).await;
    assert_eq!(response.body["rank"], 2);
}

#[tokio::test]
async fn test_rank_advances_after_promotion() {
    let app = TestApp::new(1);
    app.visit().await;
    let (_, first) = app.visit().await;
    let (_, second) = app.visit().await;

    app.state.ledger.set_capacity(2);
    app.state.scheduler().tick().await.unwrap();

    let response = app.get(STATUS, Some(&first)).await;
    assert_eq!(response.body["status"], "ACTIVE");

    let response = app.get(STATUS, Some(&second)).await;
    assert_eq!(
        response.body,
        json!({ "status": "WAITING", "rank": 1, "totalWaiting": 1 })
    );
}

#[tokio::test]
async fn test_unknown_token_is_unauthorized() {
    let app = TestApp::new(1);
    let response = app.get(STATUS, Some("nobody")).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.body,
        json!({ "status": "INVALID", "rank": -1, "totalWaiting": 0 })
    );
    assert!(response.token_cookie().is_none());
    assert_eq!(app.state.ledger.active_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_store_outage_is_service_unavailable() {
    let app = down_app();
    let response = app.get(STATUS, Some("some-token")).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["error"], "SERVICE_UNAVAILABLE");
}
