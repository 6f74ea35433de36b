//! Gate middleware flows.

use std::sync::Arc;

use axum::http::StatusCode;

use waitroom_core::config::AppConfig;
use waitroom_core::types::Token;
use waitroom_store::memory::MemoryTokenStore;

use crate::helpers::{TestApp, down_app};

#[tokio::test]
async fn test_first_visit_below_capacity_is_admitted_with_cookie() {
    let app = TestApp::new(2);
    let response = app.get("/", None).await;

    assert_eq!(response.status, StatusCode::OK);
    let cookie = response.token_cookie().expect("cookie issued");
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("HttpOnly"));
    assert!(!cookie.contains("Max-Age"));
    assert_eq!(app.state.ledger.active_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_first_visit_at_capacity_is_redirected_with_cookie() {
    let app = TestApp::new(1);
    app.visit().await;

    let response = app.get("/", None).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/waiting.html"));

    let token = Token::from_presented(&response.issued_token().unwrap()).unwrap();
    assert_eq!(app.state.ledger.waiting_rank(&token).await.unwrap(), Some(1));
}

#[tokio::test]
async fn test_active_token_passes_without_new_cookie() {
    let app = TestApp::new(1);
    let (_, token) = app.visit().await;

    let response = app.get("/", Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.token_cookie().is_none());
    assert_eq!(app.state.ledger.active_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_waiting_token_redirected_without_new_cookie() {
    let app = TestApp::new(0);
    let (first, token) = app.visit().await;
    assert_eq!(first.status, StatusCode::SEE_OTHER);

    let response = app.get("/", Some(&token)).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert!(response.token_cookie().is_none());
    assert_eq!(app.state.ledger.total_waiting().await.unwrap(), 1);
}

#[tokio::test]
async fn test_unknown_token_is_replaced() {
    let app = TestApp::new(5);
    let response = app.get("/", Some("forged-token")).await;

    assert_eq!(response.status, StatusCode::OK);
    let issued = response.issued_token().expect("fresh token issued");
    assert_ne!(issued, "forged-token");

    let forged = Token::from_presented("forged-token").unwrap();
    assert!(!app.state.ledger.is_active(&forged).await.unwrap());
}

#[tokio::test]
async fn test_promoted_client_gets_in() {
    let app = TestApp::new(1);
    app.visit().await;
    let (waiting, token) = app.visit().await;
    assert_eq!(waiting.status, StatusCode::SEE_OTHER);

    app.state.ledger.set_capacity(2);
    assert_eq!(app.state.scheduler().tick().await.unwrap(), 1);

    let response = app.get("/", Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_capacity_is_never_exceeded() {
    let app = TestApp::new(3);
    let mut admitted = 0;
    for _ in 0..10 {
        if app.get("/", None).await.status == StatusCode::OK {
            admitted += 1;
        }
    }

    assert_eq!(admitted, 3);
    assert_eq!(app.state.ledger.active_count().await.unwrap(), 3);
    assert_eq!(app.state.ledger.total_waiting().await.unwrap(), 7);
}

#[tokio::test]
async fn test_excluded_paths_bypass_gate() {
    let app = TestApp::new(0);

    let page = app.get("/waiting.html", None).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.token_cookie().is_none());

    let asset = app.get("/site.css", None).await;
    assert_eq!(asset.status, StatusCode::NOT_FOUND);
    assert!(asset.token_cookie().is_none());

    assert_eq!(app.state.ledger.total_waiting().await.unwrap(), 0);
}

#[tokio::test]
async fn test_unrouted_path_is_still_gated() {
    let app = TestApp::new(0);
    let response = app.get("/products/42", None).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert!(response.token_cookie().is_some());
}

#[tokio::test]
async fn test_disabled_gate_passes_everything() {
    let mut config = AppConfig::default();
    config.waiting_queue.max_active_users = 0;
    let app = TestApp::with_config(config, Arc::new(MemoryTokenStore::new()));

    let response = app.get("/", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.token_cookie().is_none());

    let status = app.get("/api/waiting-queue/status", Some("abc")).await;
    assert_eq!(status.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_store_outage_redirects() {
    let app = down_app();

    let response = app.get("/", None).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert!(response.token_cookie().is_none());

    let response = app.get("/", Some("some-token")).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new(0);
    let response = app.get("/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["store"], "connected");
    assert!(response.token_cookie().is_none());
}

#[tokio::test]
async fn test_health_reports_store_outage() {
    let app = down_app();
    let response = app.get("/health", None).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["status"], "degraded");
}
