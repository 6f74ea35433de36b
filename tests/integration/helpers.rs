//! Shared test helpers for integration tests.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use waitroom_api::handlers::pages::service_routes;
use waitroom_api::{AppState, build_app};
use waitroom_core::config::AppConfig;
use waitroom_core::error::AppError;
use waitroom_core::result::AppResult;
use waitroom_core::traits::store::TokenStore;
use waitroom_store::memory::MemoryTokenStore;

pub const COOKIE: &str = "wq_token";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for direct ledger access
    pub state: AppState,
}

impl TestApp {
    /// Gate enabled over an in-memory store with `capacity` slots.
    pub fn new(capacity: u64) -> Self {
        let mut config = AppConfig::default();
        config.waiting_queue.enabled = true;
        config.waiting_queue.max_active_users = capacity;
        Self::with_config(config, Arc::new(MemoryTokenStore::new()))
    }

    /// Build an app from explicit parts.
    pub fn with_config(config: AppConfig, store: Arc<dyn TokenStore>) -> Self {
        let state = AppState::new(config, store);
        let router = build_app(state.clone(), service_routes());
        Self { router, state }
    }

    /// Send a GET request, optionally carrying the token cookie.
    pub async fn get(&self, path: &str, token: Option<&str>) -> TestResponse {
        let mut req = Request::builder().method("GET").uri(path);

        if let Some(token) = token {
            req = req.header(header::COOKIE, format!("{COOKIE}={token}"));
        }

        let req = req.body(Body::empty()).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Issue a token by visiting the protected landing page.
    pub async fn visit(&self) -> (TestResponse, String) {
        let response = self.get("/", None).await;
        let token = response.issued_token().expect("No token issued");
        (response, token)
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body, `Null` when not JSON
    pub body: Value,
}

impl TestResponse {
    /// Raw `Set-Cookie` header for the token cookie.
    pub fn token_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&format!("{COOKIE}=")))
            .map(str::to_string)
    }

    /// Value of the issued token cookie.
    pub fn issued_token(&self) -> Option<String> {
        let raw = self.token_cookie()?;
        let pair = raw.split(';').next()?;
        pair.split_once('=').map(|(_, v)| v.to_string())
    }

    /// `Location` header.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

/// Store whose every call fails.
#[derive(Debug)]
pub struct DownStore;

fn down<T>() -> AppResult<T> {
    Err(AppError::store("connection refused"))
}

#[async_trait]
impl TokenStore for DownStore {
    async fn set_add(&self, _key: &str, _member: &str) -> AppResult<bool> {
        down()
    }

    async fn set_contains(&self, _key: &str, _member: &str) -> AppResult<bool> {
        down()
    }

    async fn set_len(&self, _key: &str) -> AppResult<u64> {
        down()
    }

    async fn ordered_add(&self, _key: &str, _member: &str, _score: i64) -> AppResult<bool> {
        down()
    }

    async fn ordered_rank(&self, _key: &str, _member: &str) -> AppResult<Option<u64>> {
        down()
    }

    async fn ordered_range(&self, _key: &str, _start: u64, _stop: u64) -> AppResult<Vec<String>> {
        down()
    }

    async fn ordered_remove(&self, _key: &str, _member: &str) -> AppResult<bool> {
        down()
    }

    async fn ordered_len(&self, _key: &str) -> AppResult<u64> {
        down()
    }

    async fn transfer(&self, _from: &str, _to: &str, _member: &str) -> AppResult<bool> {
        down()
    }

    async fn health_check(&self) -> AppResult<bool> {
        down()
    }
}

/// Gate enabled over a store that is down.
pub fn down_app() -> TestApp {
    let mut config = AppConfig::default();
    config.waiting_queue.enabled = true;
    TestApp::with_config(config, Arc::new(DownStore))
}
