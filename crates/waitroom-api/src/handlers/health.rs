//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let healthy = match state.store.health_check().await {
        Ok(ok) => ok,
        Err(e) => {
            tracing::warn!(error = %e, "Token store health check failed");
            false
        }
    };

    let (code, status, store) = if healthy {
        (StatusCode::OK, "ok", "connected")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unreachable")
    };

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            store: store.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}
