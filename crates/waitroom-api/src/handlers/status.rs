//! Waiting-room status endpoint.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use waitroom_core::error::AppError;
use waitroom_core::types::{QueueStatus, StatusResponse};

use crate::error::ApiError;
use crate::extractors::QueueToken;
use crate::state::AppState;

/// GET /api/waiting-queue/status
///
/// Read-only: never issues a token and never changes the ledger.
/// An unknown token answers `401` with an `INVALID` body.
pub async fn queue_status(
    State(state): State<AppState>,
    QueueToken(token): QueueToken,
) -> Result<Response, ApiError> {
    let Some(token) = token else {
        return Err(AppError::validation("Missing waiting-room token").into());
    };

    let status: StatusResponse = state.gate.status(&token).await?;
    let code = match status.status {
        QueueStatus::Invalid => StatusCode::UNAUTHORIZED,
        QueueStatus::Active | QueueStatus::Waiting => StatusCode::OK,
    };

    Ok((code, Json(status)).into_response())
}
