//! Access log for gated traffic.

use std::time::Instant;

use axum::extract::Request;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, info, warn};

/// Logs one line per request. Redirects include their target, 5xx logs at
/// warn, and `/health` probes log at debug.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis() as u64;
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok());

    match (response.status(), location) {
        (s, _) if s.is_server_error() => {
            warn!(%method, %path, status, elapsed_ms, "Request failed")
        }
        (s, Some(location)) if s.is_redirection() => {
            info!(%method, %path, status, location, elapsed_ms, "Request redirected")
        }
        _ if path == "/health" => debug!(%method, %path, status, elapsed_ms, "Request served"),
        _ => info!(%method, %path, status, elapsed_ms, "Request served"),
    }

    response
}
