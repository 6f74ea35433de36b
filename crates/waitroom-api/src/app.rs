//! Application builder. Wires router, middleware, and state into an Axum app.

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application around the protected `service`.
pub fn build_app(state: AppState, service: Router) -> Router {
    build_router(state, service).layer(TraceLayer::new_for_http())
}
