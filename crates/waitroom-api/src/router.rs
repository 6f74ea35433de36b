//! Route definitions for the Waitroom HTTP layer.
//!
//! The protected service is supplied by the caller. When the waiting room is
//! enabled the whole router is wrapped in the gate middleware, which skips
//! excluded paths itself.

use axum::Router;
use axum::middleware as axum_middleware;
use axum::routing::get;

use crate::handlers;
use crate::middleware;
use crate::middleware::exclusion::{HEALTH_PATH, STATUS_PATH};
use crate::state::AppState;

/// Build the router around `service`.
pub fn build_router(state: AppState, service: Router) -> Router {
    let mut router = service.merge(system_routes(state.clone()));

    if state.config.waiting_queue.enabled {
        router = router
            .merge(queue_routes(state.clone()))
            .layer(axum_middleware::from_fn_with_state(
                state,
                middleware::gate::waiting_room_gate,
            ));
    }

    router.layer(axum_middleware::from_fn(
        middleware::logging::request_logging,
    ))
}

/// Liveness probe, always mounted.
fn system_routes(state: AppState) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(handlers::health::health))
        .with_state(state)
}

/// Status polling, mounted only when the gate is enabled.
fn queue_routes(state: AppState) -> Router {
    Router::new()
        .route(STATUS_PATH, get(handlers::status::queue_status))
        .with_state(state)
}
