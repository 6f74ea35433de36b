//! Waiting-room gate middleware.
//!
//! Runs the gate for every non-excluded request. Admitted requests continue
//! to the inner service; everything else is redirected to the waiting page.
//! A freshly issued token is attached as a cookie in both cases.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};

use waitroom_core::types::Token;
use waitroom_queue::GateDecision;

use crate::extractors::token::token_from_jar;
use crate::state::AppState;

/// Gate middleware, installed with `axum::middleware::from_fn_with_state`.
pub async fn waiting_room_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    if state.exclusions.is_excluded(request.uri().path()) {
        return next.run(request).await;
    }

    let queue = &state.config.waiting_queue;
    let presented = token_from_jar(&jar, &queue.token_cookie_name);
    let decision = state.gate.evaluate(presented.as_ref()).await;

    let jar = match decision.issued() {
        Some(token) => jar.add(token_cookie(&queue.token_cookie_name, token)),
        None => jar,
    };

    match decision {
        GateDecision::Admit { .. } => {
            let response = next.run(request).await;
            (jar, response).into_response()
        }
        GateDecision::Redirect { .. } => {
            (jar, Redirect::to(&queue.waiting_page_url)).into_response()
        }
    }
}

/// Session cookie carrying `token`, visible on every path.
pub fn token_cookie(name: &str, token: &Token) -> Cookie<'static> {
    Cookie::build((name.to_string(), token.as_str().to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
