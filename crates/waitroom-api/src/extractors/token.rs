//! Admission token extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use waitroom_core::types::Token;

use crate::state::AppState;

/// The admission token presented in the configured cookie, if any.
///
/// A missing, empty, or whitespace-only cookie yields `QueueToken(None)`.
#[derive(Debug, Clone)]
pub struct QueueToken(pub Option<Token>);

impl FromRequestParts<AppState> for QueueToken {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(Self(token_from_jar(
            &jar,
            &state.config.waiting_queue.token_cookie_name,
        )))
    }
}

/// Read the token cookie named `name` from `jar`.
pub fn token_from_jar(jar: &CookieJar, name: &str) -> Option<Token> {
    jar.get(name)
        .and_then(|cookie| Token::from_presented(cookie.value()))
}
