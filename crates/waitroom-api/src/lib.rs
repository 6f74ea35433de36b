//! # waitroom-api
//!
//! HTTP layer for Waitroom built on Axum.
//!
//! Wraps any protected [`axum::Router`] with the waiting-room gate
//! middleware (cookie-carried token, redirect to the waiting page), and
//! serves the read-only status endpoint polled by waiting clients.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;
