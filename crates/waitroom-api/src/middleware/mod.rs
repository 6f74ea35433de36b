//! Axum middleware stack.

pub mod exclusion;
pub mod gate;
pub mod logging;
