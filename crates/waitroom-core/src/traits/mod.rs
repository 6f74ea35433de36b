//! Core traits defined in `waitroom-core` and implemented by other crates.

pub mod store;

pub use store::{TokenStore, check_then_admit};
