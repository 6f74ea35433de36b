//! # waitroom-core
//!
//! Core crate for Waitroom. Contains the token store trait, configuration
//! schemas, the admission token and status types, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other Waitroom crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
