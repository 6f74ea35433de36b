//! # waitroom-store
//!
//! Token store implementations for Waitroom. Supports two modes:
//!
//! - **memory**: In-process set and score-ordered line behind one tokio mutex,
//!   for single-instance deployments
//! - **redis**: Redis `SET` / `ZSET` using the [redis](https://crates.io/crates/redis) crate,
//!   shared by every gate instance pointing at the same server
//!
//! The provider is selected at runtime based on configuration.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::StoreManager;
