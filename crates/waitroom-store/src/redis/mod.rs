//! Redis token store.

pub mod client;
pub mod operations;
pub mod scripts;

pub use client::RedisClient;
pub use operations::RedisTokenStore;
