//! Token store configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Top-level token store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store provider type: `"memory"` or `"redis"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Redis-specific store configuration.
    #[serde(default)]
    pub redis: RedisStoreConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            redis: RedisStoreConfig::default(),
        }
    }
}

impl StoreConfig {
    /// Reject providers this build does not know about.
    pub fn validate(&self) -> Result<(), AppError> {
        match self.provider.as_str() {
            "memory" | "redis" => Ok(()),
            other => Err(AppError::configuration(format!(
                "Unknown store provider: '{other}'. Supported: memory, redis"
            ))),
        }
    }
}

/// Redis store backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisStoreConfig {
    /// Redis connection URL.
    #[serde(default = "default_redis_url")]
    pub url: String,
    /// Key prefix for the active set and waiting line keys.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    /// Run the admit-or-enqueue decision as a single Lua script.
    ///
    /// When disabled, admission is a separate `SCARD` followed by `SADD` or
    /// `ZADD`, and concurrent bursts may overshoot capacity.
    #[serde(default = "default_true")]
    pub atomic_admission: bool,
}

impl Default for RedisStoreConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
            key_prefix: default_key_prefix(),
            atomic_admission: default_true(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_key_prefix() -> String {
    "waiting_queue:".to_string()
}

fn default_true() -> bool {
    true
}
