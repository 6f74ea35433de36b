//! Store manager that dispatches to the configured provider.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use waitroom_core::config::store::StoreConfig;
use waitroom_core::error::AppError;
use waitroom_core::result::AppResult;
use waitroom_core::traits::store::TokenStore;
use waitroom_core::types::Admission;

/// Store manager that wraps the configured token store provider.
///
/// The provider is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct StoreManager {
    /// The inner token store.
    inner: Arc<dyn TokenStore>,
}

impl StoreManager {
    /// Create a new store manager from configuration.
    pub async fn new(config: &StoreConfig) -> AppResult<Self> {
        let inner: Arc<dyn TokenStore> = match config.provider.as_str() {
            #[cfg(feature = "redis-backend")]
            "redis" => {
                info!(
                    atomic_admission = config.redis.atomic_admission,
                    "Initializing Redis token store"
                );
                let client = crate::redis::RedisClient::connect(&config.redis).await?;
                Arc::new(crate::redis::RedisTokenStore::new(
                    client,
                    config.redis.atomic_admission,
                ))
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory token store");
                Arc::new(crate::memory::MemoryTokenStore::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown store provider: '{other}'. Supported: memory, redis"
                )));
            }
        };

        Ok(Self { inner })
    }
}

#[async_trait]
impl TokenStore for StoreManager {
    async fn set_add(&self, key: &str, member: &str) -> AppResult<bool> {
        self.inner.set_add(key, member).await
    }

    async fn set_contains(&self, key: &str, member: &str) -> AppResult<bool> {
        self.inner.set_contains(key, member).await
    }

    async fn set_len(&self, key: &str) -> AppResult<u64> {
        self.inner.set_len(key).await
    }

    async fn ordered_add(&self, key: &str, member: &str, score: i64) -> AppResult<bool> {
        self.inner.ordered_add(key, member, score).await
    }

    async fn ordered_rank(&self, key: &str, member: &str) -> AppResult<Option<u64>> {
        self.inner.ordered_rank(key, member).await
    }

    async fn ordered_range(&self, key: &str, start: u64, stop: u64) -> AppResult<Vec<String>> {
        self.inner.ordered_range(key, start, stop).await
    }

    async fn ordered_remove(&self, key: &str, member: &str) -> AppResult<bool> {
        self.inner.ordered_remove(key, member).await
    }

    async fn ordered_len(&self, key: &str) -> AppResult<u64> {
        self.inner.ordered_len(key).await
    }

    async fn transfer(&self, from: &str, to: &str, member: &str) -> AppResult<bool> {
        self.inner.transfer(from, to, member).await
    }

    async fn admit_or_enqueue(
        &self,
        active: &str,
        waiting: &str,
        member: &str,
        capacity: u64,
        score: i64,
    ) -> AppResult<Admission> {
        self.inner
            .admit_or_enqueue(active, waiting, member, capacity, score)
            .await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}
