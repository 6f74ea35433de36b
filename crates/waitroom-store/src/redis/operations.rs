//! Redis token store implementation.

use async_trait::async_trait;
use redis::{AsyncCommands, Script};
use tracing::error;

use waitroom_core::error::{AppError, ErrorKind};
use waitroom_core::result::AppResult;
use waitroom_core::traits::store::{TokenStore, check_then_admit};
use waitroom_core::types::Admission;

use super::client::RedisClient;
use super::scripts::{ADMIT_SCRIPT, TRANSFER_SCRIPT};

/// Redis-backed token store.
///
/// The active set is a Redis `SET`, the waiting line a `ZSET`. Members with
/// equal scores are ordered lexicographically by Redis.
#[derive(Debug, Clone)]
pub struct RedisTokenStore {
    /// Redis client.
    client: RedisClient,
    /// Run admission as one Lua script instead of check-then-act.
    atomic_admission: bool,
    /// Cached admission script.
    admit_script: Script,
    /// Cached transfer script.
    transfer_script: Script,
}

impl RedisTokenStore {
    /// Create a new Redis token store.
    pub fn new(client: RedisClient, atomic_admission: bool) -> Self {
        Self {
            client,
            atomic_admission,
            admit_script: Script::new(ADMIT_SCRIPT),
            transfer_script: Script::new(TRANSFER_SCRIPT),
        }
    }

    /// Map a Redis error to an AppError.
    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::Store, format!("Redis error: {e}"), e)
    }
}

#[async_trait]
impl TokenStore for RedisTokenStore {
    async fn set_add(&self, key: &str, member: &str) -> AppResult<bool> {
        let full_key = self.client.key(key);
        let mut conn = self.client.conn();
        let added: i64 = conn.sadd(&full_key, member).await.map_err(Self::map_err)?;
        Ok(added > 0)
    }

    async fn set_contains(&self, key: &str, member: &str) -> AppResult<bool> {
        let full_key = self.client.key(key);
        let mut conn = self.client.conn();
        let result: bool = conn
            .sismember(&full_key, member)
            .await
            .map_err(Self::map_err)?;
        Ok(result)
    }

    async fn set_len(&self, key: &str) -> AppResult<u64> {
        let full_key = self.client.key(key);
        let mut conn = self.client.conn();
        let result: Option<u64> = conn.scard(&full_key).await.map_err(Self::map_err)?;
        Ok(result.unwrap_or(0))
    }

    async fn ordered_add(&self, key: &str, member: &str, score: i64) -> AppResult<bool> {
        let full_key = self.client.key(key);
        let mut conn = self.client.conn();
        let added: i64 = conn
            .zadd(&full_key, member, score)
            .await
            .map_err(Self::map_err)?;
        Ok(added > 0)
    }

    async fn ordered_rank(&self, key: &str, member: &str) -> AppResult<Option<u64>> {
        let full_key = self.client.key(key);
        let mut conn = self.client.conn();
        let result: Option<u64> = conn.zrank(&full_key, member).await.map_err(Self::map_err)?;
        Ok(result)
    }

    async fn ordered_range(&self, key: &str, start: u64, stop: u64) -> AppResult<Vec<String>> {
        if stop < start {
            return Ok(Vec::new());
        }
        let full_key = self.client.key(key);
        let mut conn = self.client.conn();
        let members: Vec<String> = conn
            .zrange(&full_key, start as isize, stop as isize)
            .await
            .map_err(Self::map_err)?;
        Ok(members)
    }

    async fn ordered_remove(&self, key: &str, member: &str) -> AppResult<bool> {
        let full_key = self.client.key(key);
        let mut conn = self.client.conn();
        let removed: i64 = conn.zrem(&full_key, member).await.map_err(Self::map_err)?;
        Ok(removed > 0)
    }

    async fn ordered_len(&self, key: &str) -> AppResult<u64> {
        let full_key = self.client.key(key);
        let mut conn = self.client.conn();
        let result: Option<u64> = conn.zcard(&full_key).await.map_err(Self::map_err)?;
        Ok(result.unwrap_or(0))
    }

    async fn transfer(&self, from: &str, to: &str, member: &str) -> AppResult<bool> {
        let mut conn = self.client.conn();
        let moved: i64 = self
            .transfer_script
            .key(self.client.key(from))
            .key(self.client.key(to))
            .arg(member)
            .invoke_async(&mut conn)
            .await
            .map_err(Self::map_err)?;
        Ok(moved == 1)
    }

    async fn admit_or_enqueue(
        &self,
        active: &str,
        waiting: &str,
        member: &str,
        capacity: u64,
        score: i64,
    ) -> AppResult<Admission> {
        if !self.atomic_admission {
            return check_then_admit(self, active, waiting, member, capacity, score).await;
        }

        let mut conn = self.client.conn();
        let result: i64 = self
            .admit_script
            .key(self.client.key(active))
            .key(self.client.key(waiting))
            .arg(member)
            .arg(capacity)
            .arg(score)
            .invoke_async(&mut conn)
            .await
            .map_err(Self::map_err)?;

        match result {
            1 => Ok(Admission::Admitted),
            0 => Ok(Admission::Queued),
            other => {
                error!(result = other, "Unexpected admission script result");
                Err(AppError::store(format!(
                    "Unexpected admission script result: {other}"
                )))
            }
        }
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.client.ping().await
    }
}
