//! In-memory token store using a Tokio mutex for single-node deployments.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use waitroom_core::result::AppResult;
use waitroom_core::traits::store::TokenStore;
use waitroom_core::types::Admission;

use super::line::OrderedLine;

/// Internal state for the memory-based token store.
#[derive(Debug, Default)]
struct InnerState {
    /// Unordered sets by key.
    sets: HashMap<String, HashSet<String>>,
    /// Ordered sets by key.
    lines: HashMap<String, OrderedLine>,
}

/// In-memory token store using a Tokio mutex for thread safety.
///
/// Every operation, including [`TokenStore::admit_or_enqueue`], runs under
/// the single lock, so admission never overshoots capacity. Suitable for
/// single-node deployments only.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    /// Protected inner state.
    state: Arc<Mutex<InnerState>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn set_add(&self, key: &str, member: &str) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        Ok(state
            .sets
            .entry(key.to_string())
            .or_default()
            .insert(member.to_string()))
    }

    async fn set_contains(&self, key: &str, member: &str) -> AppResult<bool> {
        let state = self.state.lock().await;
        Ok(state
            .sets
            .get(key)
            .is_some_and(|set| set.contains(member)))
    }

    async fn set_len(&self, key: &str) -> AppResult<u64> {
        let state = self.state.lock().await;
        Ok(state.sets.get(key).map_or(0, |set| set.len() as u64))
    }

    async fn ordered_add(&self, key: &str, member: &str, score: i64) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        Ok(state
            .lines
            .entry(key.to_string())
            .or_default()
            .insert(member, score))
    }

    async fn ordered_rank(&self, key: &str, member: &str) -> AppResult<Option<u64>> {
        let state = self.state.lock().await;
        Ok(state.lines.get(key).and_then(|line| line.rank(member)))
    }

    async fn ordered_range(&self, key: &str, start: u64, stop: u64) -> AppResult<Vec<String>> {
        let state = self.state.lock().await;
        Ok(state
            .lines
            .get(key)
            .map(|line| line.range(start, stop))
            .unwrap_or_default())
    }

    async fn ordered_remove(&self, key: &str, member: &str) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        Ok(state
            .lines
            .get_mut(key)
            .is_some_and(|line| line.remove(member)))
    }

    async fn ordered_len(&self, key: &str) -> AppResult<u64> {
        let state = self.state.lock().await;
        Ok(state.lines.get(key).map_or(0, OrderedLine::len))
    }

    async fn transfer(&self, from: &str, to: &str, member: &str) -> AppResult<bool> {
        let mut state = self.state.lock().await;

        let removed = state
            .lines
            .get_mut(from)
            .is_some_and(|line| line.remove(member));
        if !removed {
            return Ok(false);
        }

        state
            .sets
            .entry(to.to_string())
            .or_default()
            .insert(member.to_string());
        Ok(true)
    }

    async fn admit_or_enqueue(
        &self,
        active: &str,
        waiting: &str,
        member: &str,
        capacity: u64,
        score: i64,
    ) -> AppResult<Admission> {
        let mut state = self.state.lock().await;

        let active_count = state.sets.get(active).map_or(0, |set| set.len() as u64);
        if active_count < capacity {
            state
                .sets
                .entry(active.to_string())
                .or_default()
                .insert(member.to_string());
            return Ok(Admission::Admitted);
        }

        state
            .lines
            .entry(waiting.to_string())
            .or_default()
            .insert(member, score);
        Ok(Admission::Queued)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
