//! Test fixtures shared by the unit tests in this crate.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use waitroom_core::error::AppError;
use waitroom_core::result::AppResult;
use waitroom_core::traits::store::TokenStore;
use waitroom_store::memory::MemoryTokenStore;

use crate::ledger::AdmissionLedger;

/// Ledger over a fresh in-memory store.
pub fn memory_ledger(capacity: u64) -> AdmissionLedger {
    AdmissionLedger::new(Arc::new(MemoryTokenStore::new()), capacity)
}

/// In-memory store whose every call can be switched to fail.
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryTokenStore,
    failing: AtomicBool,
    calls: AtomicU64,
    scores: Mutex<Vec<i64>>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of store calls attempted so far.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Scores passed to `ordered_add`, in call order.
    pub fn recorded_scores(&self) -> Vec<i64> {
        self.scores.lock().unwrap().clone()
    }

    fn check(&self) -> AppResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            Err(AppError::store("connection refused"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TokenStore for FlakyStore {
    async fn set_add(&self, key: &str, member: &str) -> AppResult<bool> {
        self.check()?;
        self.inner.set_add(key, member).await
    }

    async fn set_contains(&self, key: &str, member: &str) -> AppResult<bool> {
        self.check()?;
        self.inner.set_contains(key, member).await
    }

    async fn set_len(&self, key: &str) -> AppResult<u64> {
        self.check()?;
        self.inner.set_len(key).await
    }

    async fn ordered_add(&self, key: &str, member: &str, score: i64) -> AppResult<bool> {
        self.check()?;
        self.scores.lock().unwrap().push(score);
        self.inner.ordered_add(key, member, score).await
    }

    async fn ordered_rank(&self, key: &str, member: &str) -> AppResult<Option<u64>> {
        self.check()?;
        self.inner.ordered_rank(key, member).await
    }

    async fn ordered_range(&self, key: &str, start: u64, stop: u64) -> AppResult<Vec<String>> {
        self.check()?;
        self.inner.ordered_range(key, start, stop).await
    }

    async fn ordered_remove(&self, key: &str, member: &str) -> AppResult<bool> {
        self.check()?;
        self.inner.ordered_remove(key, member).await
    }

    async fn ordered_len(&self, key: &str) -> AppResult<u64> {
        self.check()?;
        self.inner.ordered_len(key).await
    }

    async fn transfer(&self, from: &str, to: &str, member: &str) -> AppResult<bool> {
        self.check()?;
        self.inner.transfer(from, to, member).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.check()?;
        Ok(true)
    }
}
