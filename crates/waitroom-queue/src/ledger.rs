//! Admission ledger: the active set, the waiting line, and token lifecycle.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use chrono::Utc;
use tracing::{debug, info, trace};

use waitroom_core::config::queue::WaitingQueueConfig;
use waitroom_core::result::AppResult;
use waitroom_core::traits::store::TokenStore;
use waitroom_core::types::{Admission, Token};
use waitroom_store::keys::{ACTIVE_USERS, WAITING_USERS};

/// A freshly issued token and where it landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The new token.
    pub token: Token,
    /// Admitted or queued.
    pub admission: Admission,
}

/// Membership of a token as observed by one pair of store reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    /// In the active set.
    Active,
    /// In the waiting line at this 1-based rank.
    Waiting(u64),
    /// In neither collection.
    Unknown,
}

/// Owns the two membership collections and every operation on them.
///
/// Cheap to clone; clones share the store handle and the capacity value.
/// Capacity may be changed at runtime with [`AdmissionLedger::set_capacity`];
/// operations already in flight may still use the previous value.
#[derive(Debug, Clone)]
pub struct AdmissionLedger {
    /// Backing store.
    store: Arc<dyn TokenStore>,
    /// Maximum number of active tokens.
    capacity: Arc<AtomicU64>,
    /// Highest arrival score handed out by this instance.
    last_score: Arc<AtomicI64>,
}

impl AdmissionLedger {
    /// Creates a ledger over `store` admitting at most `capacity` tokens.
    pub fn new(store: Arc<dyn TokenStore>, capacity: u64) -> Self {
        Self {
            store,
            capacity: Arc::new(AtomicU64::new(capacity)),
            last_score: Arc::new(AtomicI64::new(0)),
        }
    }

    /// Creates a ledger using `max_active_users` from configuration.
    pub fn from_config(store: Arc<dyn TokenStore>, config: &WaitingQueueConfig) -> Self {
        Self::new(store, config.max_active_users)
    }

    /// Current capacity.
    pub fn capacity(&self) -> u64 {
        self.capacity.load(Ordering::Relaxed)
    }

    /// Replace the capacity.
    pub fn set_capacity(&self, capacity: u64) {
        let previous = self.capacity.swap(capacity, Ordering::Relaxed);
        info!(previous, capacity, "Waiting room capacity updated");
    }

    /// Issue a new token and admit it, or append it to the waiting line.
    ///
    /// Whether the capacity check and the insert happen atomically depends
    /// on the store; see [`TokenStore::admit_or_enqueue`].
    pub async fn enter(&self) -> AppResult<Entry> {
        let token = Token::generate();
        let admission = self
            .store
            .admit_or_enqueue(
                ACTIVE_USERS,
                WAITING_USERS,
                token.as_str(),
                self.capacity(),
                self.next_score(),
            )
            .await?;

        debug!(token = %token, ?admission, "Token issued");
        Ok(Entry { token, admission })
    }

    /// Whether `token` is in the active set.
    pub async fn is_active(&self, token: &Token) -> AppResult<bool> {
        self.store.set_contains(ACTIVE_USERS, token.as_str()).await
    }

    /// 1-based position of `token` in the waiting line, read fresh.
    pub async fn waiting_rank(&self, token: &Token) -> AppResult<Option<u64>> {
        let rank = self
            .store
            .ordered_rank(WAITING_USERS, token.as_str())
            .await?;
        Ok(rank.map(|r| r + 1))
    }

    /// Size of the waiting line.
    pub async fn total_waiting(&self) -> AppResult<u64> {
        self.store.ordered_len(WAITING_USERS).await
    }

    /// Size of the active set.
    pub async fn active_count(&self) -> AppResult<u64> {
        self.store.set_len(ACTIVE_USERS).await
    }

    /// Classify `token`. The active set is consulted first.
    pub async fn state_of(&self, token: &Token) -> AppResult<TokenState> {
        if self.is_active(token).await? {
            return Ok(TokenState::Active);
        }
        match self.waiting_rank(token).await? {
            Some(rank) => Ok(TokenState::Waiting(rank)),
            None => Ok(TokenState::Unknown),
        }
    }

    /// Move up to `count` of the oldest waiting tokens into the active set.
    ///
    /// Returns how many tokens this call moved. Members claimed by an
    /// overlapping promotion are skipped, not counted twice.
    pub async fn promote(&self, count: u64) -> AppResult<u64> {
        if count == 0 {
            return Ok(0);
        }

        let candidates = self
            .store
            .ordered_range(WAITING_USERS, 0, count - 1)
            .await?;
        if candidates.is_empty() {
            trace!("Waiting line empty, nothing to promote");
            return Ok(0);
        }

        let mut promoted = 0u64;
        for member in &candidates {
            if self
                .store
                .transfer(WAITING_USERS, ACTIVE_USERS, member)
                .await?
            {
                promoted += 1;
            }
        }

        info!(requested = count, promoted, "Promoted waiting tokens");
        Ok(promoted)
    }

    /// Arrival score in epoch milliseconds, bumped past the last score issued
    /// here. Strictly increasing per ledger, so same-millisecond arrivals
    /// never share a score.
    fn next_score(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let bump = |previous: i64| now.max(previous.saturating_add(1));
        let previous = self
            .last_score
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |previous| {
                Some(bump(previous))
            })
            .unwrap_or_else(|previous| previous);
        bump(previous)
    }
}
