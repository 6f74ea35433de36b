//! Token store trait for pluggable set / ordered-set backends.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::admission::Admission;

/// Trait for the shared key-value store behind the admission ledger.
///
/// Every method is a single atomic operation against the backend; callers
/// must not assume that a sequence of calls is atomic. Keys are logical
/// names; any prefixing is the provider's concern.
///
/// A missing key behaves as an empty collection: sizes are `0`, membership
/// is `false`, ranks are `None`.
#[async_trait]
pub trait TokenStore: Send + Sync + std::fmt::Debug + 'static {
    /// Add `member` to the unordered set at `key`. Returns `true` if it was newly added.
    async fn set_add(&self, key: &str, member: &str) -> AppResult<bool>;

    /// Check whether `member` belongs to the set at `key`.
    async fn set_contains(&self, key: &str, member: &str) -> AppResult<bool>;

    /// Cardinality of the set at `key`.
    async fn set_len(&self, key: &str) -> AppResult<u64>;

    /// Insert `member` into the ordered set at `key` with `score`.
    ///
    /// Re-adding an existing member updates its score. Returns `true` if the
    /// member was newly added.
    async fn ordered_add(&self, key: &str, member: &str, score: i64) -> AppResult<bool>;

    /// Zero-based ascending rank of `member`, or `None` if absent.
    async fn ordered_rank(&self, key: &str, member: &str) -> AppResult<Option<u64>>;

    /// Members at ranks `start..=stop` in ascending score order.
    async fn ordered_range(&self, key: &str, start: u64, stop: u64) -> AppResult<Vec<String>>;

    /// Remove `member` from the ordered set. Returns `true` if it was present.
    async fn ordered_remove(&self, key: &str, member: &str) -> AppResult<bool>;

    /// Cardinality of the ordered set at `key`.
    async fn ordered_len(&self, key: &str) -> AppResult<u64>;

    /// Atomically move `member` from the ordered set `from` into the set `to`.
    ///
    /// Returns `false` without touching `to` when `member` was not in `from`,
    /// so two overlapping promotions never both claim the same member.
    async fn transfer(&self, from: &str, to: &str, member: &str) -> AppResult<bool>;

    /// Admit `member` into `active` if it holds fewer than `capacity` members,
    /// otherwise enqueue it into `waiting` with `score`.
    ///
    /// The default implementation is a plain check-then-act over three
    /// calls; under concurrent callers the active set can exceed `capacity`.
    /// Providers that can run the decision atomically override it.
    async fn admit_or_enqueue(
        &self,
        active: &str,
        waiting: &str,
        member: &str,
        capacity: u64,
        score: i64,
    ) -> AppResult<Admission> {
        check_then_admit(self, active, waiting, member, capacity, score).await
    }

    /// Check that the store backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// Non-atomic admit-or-enqueue built from the individual store primitives.
///
/// Reads the active count, then inserts. Two callers racing at the capacity
/// boundary can both observe `capacity - 1` and both be admitted.
pub async fn check_then_admit<S: TokenStore + ?Sized>(
    store: &S,
    active: &str,
    waiting: &str,
    member: &str,
    capacity: u64,
    score: i64,
) -> AppResult<Admission> {
    let active_count = store.set_len(active).await?;
    if active_count < capacity {
        store.set_add(active, member).await?;
        Ok(Admission::Admitted)
    } else {
        store.ordered_add(waiting, member, score).await?;
        Ok(Admission::Queued)
    }
}
