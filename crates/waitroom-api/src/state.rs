//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use waitroom_core::config::AppConfig;
use waitroom_core::traits::store::TokenStore;
use waitroom_queue::{AdmissionLedger, Gate, PromotionScheduler};

use crate::middleware::exclusion::PathExclusions;

/// Shared application state available to all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Token store backing the ledger.
    pub store: Arc<dyn TokenStore>,
    /// Admission ledger.
    pub ledger: AdmissionLedger,
    /// Per-request gate over `ledger`.
    pub gate: Gate,
    /// Paths the gate never intercepts.
    pub exclusions: Arc<PathExclusions>,
}

impl AppState {
    /// Wire the queue components over `store`.
    pub fn new(config: AppConfig, store: Arc<dyn TokenStore>) -> Self {
        let queue = &config.waiting_queue;
        let ledger = AdmissionLedger::from_config(Arc::clone(&store), queue);
        let gate = Gate::new(ledger.clone());
        let exclusions = PathExclusions::from_config(queue);

        Self {
            config: Arc::new(config),
            store,
            ledger,
            gate,
            exclusions: Arc::new(exclusions),
        }
    }

    /// Promotion scheduler over this state's ledger.
    pub fn scheduler(&self) -> PromotionScheduler {
        PromotionScheduler::from_config(self.ledger.clone(), &self.config.waiting_queue)
    }
}
