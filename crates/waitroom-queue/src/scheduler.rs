//! Promotion scheduler: periodically fills free capacity from the waiting line.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use waitroom_core::config::queue::WaitingQueueConfig;
use waitroom_core::result::AppResult;

use crate::ledger::AdmissionLedger;

/// Fixed-period control loop that promotes waiting tokens.
///
/// Each tick is spawned as its own task, so a slow store call does not delay
/// the next tick and ticks may overlap. A failed tick is logged and dropped.
#[derive(Debug, Clone)]
pub struct PromotionScheduler {
    /// Ledger to promote into.
    ledger: AdmissionLedger,
    /// Tick period.
    period: Duration,
}

impl PromotionScheduler {
    /// Create a scheduler ticking every `period`.
    pub fn new(ledger: AdmissionLedger, period: Duration) -> Self {
        Self { ledger, period }
    }

    /// Create a scheduler using `promotion_interval_ms` from configuration.
    pub fn from_config(ledger: AdmissionLedger, config: &WaitingQueueConfig) -> Self {
        Self::new(ledger, Duration::from_millis(config.promotion_interval_ms))
    }

    /// Tick period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Run one promotion pass. Returns how many tokens were promoted.
    pub async fn tick(&self) -> AppResult<u64> {
        promote_available(&self.ledger).await
    }

    /// Start the loop on a background task.
    pub fn spawn(self, cancel: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(cancel).await })
    }

    /// Run until the cancel signal is received.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        tracing::info!(
            period_ms = self.period.as_millis() as u64,
            "Promotion scheduler started"
        );

        let mut interval = time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        tracing::info!("Promotion scheduler received shutdown signal");
                        break;
                    }
                }
                _ = interval.tick() => {
                    let ledger = self.ledger.clone();
                    tokio::spawn(async move {
                        if let Err(e) = promote_available(&ledger).await {
                            tracing::error!(error = %e, "Promotion tick failed");
                        }
                    });
                }
            }
        }

        tracing::info!("Promotion scheduler stopped");
    }
}

/// Promote as many waiting tokens as there are free active slots.
async fn promote_available(ledger: &AdmissionLedger) -> AppResult<u64> {
    tracing::trace!("Running promotion tick");

    let active = ledger.active_count().await?;
    let available = ledger.capacity().saturating_sub(active);
    if available == 0 {
        return Ok(0);
    }

    tracing::debug!(available, "Found available slots, promoting waiting tokens");
    ledger.promote(available).await
}
