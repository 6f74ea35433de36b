//! # waitroom-queue
//!
//! The admission-control engine:
//!
//! - [`ledger`]: active set and waiting line membership, ranks, promotion
//! - [`scheduler`]: periodic promotion of the oldest waiting tokens
//! - [`gate`]: per-request admit / redirect / re-issue decision and the
//!   read-only status query
//!
//! None of these hold in-process locks; correctness relies on the
//! per-call atomicity of the configured [`TokenStore`](waitroom_core::traits::TokenStore).

pub mod gate;
pub mod ledger;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod testing;

pub use gate::{Gate, GateDecision};
pub use ledger::{AdmissionLedger, Entry, TokenState};
pub use scheduler::PromotionScheduler;
