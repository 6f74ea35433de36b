//! Gate protocol: the per-request admission decision.
//!
//! ```text
//! UNKNOWN ──enter()──▶ ACTIVE
//!    │
//!    └─────enter()──▶ WAITING ──promote()──▶ ACTIVE
//! ```
//!
//! `ACTIVE` is terminal until the store expires the token. A presented token
//! that is in neither collection is treated exactly like no token at all.

use tracing::{error, info, trace, warn};

use waitroom_core::result::AppResult;
use waitroom_core::types::{StatusResponse, Token};

use crate::ledger::{AdmissionLedger, TokenState};

/// What the transport should do with the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Forward the request to the protected service.
    Admit {
        /// Token to hand back to the client, when one was issued.
        issued: Option<Token>,
    },
    /// Send the client to the waiting surface.
    Redirect {
        /// Token to hand back to the client, when one was issued.
        issued: Option<Token>,
    },
}

impl GateDecision {
    /// Whether the request may proceed.
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admit { .. })
    }

    /// Token the transport must attach to the response, if any.
    pub fn issued(&self) -> Option<&Token> {
        match self {
            Self::Admit { issued } | Self::Redirect { issued } => issued.as_ref(),
        }
    }
}

/// Request-time decision procedure over an [`AdmissionLedger`].
#[derive(Debug, Clone)]
pub struct Gate {
    /// Shared ledger.
    ledger: AdmissionLedger,
}

impl Gate {
    /// Creates a gate over `ledger`.
    pub fn new(ledger: AdmissionLedger) -> Self {
        Self { ledger }
    }

    /// The ledger this gate consults.
    pub fn ledger(&self) -> &AdmissionLedger {
        &self.ledger
    }

    /// Decide what to do with a request carrying `presented`.
    ///
    /// Store failures never admit: the request is redirected to the waiting
    /// surface, keeping the capacity bound intact during an outage.
    pub async fn evaluate(&self, presented: Option<&Token>) -> GateDecision {
        match self.try_evaluate(presented).await {
            Ok(decision) => decision,
            Err(e) => {
                error!(error = %e, "Gate evaluation failed, redirecting to waiting page");
                GateDecision::Redirect { issued: None }
            }
        }
    }

    async fn try_evaluate(&self, presented: Option<&Token>) -> AppResult<GateDecision> {
        let Some(token) = presented else {
            return self.issue().await;
        };

        match self.ledger.state_of(token).await? {
            TokenState::Active => {
                trace!(token = %token, "Active token re-entered");
                Ok(GateDecision::Admit { issued: None })
            }
            TokenState::Waiting(rank) => {
                trace!(token = %token, rank, "Waiting token re-entered");
                Ok(GateDecision::Redirect { issued: None })
            }
            TokenState::Unknown => {
                warn!(token = %token, "Invalid token detected, treating as a new client");
                self.issue().await
            }
        }
    }

    /// Issue a fresh token and route on its immediate status.
    async fn issue(&self) -> AppResult<GateDecision> {
        let entry = self.ledger.enter().await?;
        let token = entry.token;

        let active = if entry.admission.is_admitted() {
            true
        } else {
            // A promotion may already have claimed it.
            match self.ledger.is_active(&token).await {
                Ok(active) => active,
                Err(e) => {
                    warn!(token = %token, error = %e, "Status re-check failed after enqueue");
                    false
                }
            }
        };

        if active {
            info!(token = %token, "New client entered");
            Ok(GateDecision::Admit {
                issued: Some(token),
            })
        } else {
            info!(token = %token, "New client added to waiting queue");
            Ok(GateDecision::Redirect {
                issued: Some(token),
            })
        }
    }

    /// Read-only status for a polling client. Never issues tokens.
    pub async fn status(&self, token: &Token) -> AppResult<StatusResponse> {
        match self.ledger.state_of(token).await? {
            TokenState::Active => Ok(StatusResponse::active()),
            TokenState::Waiting(rank) => {
                let total = self.ledger.total_waiting().await?;
                Ok(StatusResponse::waiting(rank, total))
            }
            TokenState::Unknown => Ok(StatusResponse::invalid()),
        }
    }
}
