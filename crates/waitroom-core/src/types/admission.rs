//! Outcome of a single admit-or-enqueue decision.

use serde::{Deserialize, Serialize};

/// Where a freshly issued token landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Admission {
    /// Inserted into the active set.
    Admitted,
    /// Appended to the waiting line.
    Queued,
}

impl Admission {
    /// Whether the token may use the protected service right away.
    pub fn is_admitted(self) -> bool {
        matches!(self, Self::Admitted)
    }
}
