//! Status query result returned to polling clients.

use serde::{Deserialize, Serialize};

/// Wire value for "not in the waiting line".
pub const ABSENT_RANK: i64 = -1;

/// Position of a token as seen by a polling client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueueStatus {
    /// The token is in the active set.
    Active,
    /// The token is in the waiting line.
    Waiting,
    /// The token is in neither collection.
    Invalid,
}

/// JSON body of the status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    /// Current state of the token.
    pub status: QueueStatus,
    /// 1-based waiting position; `0` when active, `-1` when invalid.
    pub rank: i64,
    /// Size of the waiting line; `0` unless waiting.
    pub total_waiting: u64,
}

impl StatusResponse {
    /// Response for an admitted token.
    pub fn active() -> Self {
        Self {
            status: QueueStatus::Active,
            rank: 0,
            total_waiting: 0,
        }
    }

    /// Response for a waiting token.
    pub fn waiting(rank: u64, total_waiting: u64) -> Self {
        Self {
            status: QueueStatus::Waiting,
            rank: rank as i64,
            total_waiting,
        }
    }

    /// Response for an unknown token.
    pub fn invalid() -> Self {
        Self {
            status: QueueStatus::Invalid,
            rank: ABSENT_RANK,
            total_waiting: 0,
        }
    }
}
