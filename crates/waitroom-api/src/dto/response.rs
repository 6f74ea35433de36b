//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// `"connected"` or `"unreachable"`.
    pub store: String,
    /// Crate version.
    pub version: String,
}
