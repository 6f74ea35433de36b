//! Waiting room configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Waiting room (admission gate) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitingQueueConfig {
    /// Whether the gate is installed at all.
    #[serde(default)]
    pub enabled: bool,
    /// Maximum number of concurrently active clients.
    #[serde(default = "default_max_active_users")]
    pub max_active_users: u64,
    /// Name of the cookie carrying the admission token.
    #[serde(default = "default_token_cookie_name")]
    pub token_cookie_name: String,
    /// Where denied requests are redirected.
    #[serde(default = "default_waiting_page_url")]
    pub waiting_page_url: String,
    /// Promotion scheduler period in milliseconds.
    #[serde(default = "default_promotion_interval")]
    pub promotion_interval_ms: u64,
    /// Path patterns the gate never intercepts.
    ///
    /// Exact paths (`/error`) or single-segment suffix globs (`/*.css`).
    #[serde(default = "default_excluded_paths")]
    pub excluded_paths: Vec<String>,
}

impl Default for WaitingQueueConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_active_users: default_max_active_users(),
            token_cookie_name: default_token_cookie_name(),
            waiting_page_url: default_waiting_page_url(),
            promotion_interval_ms: default_promotion_interval(),
            excluded_paths: default_excluded_paths(),
        }
    }
}

impl WaitingQueueConfig {
    /// Validate field values.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.promotion_interval_ms == 0 {
            return Err(AppError::configuration(
                "waiting_queue.promotion_interval_ms must be greater than zero",
            ));
        }
        if self.token_cookie_name.trim().is_empty() {
            return Err(AppError::configuration(
                "waiting_queue.token_cookie_name must not be empty",
            ));
        }
        let url = &self.waiting_page_url;
        if !(url.starts_with('/') || url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AppError::configuration(format!(
                "waiting_queue.waiting_page_url must be a path or absolute URL, got '{url}'"
            )));
        }
        Ok(())
    }
}

fn default_max_active_users() -> u64 {
    1000
}

fn default_token_cookie_name() -> String {
    "wq_token".to_string()
}

fn default_waiting_page_url() -> String {
    "/waiting.html".to_string()
}

fn default_promotion_interval() -> u64 {
    1000
}

fn default_excluded_paths() -> Vec<String> {
    vec![
        "/error".to_string(),
        "/*.css".to_string(),
        "/*.js".to_string(),
        "/*.ico".to_string(),
    ]
}
