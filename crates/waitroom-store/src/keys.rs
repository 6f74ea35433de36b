//! Logical key names used by the admission ledger.
//!
//! Providers add their own prefix (Redis: `redis.key_prefix`, default
//! `waiting_queue:`), giving `waiting_queue:active_users` and
//! `waiting_queue:waiting_users` on the wire.

/// Unordered set of admitted tokens.
pub const ACTIVE_USERS: &str = "active_users";

/// Score-ordered waiting line.
pub const WAITING_USERS: &str = "waiting_users";
