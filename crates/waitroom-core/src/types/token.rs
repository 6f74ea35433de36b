//! Opaque admission token.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A client's admission claim.
///
/// Issued tokens are random UUID v4 strings. Tokens read back from clients
/// are arbitrary strings and are never parsed; an unknown value simply
/// misses in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Issue a new random token.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap a value presented by a client. Blank values yield `None`.
    pub fn from_presented(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Borrow the token text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
