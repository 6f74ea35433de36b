//! Convenience result type alias for Waitroom.

use crate::error::AppError;

/// A specialized `Result` type for Waitroom operations.
pub type AppResult<T> = Result<T, AppError>;
