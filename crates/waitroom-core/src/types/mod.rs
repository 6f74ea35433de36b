//! Shared domain types.

pub mod admission;
pub mod status;
pub mod token;

pub use admission::Admission;
pub use status::{QueueStatus, StatusResponse};
pub use token::Token;
