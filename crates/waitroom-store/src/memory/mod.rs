//! In-process token store.

pub mod line;
pub mod store;

pub use store::MemoryTokenStore;
