//! Bounded, persisted history of past refinements.

pub mod store;
pub mod types;

pub use store::{record, HistoryStore};
pub use types::{HistoryEntry, HistoryList, HISTORY_CAPACITY};
