use std::sync::Arc;

use tracing::{info, warn};

use super::types::{HistoryEntry, HistoryList};
use crate::error::StorageError;
use crate::storage::KeyValueStore;

/// Persists the history list as a JSON array under a single key.
///
/// Not internally synchronized: callers serialize load/record/persist.
#[derive(Clone)]
pub struct HistoryStore {
    backend: Arc<dyn KeyValueStore>,
    key: String,
}

impl HistoryStore {
    pub fn new(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Read the persisted list. Missing or unparseable data yields an empty
    /// list; only backend failures are returned as errors.
    pub fn load(&self) -> Result<HistoryList, StorageError> {
        let Some(raw) = self.backend.get(&self.key)? else {
            return Ok(HistoryList::new());
        };

        match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
            Ok(entries) => {
                let list = HistoryList::from_entries(entries);
                info!("Loaded {} history entries", list.len());
                Ok(list)
            }
            Err(e) => {
                warn!("Discarding unreadable history under '{}': {}", self.key, e);
                Ok(HistoryList::new())
            }
        }
    }

    /// Overwrite the persisted list with `list`.
    pub fn persist(&self, list: &HistoryList) -> Result<(), StorageError> {
        let json = serde_json::to_string(list)?;
        self.backend.set(&self.key, &json)?;
        info!("Persisted {} history entries", list.len());
        Ok(())
    }

    /// Persist and return an empty list.
    pub fn clear(&self) -> Result<HistoryList, StorageError> {
        let empty = HistoryList::new();
        self.persist(&empty)?;
        info!("Cleared history");
        Ok(empty)
    }
}

/// Prepend `entry` to `list`, keeping at most ten entries. Does not persist.
pub fn record(list: &HistoryList, entry: HistoryEntry) -> HistoryList {
    list.record(entry)
}
