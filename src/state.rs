//! Long-lived application state shared by the commands.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Result;
use tracing::{info, warn};

use crate::config::{CredentialBackend, RefinerConfig};
use crate::credential::CredentialStore;
use crate::error::StorageError;
use crate::history::{record, HistoryEntry, HistoryList, HistoryStore};
use crate::refine::{GeminiBackend, GenerationBackend, RefinementClient, RefinementGoal};
use crate::storage::{KeychainStore, KeyValueStore, SqliteStore};

pub const PREFERRED_MODEL_KEY: &str = "preferred_model";
pub const PREFERRED_GOAL_KEY: &str = "preferred_goal";

pub struct AppState {
    config: RefinerConfig,
    client: RefinementClient,
    preferences: Arc<dyn KeyValueStore>,
    credential: CredentialStore,
    history_store: HistoryStore,
    /// In-memory copy of the persisted list. The lock is held across
    /// record + persist so concurrent writers can't interleave.
    history: Mutex<HistoryList>,
}

impl AppState {
    /// Wire the state from explicit parts. History is loaded once here.
    pub fn new(
        config: RefinerConfig,
        backend: Arc<dyn GenerationBackend>,
        store: Arc<dyn KeyValueStore>,
        credential_store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, StorageError> {
        let history_store = HistoryStore::new(store.clone(), config.storage.history_key.clone());
        let history = history_store.load()?;
        let credential =
            CredentialStore::new(credential_store, config.storage.credential_key.clone());

        Ok(Self {
            client: RefinementClient::new(backend),
            preferences: store,
            credential,
            history_store,
            history: Mutex::new(history),
            config,
        })
    }

    /// Production wiring: SQLite under `data_dir`, Gemini over HTTP, and the
    /// API key in the keychain or the database per config.
    pub fn open(config: RefinerConfig, data_dir: &Path) -> Result<Self> {
        let store: Arc<dyn KeyValueStore> =
            Arc::new(SqliteStore::open(&config.database_path(data_dir))?);
        let credential_backend = config.storage.credential_backend.effective();
        let credential_store: Arc<dyn KeyValueStore> = match credential_backend {
            CredentialBackend::Keychain => {
                Arc::new(KeychainStore::new(config.storage.keychain_service.clone()))
            }
            CredentialBackend::Database => store.clone(),
        };
        let backend: Arc<dyn GenerationBackend> = Arc::new(GeminiBackend::new(&config.api.base_url));

        info!(
            "Opening app state in {:?} (credential backend: {:?})",
            data_dir, credential_backend
        );
        Ok(Self::new(config, backend, store, credential_store)?)
    }

    pub fn config(&self) -> &RefinerConfig {
        &self.config
    }

    pub fn client(&self) -> &RefinementClient {
        &self.client
    }

    pub fn credential(&self) -> &CredentialStore {
        &self.credential
    }

    pub fn preferences(&self) -> &dyn KeyValueStore {
        self.preferences.as_ref()
    }

    /// Snapshot of the current history.
    pub fn history(&self) -> Result<HistoryList, StorageError> {
        Ok(self.lock_history()?.clone())
    }

    /// Record `entry` and persist the result. The in-memory list only changes
    /// if the write succeeds.
    pub fn record_history(&self, entry: HistoryEntry) -> Result<HistoryList, StorageError> {
        let mut history = self.lock_history()?;
        let updated = record(&history, entry);
        self.history_store.persist(&updated)?;
        *history = updated.clone();
        Ok(updated)
    }

    pub fn clear_history(&self) -> Result<(), StorageError> {
        let mut history = self.lock_history()?;
        *history = self.history_store.clear()?;
        Ok(())
    }

    /// Preferred model, falling back to the configured default when unset or
    /// no longer offered.
    pub fn preferred_model(&self) -> Result<String, StorageError> {
        let stored = self.preferences.get(PREFERRED_MODEL_KEY)?;
        match stored {
            Some(id) if self.config.find_model(&id).is_some() => Ok(id),
            Some(id) => {
                warn!("Preferred model '{}' is no longer available, using default", id);
                Ok(self.config.models.default.clone())
            }
            None => Ok(self.config.models.default.clone()),
        }
    }

    pub fn set_preferred_model(&self, id: &str) -> Result<(), StorageError> {
        self.preferences.set(PREFERRED_MODEL_KEY, id)
    }

    /// Last-used goal, `General` if unset or unreadable.
    pub fn preferred_goal(&self) -> Result<RefinementGoal, StorageError> {
        let stored = self.preferences.get(PREFERRED_GOAL_KEY)?;
        Ok(stored
            .and_then(|value| value.parse().ok())
            .unwrap_or_default())
    }

    pub fn set_preferred_goal(&self, goal: RefinementGoal) -> Result<(), StorageError> {
        self.preferences.set(PREFERRED_GOAL_KEY, goal.as_str())
    }

    fn lock_history(&self) -> Result<MutexGuard<'_, HistoryList>, StorageError> {
        self.history
            .lock()
            .map_err(|e| StorageError::Poisoned(e.to_string()))
    }
}
