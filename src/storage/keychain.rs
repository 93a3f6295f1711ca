use keyring::credential::CredentialBuilder;
use keyring::Entry;
use tracing::{info, warn};

use super::KeyValueStore;
use crate::error::StorageError;

const KEYCHAIN_USER: &str = "prompt-refiner";

/// OS keychain as a key-value store. Each key becomes its own keychain entry
/// under `<service>.<key>`.
pub struct KeychainStore {
    service: String,
    /// Overrides keyring's platform default store when set.
    builder: Option<Box<CredentialBuilder>>,
}

impl KeychainStore {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            builder: None,
        }
    }

    /// Use `builder` for every entry instead of the platform keychain.
    pub fn with_builder(service: impl Into<String>, builder: Box<CredentialBuilder>) -> Self {
        Self {
            service: service.into(),
            builder: Some(builder),
        }
    }

    fn entry(&self, key: &str) -> Result<Entry, StorageError> {
        let service = format!("{}.{}", self.service, key);
        let entry = match &self.builder {
            Some(builder) => builder
                .build(None, &service, KEYCHAIN_USER)
                .map(Entry::new_with_credential),
            None => Entry::new(&service, KEYCHAIN_USER),
        };
        entry.map_err(|e| {
            warn!("Failed to create keyring entry for {}: {}", service, e);
            StorageError::Keychain(e)
        })
    }
}

impl KeyValueStore for KeychainStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => {
                info!("No keychain entry for {}.{}", self.service, key);
                Ok(None)
            }
            Err(e) => {
                warn!("Failed to read keychain entry {}.{}: {}", self.service, key, e);
                Err(e.into())
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entry(key)?.set_password(value).map_err(|e| {
            warn!("Failed to write keychain entry {}.{}: {}", self.service, key, e);
            StorageError::Keychain(e)
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => {
                warn!("Failed to delete keychain entry {}.{}: {}", self.service, key, e);
                Err(e.into())
            }
        }
    }
}
