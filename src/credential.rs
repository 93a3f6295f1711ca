//! API key storage. A transparent pass-through to a key-value store: no
//! encryption, no expiry. An empty string means "not configured".

use std::sync::Arc;

use tracing::info;

use crate::error::StorageError;
use crate::storage::KeyValueStore;

#[derive(Clone)]
pub struct CredentialStore {
    backend: Arc<dyn KeyValueStore>,
    key: String,
}

impl CredentialStore {
    pub fn new(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// The stored credential, or an empty string if none is set.
    pub fn load(&self) -> Result<String, StorageError> {
        Ok(self.backend.get(&self.key)?.unwrap_or_default())
    }

    /// Replace the stored credential. Saving an empty string clears it.
    pub fn save(&self, credential: &str) -> Result<(), StorageError> {
        if credential.is_empty() {
            info!("Clearing API key");
            self.backend.remove(&self.key)
        } else {
            info!("Saving API key ({} chars)", credential.chars().count());
            self.backend.set(&self.key, credential)
        }
    }

    pub fn is_configured(&self) -> Result<bool, StorageError> {
        Ok(!self.load()?.is_empty())
    }
}

/// Masked form for display: first four and last four characters.
pub fn mask_credential(credential: &str) -> String {
    let chars: Vec<char> = credential.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}
