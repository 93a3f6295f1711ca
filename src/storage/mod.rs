//! Local persistent key-value storage.
//!
//! History and the API key are persisted through [`KeyValueStore`] so the
//! backing store can be swapped: SQLite on disk, the OS keychain for secrets,
//! or an in-memory map in tests.

pub mod keychain;
pub mod memory;
pub mod sqlite;

pub use keychain::KeychainStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::StorageError;

/// Get/set/remove by key with read-after-write consistency within a process.
///
/// All operations are synchronous. Callers in async contexts that use a
/// disk-backed store should keep calls short or move them to
/// `tokio::task::spawn_blocking`.
pub trait KeyValueStore: Send + Sync {
    /// Read the value for `key`. Returns `None` if the key has never been set
    /// or was removed.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, overwriting any prior value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
