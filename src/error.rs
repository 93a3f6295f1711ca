use thiserror::Error;

/// Terminal outcome of a failed refinement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefinementError {
    /// No API key is configured; the remote call was not attempted.
    #[error("No API key configured. Please set your Gemini API key before refining a prompt.")]
    MissingCredential,

    /// The service did not recognise the model or key.
    #[error("{0}")]
    EntityNotFound(String),

    /// Any other remote failure, with the upstream message passed through.
    #[error("{0}")]
    Upstream(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Keychain error: {0}")]
    Keychain(#[from] keyring::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store lock poisoned: {0}")]
    Poisoned(String),
}

/// Error returned by the caller-facing commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Refinement(#[from] RefinementError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("{0}")]
    InvalidInput(String),
}

impl From<CommandError> for String {
    fn from(err: CommandError) -> Self {
        err.to_string()
    }
}

impl From<RefinementError> for String {
    fn from(err: RefinementError) -> Self {
        err.to_string()
    }
}

impl From<StorageError> for String {
    fn from(err: StorageError) -> Self {
        err.to_string()
    }
}
