pub mod commands;
pub mod config;
pub mod credential;
pub mod error;
pub mod history;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod refine;
pub mod state;
pub mod storage;

pub use config::RefinerConfig;
pub use error::{CommandError, RefinementError, StorageError};
pub use history::{HistoryEntry, HistoryList};
pub use refine::{RefinementClient, RefinementGoal};
pub use state::AppState;

/// Install the global tracing subscriber. `RUST_LOG` overrides the default
/// `info` level.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
