use tracing::info;

use crate::error::CommandError;
use crate::history::HistoryEntry;
use crate::state::AppState;

/// All history entries, most recent first.
pub fn list_history(state: &AppState) -> Result<Vec<HistoryEntry>, CommandError> {
    let history = state.history()?;
    info!("Listed {} history entries", history.len());
    Ok(history.entries().to_vec())
}

pub fn get_history_entry(state: &AppState, id: &str) -> Result<HistoryEntry, CommandError> {
    state
        .history()?
        .get(id)
        .cloned()
        .ok_or_else(|| CommandError::InvalidInput(format!("History entry not found: {}", id)))
}

pub fn clear_history(state: &AppState) -> Result<(), CommandError> {
    state.clear_history()?;
    Ok(())
}
