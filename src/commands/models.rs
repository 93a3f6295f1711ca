use tracing::info;

use crate::config::ModelInfo;
use crate::error::CommandError;
use crate::state::AppState;

/// Models offered for selection, in configured order.
pub fn list_models(state: &AppState) -> Vec<ModelInfo> {
    state.config().models.available.clone()
}

pub fn get_preferred_model(state: &AppState) -> Result<String, CommandError> {
    Ok(state.preferred_model()?)
}

/// Store `id` as the preferred model. Only configured models are accepted.
pub fn set_preferred_model(state: &AppState, id: &str) -> Result<(), CommandError> {
    if state.config().find_model(id).is_none() {
        let known: Vec<&str> = state
            .config()
            .models
            .available
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        return Err(CommandError::InvalidInput(format!(
            "Unknown model '{}'. Available: {}",
            id,
            known.join(", ")
        )));
    }
    state.set_preferred_model(id)?;
    info!("Preferred model set to {}", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::default_config;
    use crate::mock::MockBackend;
    use crate::storage::MemoryStore;

    fn create_test_state() -> AppState {
        let store = Arc::new(MemoryStore::new());
        AppState::new(default_config(), Arc::new(MockBackend::new()), store.clone(), store)
            .unwrap()
    }

    #[test]
    fn test_list_models_matches_config() {
        let state = create_test_state();
        assert_eq!(list_models(&state), default_config().models.available);
    }

    #[test]
    fn test_set_preferred_model() {
        let state = create_test_state();
        set_preferred_model(&state, "gemini-3-pro-preview").unwrap();
        assert_eq!(get_preferred_model(&state).unwrap(), "gemini-3-pro-preview");
    }

    #[test]
    fn test_set_unknown_model_rejected() {
        let state = create_test_state();
        let err = set_preferred_model(&state, "gpt-4o").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("gpt-4o"));
        assert!(message.contains("gemini-2.5-flash"));
        assert_eq!(get_preferred_model(&state).unwrap(), default_config().models.default);
    }
}
