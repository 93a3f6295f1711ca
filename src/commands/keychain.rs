use serde::Serialize;
use tracing::info;

use crate::credential::mask_credential;
use crate::error::CommandError;
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiKeyStatus {
    pub configured: bool,
    /// Masked hint such as `AIza…1234`; never the raw key.
    pub hint: Option<String>,
}

pub fn set_api_key(state: &AppState, key: &str) -> Result<(), CommandError> {
    if key.trim().is_empty() {
        return Err(CommandError::InvalidInput(
            "Please enter an API key".to_string(),
        ));
    }
    state.credential().save(key)?;
    Ok(())
}

pub fn get_api_key_status(state: &AppState) -> Result<ApiKeyStatus, CommandError> {
    let key = state.credential().load()?;
    if key.is_empty() {
        info!("No API key configured");
        return Ok(ApiKeyStatus {
            configured: false,
            hint: None,
        });
    }
    Ok(ApiKeyStatus {
        configured: true,
        hint: Some(mask_credential(&key)),
    })
}

pub fn clear_api_key(state: &AppState) -> Result<(), CommandError> {
    state.credential().save("")?;
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
    fn test_set_status_clear() {
        let state = create_test_state();
        assert!(!get_api_key_status(&state).unwrap().configured);

        set_api_key(&state, "AIzaSyTESTKEY00001234").unwrap();
        let status = get_api_key_status(&state).unwrap();
        assert!(status.configured);
        assert_eq!(status.hint.as_deref(), Some("AIza…1234"));

        clear_api_key(&state).unwrap();
        assert_eq!(
            get_api_key_status(&state).unwrap(),
            ApiKeyStatus {
                configured: false,
                hint: None
            }
        );
    }

    #[test]
    fn test_set_blank_key_rejected() {
        let state = create_test_state();
        let err = set_api_key(&state, "  ").unwrap_err();
        assert!(err.to_string().contains("Please enter an API key"));
    }
}
