//! Refinement client: one generation call per refinement, with the outcome
//! classified into [`RefinementError`] kinds.

use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::{error, info};

use super::goals::RefinementGoal;
use super::prompts::build_instruction;
use super::types::{BackendError, GenerateRequest, GenerateResponse};
use crate::error::RefinementError;

/// Returned when the service answers with no usable text.
pub const EMPTY_RESULT_FALLBACK: &str = "Failed to generate a refined prompt.";

/// Marker the service puts in its message when the model/key pair is unknown.
pub const ENTITY_NOT_FOUND_MARKER: &str = "Requested entity was not found";

const ENTITY_NOT_FOUND_MESSAGE: &str = "Requested entity was not found. This usually means the selected model is not available for your API key. Please re-select your API key or choose a different model.";

const GENERIC_FAILURE_MESSAGE: &str = "An unexpected error occurred while refining your prompt.";

/// The remote text-generation service.
pub trait GenerationBackend: Send + Sync {
    fn generate<'a>(
        &'a self,
        credential: &'a str,
        request: &'a GenerateRequest,
    ) -> BoxFuture<'a, Result<GenerateResponse, BackendError>>;
}

#[derive(Clone)]
pub struct RefinementClient {
    backend: Arc<dyn GenerationBackend>,
}

impl RefinementClient {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }

    /// Refine `raw_prompt` for `goal` using `model_id`.
    ///
    /// Fails with [`RefinementError::MissingCredential`] without contacting
    /// the service when `credential` is empty. Not retried, not cached.
    pub async fn refine(
        &self,
        raw_prompt: &str,
        goal: RefinementGoal,
        model_id: &str,
        credential: &str,
    ) -> Result<String, RefinementError> {
        if credential.is_empty() {
            return Err(RefinementError::MissingCredential);
        }

        let request = GenerateRequest::new(model_id, raw_prompt, build_instruction(goal));

        info!(
            "Refining prompt ({} chars) with goal '{}' using model '{}'",
            raw_prompt.chars().count(),
            goal,
            model_id
        );

        match self.backend.generate(credential, &request).await {
            Ok(response) => Ok(extract_refined_text(response)),
            Err(err) => {
                error!(
                    "Refinement request failed for model '{}': {}",
                    model_id,
                    err.message.as_deref().unwrap_or("<no message>")
                );
                Err(classify_error(err))
            }
        }
    }
}

/// Trimmed text, or the fallback when the service returned nothing.
pub fn extract_refined_text(response: GenerateResponse) -> String {
    match response.text.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => EMPTY_RESULT_FALLBACK.to_string(),
    }
}

/// Map a service failure onto the caller-facing error kinds.
pub fn classify_error(err: BackendError) -> RefinementError {
    match err.message {
        Some(message) if message.contains(ENTITY_NOT_FOUND_MARKER) => {
            RefinementError::EntityNotFound(ENTITY_NOT_FOUND_MESSAGE.to_string())
        }
        Some(message) if !message.trim().is_empty() => RefinementError::Upstream(message),
        _ => RefinementError::Upstream(GENERIC_FAILURE_MESSAGE.to_string()),
    }
}
