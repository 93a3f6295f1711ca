//! Request and response shapes for the remote generation call.

use serde::{Deserialize, Serialize};

/// Sampling temperature sent with every refinement.
pub const TEMPERATURE: f64 = 0.7;
/// Nucleus-sampling threshold sent with every refinement.
pub const TOP_P: f64 = 0.95;

/// One generation call: the user's prompt as content, the built instruction as
/// the system directive, and fixed sampling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub model: String,
    pub contents: String,
    pub system_instruction: String,
    pub temperature: f64,
    pub top_p: f64,
}

impl GenerateRequest {
    pub fn new(
        model: impl Into<String>,
        contents: impl Into<String>,
        system_instruction: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            contents: contents.into(),
            system_instruction: system_instruction.into(),
            temperature: TEMPERATURE,
            top_p: TOP_P,
        }
    }
}

/// Generated output. `text` is absent when the service returned no text parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateResponse {
    pub text: Option<String>,
}

impl GenerateResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn empty() -> Self {
        Self { text: None }
    }
}

/// Failure from the generation service, carrying its message if it had one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendError {
    pub message: Option<String>,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    pub fn without_message() -> Self {
        Self { message: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_fixed_sampling() {
        let request = GenerateRequest::new("gemini-2.5-flash", "write a poem", "be helpful");
        assert_eq!(request.temperature, 0.7);
        assert_eq!(request.top_p, 0.95);
        assert_eq!(request.model, "gemini-2.5-flash");
    }
}
