//! Gemini `generateContent` over HTTP.

use futures::future::BoxFuture;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::client::GenerationBackend;
use super::types::{BackendError, GenerateRequest, GenerateResponse};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const MAX_ERROR_BODY_CHARS: usize = 1024;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest<'a> {
    contents: Vec<WireContent<'a>>,
    system_instruction: WireContent<'a>,
    generation_config: WireGenerationConfig,
}

#[derive(Debug, Serialize)]
struct WireContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<WirePartOut<'a>>,
}

#[derive(Debug, Serialize)]
struct WirePartOut<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    temperature: f64,
    top_p: f64,
}

#[derive(Debug, Default, Deserialize)]
struct WireResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
}

#[derive(Debug, Deserialize)]
struct WireCandidate {
    content: Option<WireCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct WireCandidateContent {
    #[serde(default)]
    parts: Vec<WirePartIn>,
}

#[derive(Debug, Deserialize)]
struct WirePartIn {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
struct WireErrorEnvelope {
    error: WireError,
}

#[derive(Debug, Deserialize)]
struct WireError {
    message: Option<String>,
}

/// Calls `{base_url}/models/{model}:generateContent` with the credential in
/// the `x-goog-api-key` header. No timeout and no retries.
#[derive(Clone)]
pub struct GeminiBackend {
    client: Client,
    base_url: String,
}

impl GeminiBackend {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    async fn send(
        &self,
        credential: &str,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, BackendError> {
        let url = self.endpoint(&request.model);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", credential)
            .json(&build_request_body(request))
            .send()
            .await
            .map_err(|e| BackendError::new(format!("Request to Gemini API failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::new(format!("Failed to read Gemini API response: {}", e)))?;

        if !status.is_success() {
            let err = error_from_body(status, &body);
            error!(
                "Gemini API error ({}): {}",
                status,
                err.message.as_deref().unwrap_or_default()
            );
            return Err(err);
        }

        parse_response_body(&body)
    }
}

impl GenerationBackend for GeminiBackend {
    fn generate<'a>(
        &'a self,
        credential: &'a str,
        request: &'a GenerateRequest,
    ) -> BoxFuture<'a, Result<GenerateResponse, BackendError>> {
        Box::pin(self.send(credential, request))
    }
}

fn build_request_body(request: &GenerateRequest) -> WireRequest<'_> {
    WireRequest {
        contents: vec![WireContent {
            role: Some("user"),
            parts: vec![WirePartOut {
                text: &request.contents,
            }],
        }],
        system_instruction: WireContent {
            role: None,
            parts: vec![WirePartOut {
                text: &request.system_instruction,
            }],
        },
        generation_config: WireGenerationConfig {
            temperature: request.temperature,
            top_p: request.top_p,
        },
    }
}

/// Text of the first candidate: non-thought text parts joined in order.
fn parse_response_body(body: &str) -> Result<GenerateResponse, BackendError> {
    let parsed: WireResponse = serde_json::from_str(body)
        .map_err(|e| BackendError::new(format!("Failed to parse Gemini API response: {}", e)))?;

    let text = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter(|part| !part.thought)
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .filter(|text| !text.is_empty());

    Ok(GenerateResponse { text })
}

fn error_from_body(status: StatusCode, body: &str) -> BackendError {
    if let Ok(envelope) = serde_json::from_str::<WireErrorEnvelope>(body) {
        if let Some(message) = envelope.error.message.filter(|m| !m.trim().is_empty()) {
            return BackendError::new(message);
        }
    }

    let body = body.trim();
    if body.is_empty() {
        BackendError::new(format!("Gemini API error ({})", status))
    } else {
        let truncated: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
        BackendError::new(format!("Gemini API error ({}): {}", status, truncated))
    }
}
