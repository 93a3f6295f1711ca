//! Scripted [`GenerationBackend`] for tests: yields queued results in order and
//! records every call it receives.

use std::collections::VecDeque;
use std::sync::Mutex;

use futures::future::BoxFuture;

use crate::refine::{BackendError, GenerateRequest, GenerateResponse, GenerationBackend};

#[derive(Default)]
struct MockState {
    results: VecDeque<Result<GenerateResponse, BackendError>>,
    calls: Vec<(String, GenerateRequest)>,
}

/// A backend that never touches the network.
///
/// When the queue is empty a call fails with a "no mocked result" message.
#[derive(Default)]
pub struct MockBackend {
    state: Mutex<MockState>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue_response(&self, response: GenerateResponse) {
        self.with_state(|state| state.results.push_back(Ok(response)));
    }

    pub fn enqueue_text(&self, text: &str) {
        self.enqueue_response(GenerateResponse::text(text));
    }

    pub fn enqueue_error(&self, error: BackendError) {
        self.with_state(|state| state.results.push_back(Err(error)));
    }

    /// Number of `generate` calls received so far.
    pub fn call_count(&self) -> usize {
        self.with_state(|state| state.calls.len())
    }

    /// Credential and request of every call, oldest first.
    pub fn tracked_calls(&self) -> Vec<(String, GenerateRequest)> {
        self.with_state(|state| state.calls.clone())
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut MockState) -> T) -> T {
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut state)
    }
}

impl GenerationBackend for MockBackend {
    fn generate<'a>(
        &'a self,
        credential: &'a str,
        request: &'a GenerateRequest,
    ) -> BoxFuture<'a, Result<GenerateResponse, BackendError>> {
        let result = self.with_state(|state| {
            state.calls.push((credential.to_string(), request.clone()));
            state
                .results
                .pop_front()
                .unwrap_or_else(|| Err(BackendError::new("no mocked result queued")))
        });
        Box::pin(async move { result })
    }
}
