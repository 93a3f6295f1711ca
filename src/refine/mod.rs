//! Prompt refinement: goal catalog, instruction builder, and the client that
//! calls the generation service.

pub mod client;
pub mod gemini;
pub mod goals;
pub mod prompts;
pub mod types;

pub use client::{GenerationBackend, RefinementClient, EMPTY_RESULT_FALLBACK};
pub use gemini::GeminiBackend;
pub use goals::{RefinementGoal, UnknownGoal};
pub use prompts::build_instruction;
pub use types::{BackendError, GenerateRequest, GenerateResponse};
