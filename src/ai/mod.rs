//! Chat completion support for AI-generated financial insights
//!
//! The [`CompletionProvider`] trait is the seam between analysis code and
//! the network: [`OpenAiClient`] talks to any OpenAI-compatible
//! `chat/completions` endpoint, tests substitute their own provider.

pub mod openai;
pub mod prompts;
pub mod types;

pub use openai::OpenAiClient;
pub use types::{AiErrorKind, ApiKey, CompletionRequest, API_KEY_ENV};

use crate::error::FinsightResult;

/// Something that turns a prompt into generated text
pub trait CompletionProvider {
    fn complete(&self, request: &CompletionRequest) -> FinsightResult<String>;
}
