//! AI request types, error kinds and retry constants

use std::fmt;

use serde::Serialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::config::AiSettings;
use crate::error::{FinsightError, FinsightResult};

/// Environment variable holding the provider API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Base delay for exponential backoff (milliseconds)
pub const RETRY_BASE_DELAY_MS: u64 = 1000;

/// Upper bound for a single backoff delay (milliseconds)
pub const MAX_RETRY_DELAY_MS: u64 = 10_000;

/// Types of AI API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AiErrorKind {
    /// Too many requests, retry after a delay
    RateLimit,
    /// Credits exhausted
    QuotaExceeded,
    /// Missing, invalid or expired API key
    InvalidApiKey,
    /// Model not found or not available
    ModelNotFound,
    /// Server error on the provider side
    ServerError,
    /// Network or connection error
    NetworkError,
    Other,
}

impl AiErrorKind {
    /// Whether a request failing this way is worth retrying
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimit | Self::ServerError | Self::NetworkError)
    }
}

impl fmt::Display for AiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::RateLimit => "rate limit",
            Self::QuotaExceeded => "quota exceeded",
            Self::InvalidApiKey => "invalid API key",
            Self::ModelNotFound => "model not found",
            Self::ServerError => "server error",
            Self::NetworkError => "network error",
            Self::Other => "other",
        };
        f.write_str(text)
    }
}

/// A provider API key, zeroed when dropped
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Read the key from `OPENAI_API_KEY`
    pub fn from_env() -> FinsightResult<Self> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key.trim())),
            _ => Err(FinsightError::ai(
                AiErrorKind::InvalidApiKey,
                format!("The {} environment variable is not set.", API_KEY_ENV),
            )),
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

/// A single-turn chat completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    /// Build a request from settings and a user prompt
    pub fn from_settings(settings: &AiSettings, prompt: impl Into<String>) -> Self {
        Self {
            model: settings.model.clone(),
            system: settings.system_prompt.clone(),
            prompt: prompt.into(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
        }
    }
}
