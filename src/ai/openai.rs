//! OpenAI-compatible chat completions client

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::types::{AiErrorKind, ApiKey, CompletionRequest, MAX_RETRY_DELAY_MS, RETRY_BASE_DELAY_MS};
use super::CompletionProvider;
use crate::config::AiSettings;
use crate::error::{FinsightError, FinsightResult};

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    total_tokens: u32,
}

/// Blocking client for `{api_base}/chat/completions`
pub struct OpenAiClient {
    client: Client,
    endpoint: String,
    max_retries: u32,
}

impl OpenAiClient {
    /// Build a client from settings and an API key
    pub fn new(settings: &AiSettings, api_key: &ApiKey) -> FinsightResult<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.expose()))
            .map_err(|_| FinsightError::ai(AiErrorKind::InvalidApiKey, "API key contains invalid characters"))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| FinsightError::ai(AiErrorKind::NetworkError, e.to_string()))?;

        Ok(Self {
            client,
            endpoint: chat_endpoint(&settings.api_base),
            max_retries: settings.max_retries,
        })
    }

    /// Build a client using the key from the environment
    pub fn from_env(settings: &AiSettings) -> FinsightResult<Self> {
        let key = ApiKey::from_env()?;
        Self::new(settings, &key)
    }

    fn send_once(&self, body: &ChatCompletionRequest<'_>) -> Result<String, (FinsightError, Option<u64>)> {
        let response = self.client.post(&self.endpoint).json(body).send().map_err(|e| {
            let message = if e.is_timeout() {
                "Request timed out".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            (FinsightError::ai(AiErrorKind::NetworkError, message), None)
        })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());
            let body = response.text().unwrap_or_default();
            return Err((parse_error(status.as_u16(), &body), retry_after));
        }

        let text = response.text().map_err(|e| {
            (FinsightError::ai(AiErrorKind::NetworkError, e.to_string()), None)
        })?;
        extract_content(&text).map_err(|e| (e, None))
    }
}

impl CompletionProvider for OpenAiClient {
    fn complete(&self, request: &CompletionRequest) -> FinsightResult<String> {
        let body = ChatCompletionRequest {
            model: &request.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        info!(model = %request.model, "Requesting chat completion");

        send_with_retry(self.max_retries, || self.send_once(&body), std::thread::sleep)
    }
}

/// Run `send` until it succeeds, retrying retryable errors up to
/// `max_retries` times
///
/// A Retry-After value in seconds replaces the exponential backoff. Both are
/// capped at `MAX_RETRY_DELAY_MS`.
fn send_with_retry<T>(
    max_retries: u32,
    mut send: impl FnMut() -> Result<T, (FinsightError, Option<u64>)>,
    mut wait: impl FnMut(Duration),
) -> FinsightResult<T> {
    let mut attempt = 0;
    loop {
        match send() {
            Ok(value) => return Ok(value),
            Err((err, retry_after)) => {
                let retryable = matches!(&err, FinsightError::Ai { kind, .. } if kind.is_retryable());
                if !retryable || attempt >= max_retries {
                    return Err(err);
                }
                let delay = retry_after
                    .map(|secs| Duration::from_millis(secs.saturating_mul(1000).min(MAX_RETRY_DELAY_MS)))
                    .unwrap_or_else(|| calculate_backoff_delay(attempt));
                warn!(attempt = attempt + 1, delay_ms = delay.as_millis() as u64, error = %err, "Retrying chat completion");
                wait(delay);
                attempt += 1;
            }
        }
    }
}

/// Join the API base and the chat completions path
fn chat_endpoint(api_base: &str) -> String {
    format!("{}/chat/completions", api_base.trim_end_matches('/'))
}

/// Exponential backoff: 1s, 2s, 4s, ... capped at 10s
pub fn calculate_backoff_delay(attempt: u32) -> Duration {
    let delay_ms = RETRY_BASE_DELAY_MS.saturating_mul(2u64.saturating_pow(attempt));
    Duration::from_millis(delay_ms.min(MAX_RETRY_DELAY_MS))
}

/// Classify an error response
pub fn parse_error(status: u16, body: &str) -> FinsightError {
    let body_lower = body.to_lowercase();
    let snippet: String = body.chars().take(200).collect();

    match status {
        429 if body_lower.contains("quota") || body_lower.contains("billing") => {
            FinsightError::ai(AiErrorKind::QuotaExceeded, "Quota exhausted. Check your plan and billing details.")
        }
        429 => FinsightError::ai(AiErrorKind::RateLimit, "Too many requests. Please wait a moment."),
        401 | 403 => FinsightError::ai(AiErrorKind::InvalidApiKey, "The API key was rejected."),
        404 => FinsightError::ai(AiErrorKind::ModelNotFound, format!("Model or endpoint not found: {}", snippet)),
        500..=599 => FinsightError::ai(AiErrorKind::ServerError, format!("HTTP {}", status)),
        _ => FinsightError::ai(AiErrorKind::Other, format!("HTTP {}: {}", status, snippet)),
    }
}

/// Pull the generated text out of a successful response body
pub fn extract_content(body: &str) -> FinsightResult<String> {
    let data: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| FinsightError::ai(AiErrorKind::Other, format!("JSON parse error: {}", e)))?;

    if let Some(usage) = &data.usage {
        debug!(total_tokens = usage.total_tokens, "Chat completion usage");
    }

    let content = data
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| FinsightError::ai(AiErrorKind::Other, "Response contained no message content"))?;

    Ok(normalize_response(&content))
}

/// Trim the reply and collapse runs of blank lines
pub fn normalize_response(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0;
    for line in text.trim().lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    out.trim_end().to_string()
}
