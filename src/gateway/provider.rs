//! Completion-provider contract
//!
//! The gateway treats the external reasoning service as a black box behind
//! this trait; concrete wire formats live in the provider implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One turn of conversation sent to the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// A single text-generation request
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    /// System/style instructions
    pub system: String,
    pub messages: Vec<ChatTurn>,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Hint that the response must be a single JSON object
    pub json_output: bool,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system: system.into(),
            messages: vec![ChatTurn::user(user)],
            temperature: 0.3,
            max_tokens: 4096,
            json_output: false,
        }
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn json_output(mut self) -> Self {
        self.json_output = true;
        self
    }
}

/// Raw provider response before the gateway attaches cost and latency
#[derive(Debug, Clone)]
pub struct Completion {
    pub content: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("rate limited by provider")]
    RateLimited,

    #[error("provider server error (status {status})")]
    Server { status: u16 },

    #[error("unexpected provider response (status {status})")]
    Http { status: u16 },

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("malformed provider payload: {0}")]
    Malformed(String),
}

impl ProviderError {
    /// Transient failures worth retrying: rate limits, 5xx, and transport
    /// errors. Client errors and malformed payloads propagate immediately.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProviderError::RateLimited | ProviderError::Server { .. } | ProviderError::Transport(_)
        )
    }
}

/// External text-generation and embedding service
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<Completion, ProviderError>;

    async fn embed(
        &self,
        model: &str,
        text: &str,
        dimensions: u32,
    ) -> Result<Vec<f32>, ProviderError>;
}
