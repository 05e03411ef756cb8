//! OpenAI-compatible HTTP provider
//!
//! Speaks the `/chat/completions` and `/embeddings` wire format, which most
//! hosted and self-hosted completion services expose. Register one instance
//! per upstream endpoint.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use super::provider::{ChatRequest, Completion, CompletionProvider, ProviderError};

const USER_AGENT: &str = concat!("docket-engine/", env!("CARGO_PKG_VERSION"));

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatBody<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize, Default)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

#[derive(Serialize)]
struct EmbeddingBody<'a> {
    model: &'a str,
    input: &'a str,
    dimensions: u32,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Deserialize)]
struct EmbeddingDatum {
    embedding: Vec<f32>,
}

/// Completion provider over an OpenAI-compatible HTTP endpoint
pub struct OpenAiCompatProvider {
    client: Client,
    chat_endpoint: String,
    embeddings_endpoint: String,
    api_key: String,
}

impl OpenAiCompatProvider {
    pub fn new(base_url: &Url, api_key: impl Into<String>) -> Self {
        let base = base_url.as_str().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            chat_endpoint: format!("{base}/chat/completions"),
            embeddings_endpoint: format!("{base}/embeddings"),
            api_key: api_key.into(),
        }
    }

    fn map_status(status: StatusCode) -> ProviderError {
        if status == StatusCode::TOO_MANY_REQUESTS {
            ProviderError::RateLimited
        } else if status.is_server_error() {
            ProviderError::Server {
                status: status.as_u16(),
            }
        } else {
            ProviderError::Http {
                status: status.as_u16(),
            }
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompatProvider {
    async fn complete(&self, request: &ChatRequest) -> Result<Completion, ProviderError> {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if !request.system.is_empty() {
            messages.push(WireMessage {
                role: "system",
                content: &request.system,
            });
        }
        for turn in &request.messages {
            messages.push(WireMessage {
                role: &turn.role,
                content: &turn.content,
            });
        }

        let body = ChatBody {
            model: &request.model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: request.json_output.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let response = self
            .client
            .post(&self.chat_endpoint)
            .bearer_auth(&self.api_key)
            .header("User-Agent", USER_AGENT)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::map_status(status));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        Ok(Completion {
            content,
            input_tokens: parsed.usage.prompt_tokens,
            output_tokens: parsed.usage.completion_tokens,
        })
    }

    async fn embed(
        &self,
        model: &str,
        text: &str,
        dimensions: u32,
    ) -> Result<Vec<f32>, ProviderError> {
        let body = EmbeddingBody {
            model,
            input: text,
            dimensions,
        };

        let response = self
            .client
            .post(&self.embeddings_endpoint)
            .bearer_auth(&self.api_key)
            .header("User-Agent", USER_AGENT)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::map_status(status));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| ProviderError::Malformed("empty embedding payload".to_string()))
    }
}
