//! Outbound client for the chat-completions endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use meditrek_core::config::ChatConfig;
use meditrek_core::error::{AppError, ErrorKind};
use meditrek_core::result::AppResult;

use super::message::ChatMessage;

/// Something that turns a conversation into the next assistant message.
#[async_trait]
pub trait InferenceClient: Send + Sync + std::fmt::Debug + 'static {
    /// Returns the raw content of the first completion choice.
    async fn complete(&self, messages: &[ChatMessage]) -> AppResult<String>;
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    messages: &'a [ChatMessage],
    model: &'a str,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// OpenAI-compatible client over `reqwest`.
#[derive(Clone)]
pub struct HttpInferenceClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
    temperature: f32,
    top_p: f32,
}

impl std::fmt::Debug for HttpInferenceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpInferenceClient")
            .field("url", &self.url)
            .field("model", &self.model)
            .finish()
    }
}

impl HttpInferenceClient {
    /// Builds a client from the chat configuration.
    pub fn new(config: &ChatConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            http,
            url: completions_url(&config.endpoint),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            top_p: config.top_p,
        })
    }
}

#[async_trait]
impl InferenceClient for HttpInferenceClient {
    async fn complete(&self, messages: &[ChatMessage]) -> AppResult<String> {
        let body = CompletionRequest {
            messages,
            model: &self.model,
            temperature: self.temperature,
            top_p: self.top_p,
        };

        debug!(url = %self.url, messages = messages.len(), "Calling inference endpoint");

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, "Inference request failed", e)
            })?
            .error_for_status()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    format!(
                        "Inference endpoint returned {}",
                        e.status().map(|s| s.as_u16()).unwrap_or_default()
                    ),
                    e,
                )
            })?;

        let parsed: CompletionResponse = response.json().await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, "Malformed inference response", e)
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AppError::external_service("Inference response had no choices"))
    }
}

fn completions_url(endpoint: &str) -> String {
    format!("{}/chat/completions", endpoint.trim_end_matches('/'))
}
