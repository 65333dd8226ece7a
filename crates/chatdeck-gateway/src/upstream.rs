//! Upstream provider client.
//!
//! Speaks the OpenAI chat completions protocol (OpenAI, DeepSeek, and any
//! compatible endpoint). The response is handed back as raw JSON: provider
//! error payloads are valid JSON too, and telling them apart is the
//! gateway's job.

use std::time::Duration;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use chatdeck_types::{config::ProviderConfig, message::Message};

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("undecodable response: {0}")]
    Decode(String),
}

/// Body of one chat completions call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[async_trait]
pub trait UpstreamPort: Send + Sync {
    /// One authenticated call. `Ok` carries whatever JSON came back,
    /// whatever the HTTP status.
    async fn chat_completion(
        &self,
        api_key: &str,
        body: &ProviderRequest,
    ) -> Result<Value, UpstreamError>;
}

pub struct OpenAiUpstream {
    client: reqwest::Client,
    url: String,
}

impl OpenAiUpstream {
    pub fn new(config: &ProviderConfig) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            url: config.completions_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl UpstreamPort for OpenAiUpstream {
    async fn chat_completion(
        &self,
        api_key: &str,
        body: &ProviderRequest,
    ) -> Result<Value, UpstreamError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Provider answered HTTP {}", status);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}

/// `choices[0].message.content`, if present and non-empty.
pub fn first_choice_text(response: &Value) -> Option<&str> {
    response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}
