//! Completion port backed by the chatdeck gateway.
//!
//! POSTs `{message, imageBase64, history}` to `<base>/api/chat` with
//! browser `fetch()` via gloo-net and decodes `{reply}`.

use async_trait::async_trait;
use gloo_net::http::Request;

use chatdeck_core::ports::CompletionPort;
use chatdeck_types::{
    ChatError, Result,
    wire::{CompletionReply, CompletionRequest},
};

pub struct GatewayClient {
    endpoint: String,
}

impl GatewayClient {
    /// `base` is the gateway origin; empty means the page's own origin.
    pub fn new(base: &str) -> Self {
        Self {
            endpoint: format!("{}/api/chat", base.trim_end_matches('/')),
        }
    }
}

#[async_trait(?Send)]
impl CompletionPort for GatewayClient {
    async fn complete(&self, req: CompletionRequest) -> Result<CompletionReply> {
        let response = Request::post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&req)
            .map_err(|e| ChatError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        // The gateway answers 200 even on failure; anything else came from
        // something in between (dev server, proxy).
        if !response.ok() {
            log::warn!("Gateway answered HTTP {}", response.status());
        }

        response
            .json::<CompletionReply>()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
