//! Completion gateway — one request in, one reply out.
//!
//! Received → (fast-fail | upstream call) → Responded. No state survives a
//! call and exactly one upstream request is made per non-failing call.

use std::sync::Arc;
use chatdeck_types::{
    config::ProviderConfig,
    message::{Message, Role},
    wire::{CompletionReply, CompletionRequest},
};
use crate::diagnostics::Diagnostic;
use crate::upstream::{first_choice_text, ProviderRequest, UpstreamPort};

pub struct CompletionGateway {
    config: ProviderConfig,
    api_key: Option<String>,
    upstream: Arc<dyn UpstreamPort>,
}

impl CompletionGateway {
    /// A blank key is treated the same as no key.
    pub fn new(
        config: ProviderConfig,
        api_key: Option<String>,
        upstream: Arc<dyn UpstreamPort>,
    ) -> Self {
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        Self {
            config,
            api_key,
            upstream,
        }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// System prompt, then the caller's history, then the new user turn.
    ///
    /// System-role entries in the history are dropped, and only the most
    /// recent `max_history` entries are kept.
    pub fn build_messages(&self, req: &CompletionRequest) -> Vec<Message> {
        let history: Vec<Message> = req
            .history
            .iter()
            .filter(|h| h.role != Role::System)
            .cloned()
            .map(|h| h.into_message())
            .collect();
        let skip = history.len().saturating_sub(self.config.max_history);

        let mut messages = Vec::with_capacity(history.len() - skip + 2);
        messages.push(Message::system(&self.config.system_prompt));
        messages.extend(history.into_iter().skip(skip));

        let turn = match req.image() {
            Some(image) => {
                let text = if req.message.trim().is_empty() {
                    self.config.image_prompt.clone()
                } else {
                    req.message.clone()
                };
                Message::user_with_image(text, image)
            }
            None => Message::user(&req.message),
        };
        messages.push(turn);
        messages
    }

    pub fn build_request(&self, req: &CompletionRequest) -> ProviderRequest {
        ProviderRequest {
            model: self.config.model.clone(),
            messages: self.build_messages(req),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }

    /// Answer one turn. Never fails: problems come back as a diagnostic reply.
    pub async fn complete(&self, req: CompletionRequest) -> CompletionReply {
        log::info!(
            "Chat request: {} chars, {} history entries, image: {}",
            req.message.chars().count(),
            req.history.len(),
            req.image().is_some()
        );

        if req.message.trim().is_empty() && req.image().is_none() {
            log::warn!("Empty chat request, not forwarding");
            return Diagnostic::EmptyMessage.reply();
        }

        let Some(api_key) = self.api_key.as_deref() else {
            log::warn!("No provider key configured, not forwarding");
            return Diagnostic::MissingCredential.reply();
        };

        let body = self.build_request(&req);
        match self.upstream.chat_completion(api_key, &body).await {
            Ok(response) => match first_choice_text(&response) {
                Some(text) => CompletionReply::new(text),
                None => {
                    log::warn!("Provider response had no first choice: {}", response);
                    Diagnostic::NoResponse.reply()
                }
            },
            Err(e) => {
                log::error!("Upstream call failed: {}", e);
                Diagnostic::ServerError.reply()
            }
        }
    }
}
