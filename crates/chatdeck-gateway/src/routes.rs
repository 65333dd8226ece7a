use axum::{
    body::Bytes,
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use chatdeck_types::wire::{CompletionReply, CompletionRequest};
use crate::diagnostics::Diagnostic;
use crate::gateway::CompletionGateway;

/// Application state shared across routes
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<CompletionGateway>,
}

/// Create router with all API routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/health", get(health))
        .with_state(state)
}

/// POST /api/chat - Answer one chat turn
///
/// The body is read raw so that a missing content type or malformed JSON
/// still gets a `{reply}` with status 200 rather than an axum rejection.
async fn chat(State(state): State<AppState>, body: Bytes) -> Json<CompletionReply> {
    let request: CompletionRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            log::warn!("Unreadable chat request body: {}", e);
            return Json(Diagnostic::ServerError.reply());
        }
    };

    Json(state.gateway.complete(request).await)
}

/// GET /health - Liveness and credential presence (never the key itself)
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "credential_configured": state.gateway.has_credential(),
        "model": state.gateway.config().model,
    }))
}
