//! Port traits — the hexagonal architecture boundary.
//!
//! These traits are defined here in `chatdeck-core` (pure Rust).
//! Implementations live in `chatdeck-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use chatdeck_types::{
    Result,
    wire::{CompletionReply, CompletionRequest},
};

// ─── Completion Port ─────────────────────────────────────────

/// Whatever answers a chat turn: in the browser, the HTTP gateway.
#[async_trait(?Send)]
pub trait CompletionPort {
    /// Send one turn and wait for the reply.
    ///
    /// `Err` means the reply never arrived (transport failure). Provider-side
    /// failures come back as `Ok` with a diagnostic in `reply`.
    async fn complete(&self, req: CompletionRequest) -> Result<CompletionReply>;

    /// Where requests go (for logging/debug)
    fn endpoint(&self) -> &str;
}

// ─── Storage Port ────────────────────────────────────────────

#[async_trait(?Send)]
pub trait StoragePort {
    /// Get a value by key
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Set a value
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Delete a value
    async fn delete(&self, key: &str) -> Result<()>;

    /// List keys with a given prefix
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>>;

    /// Check if a key exists
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}
