//! The gateway's HTTP contract: one request shape in, one reply shape out.
//!
//! Every field of the request has a default so that a partial body from an
//! untrusted client still decodes; failures travel inside `reply`.

use serde::{Deserialize, Deserializer, Serialize};
use crate::message::{Message, Role};

/// One prior turn as the client sends it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

impl HistoryEntry {
    pub fn from_message(msg: &Message) -> Self {
        Self {
            role: msg.role,
            content: msg.content.as_text().to_string(),
        }
    }

    pub fn into_message(self) -> Message {
        Message {
            role: self.role,
            content: crate::message::MessageContent::Text(self.content),
        }
    }
}

/// `POST /api/chat` body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default)]
    pub image_base64: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub history: Vec<HistoryEntry>,
}

/// An explicit `null` decodes the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl CompletionRequest {
    /// The attached image, if any. A blank string counts as absent.
    pub fn image(&self) -> Option<&str> {
        self.image_base64
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }
}

/// `POST /api/chat` response, always this shape whether or not the turn succeeded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionReply {
    #[serde(default)]
    pub reply: String,
}

impl CompletionReply {
    pub fn new(reply: impl Into<String>) -> Self {
        Self { reply: reply.into() }
    }
}
