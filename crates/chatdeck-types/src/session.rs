use serde::{Deserialize, Serialize};
use crate::config::DEFAULT_TITLE;
use crate::message::Message;

/// A persisted conversation thread.
///
/// Everything but the id falls back to a default when missing from stored data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub messages: Vec<Message>,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl Session {
    /// Fresh session with a new id, seeded with one assistant greeting.
    pub fn new(title: impl Into<String>, greeting: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            created_at: chrono::Utc::now().to_rfc3339(),
            messages: vec![Message::assistant(greeting)],
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            created_at: self.created_at.clone(),
            message_count: self.messages.len(),
        }
    }
}

/// Summary of a session for listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    pub title: String,
    pub created_at: String,
    pub message_count: usize,
}
