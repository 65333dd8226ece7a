//! Session store — owns the session collection and the active pointer.
//!
//! Every mutation is followed by a full re-serialization of the collection
//! under a single storage key. The collection is never empty: startup with
//! missing or unreadable data, and deleting the last session, both leave
//! exactly one fresh default session behind.

use std::rc::Rc;
use chatdeck_types::{
    ChatError, Result,
    config::{NO_REPLY_FALLBACK, StoreConfig},
    event::ChatEvent,
    message::Message,
    session::{Session, SessionSummary},
    wire::HistoryEntry,
};
use crate::event_bus::EventBus;
use crate::history::{build_history_window, derive_title};
use crate::ports::StoragePort;

/// What `delete_session` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Removed; other sessions remain
    Removed,
    /// Removed the last session; storage was wiped and a default session stands in
    Reset,
    /// No session with that id
    NotFound,
}

pub struct SessionStore {
    sessions: Vec<Session>,
    active_id: String,
    config: StoreConfig,
    storage: Rc<dyn StoragePort>,
    event_bus: EventBus,
}

impl SessionStore {
    /// Rehydrate from storage, or start over with one default session.
    pub async fn load(
        storage: Rc<dyn StoragePort>,
        config: StoreConfig,
        event_bus: EventBus,
    ) -> Result<Self> {
        let restored = match storage.get(&config.storage_key).await {
            Ok(Some(bytes)) => match serde_json::from_slice::<Vec<Session>>(&bytes) {
                Ok(sessions) if !sessions.is_empty() => Some(sessions),
                Ok(_) => None,
                Err(e) => {
                    log::warn!("Discarding unreadable session data: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("Session storage read failed ({}), starting fresh", e);
                None
            }
        };

        match restored {
            Some(sessions) => {
                log::info!(
                    "Restored {} session(s) from {}",
                    sessions.len(),
                    storage.backend_name()
                );
                let active_id = sessions[0].id.clone();
                Ok(Self {
                    sessions,
                    active_id,
                    config,
                    storage,
                    event_bus,
                })
            }
            None => {
                let store = Self::fresh(storage, config, event_bus);
                store.persist().await?;
                Ok(store)
            }
        }
    }

    fn fresh(storage: Rc<dyn StoragePort>, config: StoreConfig, event_bus: EventBus) -> Self {
        let session = Session::new(&config.default_title, &config.greeting);
        Self {
            active_id: session.id.clone(),
            sessions: vec![session],
            config,
            storage,
            event_bus,
        }
    }

    // ─── Reads ───────────────────────────────────────────────

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn summaries(&self) -> Vec<SessionSummary> {
        self.sessions.iter().map(Session::summary).collect()
    }

    pub fn active_id(&self) -> &str {
        &self.active_id
    }

    /// The session `active_id` points at, or the head if it no longer resolves.
    pub fn active_session(&self) -> Option<&Session> {
        self.get(&self.active_id).or_else(|| self.sessions.first())
    }

    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Last `history_window` messages of `messages` in wire form.
    pub fn history_window(&self, messages: &[Message]) -> Vec<HistoryEntry> {
        build_history_window(messages, self.config.history_window)
    }

    // ─── Mutations ───────────────────────────────────────────

    /// New session at the front, seeded with a greeting, made active.
    pub async fn create_session(&mut self) -> Result<String> {
        let session = Session::new(&self.config.default_title, &self.config.greeting);
        let id = session.id.clone();
        self.sessions.insert(0, session);
        self.active_id = id.clone();
        self.persist().await?;
        self.event_bus.emit(ChatEvent::SessionCreated { session_id: id.clone() });
        Ok(id)
    }

    pub async fn delete_session(&mut self, id: &str) -> Result<DeleteOutcome> {
        let Some(index) = self.sessions.iter().position(|s| s.id == id) else {
            return Ok(DeleteOutcome::NotFound);
        };
        self.sessions.remove(index);
        self.event_bus.emit(ChatEvent::SessionDeleted { session_id: id.to_string() });

        if self.sessions.is_empty() {
            // the store is never empty, even when the wipe below fails
            let session = Session::new(&self.config.default_title, &self.config.greeting);
            self.active_id = session.id.clone();
            self.sessions.push(session);
            self.event_bus.emit(ChatEvent::StoreReset);
            self.storage.delete(&self.config.storage_key).await?;
            return Ok(DeleteOutcome::Reset);
        }

        if self.active_id == id {
            self.active_id = self.sessions[0].id.clone();
            self.event_bus.emit(ChatEvent::SessionSwitched {
                session_id: self.active_id.clone(),
            });
        }
        self.persist().await?;
        Ok(DeleteOutcome::Removed)
    }

    pub async fn switch_session(&mut self, id: &str) -> Result<()> {
        if self.get(id).is_none() {
            return Err(ChatError::SessionNotFound(id.to_string()));
        }
        self.active_id = id.to_string();
        self.persist().await?;
        self.event_bus.emit(ChatEvent::SessionSwitched { session_id: id.to_string() });
        Ok(())
    }

    /// Append a user turn and return the session's updated messages.
    ///
    /// An attached image is recorded as a marker line only. The first
    /// non-blank text replaces the placeholder title.
    pub async fn append_user_message(
        &mut self,
        session_id: &str,
        text: &str,
        has_image: bool,
    ) -> Result<&[Message]> {
        let default_title = self.config.default_title.clone();
        let max_chars = self.config.title_max_chars;
        let index = self.index_of(session_id)?;

        let session = &mut self.sessions[index];
        let message = if has_image {
            Message::user_with_image_marker(text)
        } else {
            Message::user(text)
        };
        session.messages.push(message);

        if session.title == default_title {
            if let Some(title) = derive_title(text, max_chars) {
                session.title = title;
            }
        }

        self.persist().await?;
        Ok(&self.sessions[index].messages)
    }

    /// Append an assistant turn. Blank text becomes the fixed fallback.
    pub async fn append_assistant_message(&mut self, session_id: &str, text: &str) -> Result<()> {
        let index = self.index_of(session_id)?;
        let body = if text.trim().is_empty() { NO_REPLY_FALLBACK } else { text };
        self.sessions[index].messages.push(Message::assistant(body));
        self.persist().await
    }

    /// Reset a session's messages to a single greeting. Title and id stay.
    pub async fn clear_session(&mut self, session_id: &str) -> Result<()> {
        let index = self.index_of(session_id)?;
        self.sessions[index].messages = vec![Message::assistant(&self.config.greeting)];
        self.persist().await
    }

    // ─── Persistence ─────────────────────────────────────────

    /// Write the whole collection under the configured key.
    pub async fn persist(&self) -> Result<()> {
        let bytes = serde_json::to_vec(&self.sessions)?;
        self.storage.set(&self.config.storage_key, &bytes).await
    }

    fn index_of(&self, id: &str) -> Result<usize> {
        self.sessions
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| ChatError::SessionNotFound(id.to_string()))
    }
}
