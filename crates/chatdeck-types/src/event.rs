use serde::{Deserialize, Serialize};

/// Events emitted by the session store and chat runtime.
/// UI subscribes to these for reactive updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChatEvent {
    /// A new session was created and made active
    SessionCreated { session_id: String },

    /// The active pointer moved to another session
    SessionSwitched { session_id: String },

    /// A session was removed
    SessionDeleted { session_id: String },

    /// The last session was deleted; persisted state was wiped
    StoreReset,

    /// A completion request for this session is outstanding
    RequestStarted { session_id: String },

    /// The reply (or its diagnostic) was appended to this session
    ReplyReceived { session_id: String },

    /// A turn for this session ended without a reply being recorded
    TurnFailed { session_id: String, message: String },

    /// An error outside any turn (store actions, startup)
    Error { message: String },
}
