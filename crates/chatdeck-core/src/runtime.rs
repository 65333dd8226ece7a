//! Chat runtime — one user turn, end to end.
//!
//! 1. Append the user message to the originating session
//! 2. Slice the history window, ending with that new message
//! 3. Send message + image + history through the completion port
//! 4. Append the reply to the same session, even if the user has since
//!    switched elsewhere
//!
//! Only one turn may be outstanding at a time.

use std::cell::{RefCell, RefMut};
use std::rc::Rc;
use chatdeck_types::{
    ChatError, Result,
    config::CONNECTION_ERROR,
    event::ChatEvent,
    wire::CompletionRequest,
};
use crate::event_bus::EventBus;
use crate::history::build_history_window;
use crate::ports::CompletionPort;
use crate::store::SessionStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    AwaitingReply { session_id: String },
}

/// Clone-cheap handle; clones share the store, port and busy state.
#[derive(Clone)]
pub struct ChatRuntime {
    store: Rc<RefCell<SessionStore>>,
    completion: Rc<dyn CompletionPort>,
    event_bus: EventBus,
    state: Rc<RefCell<ChatState>>,
}

impl ChatRuntime {
    pub fn new(
        store: Rc<RefCell<SessionStore>>,
        completion: Rc<dyn CompletionPort>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            store,
            completion,
            event_bus,
            state: Rc::new(RefCell::new(ChatState::Idle)),
        }
    }

    pub fn store(&self) -> &Rc<RefCell<SessionStore>> {
        &self.store
    }

    pub fn state(&self) -> ChatState {
        self.state.borrow().clone()
    }

    pub fn is_busy(&self) -> bool {
        !matches!(*self.state.borrow(), ChatState::Idle)
    }

    /// Run one turn against `session_id`.
    ///
    /// Returns `Ok(false)` without doing anything when there is neither text
    /// nor an image. Must be spawned via `wasm_bindgen_futures::spawn_local`
    /// in the browser; it does not block the UI thread.
    pub async fn run_turn(
        &self,
        session_id: &str,
        text: &str,
        image: Option<String>,
    ) -> Result<bool> {
        let text = text.trim();
        let image = image.filter(|i| !i.trim().is_empty());
        if text.is_empty() && image.is_none() {
            return Ok(false);
        }
        if self.is_busy() {
            return Err(ChatError::Busy);
        }

        *self.state.borrow_mut() = ChatState::AwaitingReply {
            session_id: session_id.to_string(),
        };
        let result = self.exchange(session_id, text, image).await;
        *self.state.borrow_mut() = ChatState::Idle;

        if let Err(ref e) = result {
            log::error!("Chat turn failed for session {}: {}", session_id, e);
            self.event_bus.emit(ChatEvent::TurnFailed {
                session_id: session_id.to_string(),
                message: e.to_string(),
            });
        }
        result.map(|_| true)
    }

    /// The store, unless a spawned store action still holds it across a
    /// storage call.
    fn store_mut(&self) -> Result<RefMut<'_, SessionStore>> {
        self.store
            .try_borrow_mut()
            .map_err(|_| ChatError::Other("session store is in use, try again".to_string()))
    }

    async fn exchange(&self, session_id: &str, text: &str, image: Option<String>) -> Result<()> {
        let history = {
            let mut store = self.store_mut()?;
            let window = store.config().history_window;
            let messages = store
                .append_user_message(session_id, text, image.is_some())
                .await?;
            // the window ends with the turn just appended
            build_history_window(messages, window)
        };

        self.event_bus.emit(ChatEvent::RequestStarted {
            session_id: session_id.to_string(),
        });
        log::info!(
            "Sending turn for session {} to {} ({} history entries, image: {})",
            session_id,
            self.completion.endpoint(),
            history.len(),
            image.is_some()
        );

        let request = CompletionRequest {
            message: text.to_string(),
            image_base64: image,
            history,
        };
        let reply = match self.completion.complete(request).await {
            Ok(reply) => reply.reply,
            Err(e) => {
                log::warn!("Gateway unreachable: {}", e);
                CONNECTION_ERROR.to_string()
            }
        };

        self.store_mut()?
            .append_assistant_message(session_id, &reply)
            .await?;
        self.event_bus.emit(ChatEvent::ReplyReceived {
            session_id: session_id.to_string(),
        });
        Ok(())
    }
}
