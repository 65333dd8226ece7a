//! UI-level state that drives rendering.
//! Messages and sessions are read straight from the store each frame; this
//! holds only what the store doesn't: the draft, the pending image and the
//! busy/status line, updated by draining the EventBus.

use chatdeck_types::event::ChatEvent;
use crate::image::PendingImage;

pub const STATUS_READY: &str = "Ready";
pub const STATUS_WAITING: &str = "Analyzing...";

/// State visible to UI panels
pub struct UiState {
    /// Input field content
    pub input_text: String,
    /// Image to attach to the next send
    pub pending_image: Option<PendingImage>,
    /// A reply is outstanding
    pub busy: bool,
    /// Status line text
    pub status_text: String,
    /// Whether the tips popup is open
    pub show_tips: bool,
}

/// What the user submitted from the chat panel
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub text: String,
    pub image: Option<PendingImage>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            input_text: String::new(),
            pending_image: None,
            busy: false,
            status_text: STATUS_READY.to_string(),
            show_tips: false,
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<ChatEvent>) {
        for event in events {
            match event {
                ChatEvent::SessionCreated { .. }
                | ChatEvent::SessionSwitched { .. }
                | ChatEvent::StoreReset => {
                    // a draft belongs to the conversation it was typed in
                    self.input_text.clear();
                    self.pending_image = None;
                    if !self.busy {
                        self.status_text = STATUS_READY.to_string();
                    }
                }
                ChatEvent::SessionDeleted { .. } => {
                    if !self.busy {
                        self.status_text = "Chat deleted".to_string();
                    }
                }
                ChatEvent::RequestStarted { .. } => {
                    self.busy = true;
                    self.status_text = STATUS_WAITING.to_string();
                }
                ChatEvent::ReplyReceived { .. } => {
                    self.busy = false;
                    self.status_text = STATUS_READY.to_string();
                }
                ChatEvent::TurnFailed { message, .. } => {
                    self.busy = false;
                    self.status_text = format!("Error: {}", message);
                }
                // not tied to the outstanding turn, so busy stays as it is
                ChatEvent::Error { message } => {
                    self.status_text = format!("Error: {}", message);
                }
            }
        }
    }

    pub fn can_send(&self) -> bool {
        !self.busy && (!self.input_text.trim().is_empty() || self.pending_image.is_some())
    }

    /// Take the draft and pending image for sending, leaving both empty, and
    /// mark the UI busy until the runtime reports back.
    /// `None` when busy or there is nothing to send.
    pub fn take_submission(&mut self) -> Option<Submission> {
        if !self.can_send() {
            return None;
        }
        let text = self.input_text.trim().to_string();
        self.input_text.clear();
        self.busy = true;
        self.status_text = STATUS_WAITING.to_string();
        Some(Submission {
            text,
            image: self.pending_image.take(),
        })
    }

    pub fn attach_image(&mut self, image: PendingImage) {
        self.status_text = format!("Attached {}", image.label());
        self.pending_image = Some(image);
    }

    pub fn remove_image(&mut self) {
        self.pending_image = None;
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
