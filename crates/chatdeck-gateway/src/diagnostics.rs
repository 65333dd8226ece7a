use std::fmt;
use chatdeck_types::wire::CompletionReply;

/// Fixed replies sent in place of a model answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// Neither text nor image in the request
    EmptyMessage,
    /// No provider key in the process environment
    MissingCredential,
    /// The provider answered without a usable first choice
    NoResponse,
    /// Transport failure, timeout, or an unreadable body
    ServerError,
}

impl Diagnostic {
    pub fn text(self) -> &'static str {
        match self {
            Diagnostic::EmptyMessage => "Message is empty. Type a question or attach an image.",
            Diagnostic::MissingCredential => {
                "OPENAI_API_KEY is not set.\n\n\
                 Fix: add OPENAI_API_KEY to the gateway environment (or .env) and restart it."
            }
            Diagnostic::NoResponse => "The model did not respond. Check the API key or rate limit.",
            Diagnostic::ServerError => "Server error. Check the gateway logs and configuration.",
        }
    }

    pub fn reply(self) -> CompletionReply {
        CompletionReply::new(self.text())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
