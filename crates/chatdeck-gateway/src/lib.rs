//! chatdeck gateway — the server half.
//!
//! A single `POST /api/chat` endpoint: validate the turn, prepend the system
//! prompt to the caller's history, forward to the provider with the secret
//! key, and answer `{reply}`. Every failure is folded into `reply`.

pub mod config;
pub mod diagnostics;
pub mod upstream;
pub mod gateway;
pub mod routes;
pub mod server;

#[cfg(test)]
mod tests;

pub use diagnostics::Diagnostic;
pub use gateway::CompletionGateway;
