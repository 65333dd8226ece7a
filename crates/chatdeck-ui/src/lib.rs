//! egui panels and the UI-side projection of the session store.
//!
//! Nothing here talks to storage or the network: panels return actions and
//! the app layer carries them out.

pub mod image;
pub mod panels;
pub mod state;
pub mod theme;
