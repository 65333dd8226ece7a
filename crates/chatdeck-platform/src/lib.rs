//! Platform adapters for the browser.
//!
//! Storage backends and the gateway client implement the port traits from
//! `chatdeck-core`. Browser-only adapters compile on wasm32 only; the memory
//! backend is available everywhere.

pub mod storage;

#[cfg(target_arch = "wasm32")]
pub mod gateway_client;

#[cfg(target_arch = "wasm32")]
pub use gateway_client::GatewayClient;

#[cfg(test)]
mod tests;
