pub mod ports;
pub mod event_bus;
pub mod history;
pub mod store;
pub mod runtime;
