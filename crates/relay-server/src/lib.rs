//! relay-server
//!
//! Multi-client async WebSocket server for the relay engine.

pub mod config;
pub mod types;
pub mod registry;
pub mod hub;
pub mod server;

// internal module, not re-exported
mod client;
