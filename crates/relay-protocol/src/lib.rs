//! relay-protocol
//!
//! Wire-level encoding/decoding for the relay service.
//!
//! This crate is responsible for turning logical relay events
//! (`relay_core::ClientEvent` / `ServerEvent`) into UTF-8 JSON text
//! frames and back again.
//!
//! - [`wire_types`] : serde representations of every frame shape
//! - [`json_codec`] : the encode/decode entry points

pub mod wire_types;
pub mod json_codec;

pub use json_codec::{
    ProtocolError,
    decode_input,
    encode_input,
    decode_output,
    encode_output,
};
