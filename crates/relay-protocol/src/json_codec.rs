//! JSON encoding/decoding for relay-core events.
//!
//! One frame per call: the WebSocket transport already delimits
//! messages, so there is no extra framing to do here. Decoding a
//! frame that is not valid JSON, has no known `"type"`, or is missing
//! a required field yields [`ProtocolError::Malformed`]; the caller
//! is expected to drop such frames without a response.

use std::fmt;

use relay_core::{ClientEvent, ServerEvent};

use crate::wire_types::{WireInput, WireOutput};

/// Errors that can arise when encoding/decoding a text frame.
#[derive(Debug)]
pub enum ProtocolError {
    /// The frame is not valid JSON or not a known frame shape.
    Malformed(String),

    /// An event could not be serialized.
    Encode(String),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::Malformed(detail) => write!(f, "malformed frame: {}", detail),
            ProtocolError::Encode(detail) => write!(f, "encode failure: {}", detail),
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Decode one inbound text frame into a [`ClientEvent`].
pub fn decode_input(text: &str) -> Result<ClientEvent, ProtocolError> {
    let wire: WireInput =
        serde_json::from_str(text).map_err(|e| ProtocolError::Malformed(e.to_string()))?;
    Ok(wire.into())
}

/// Encode a [`ClientEvent`] as an inbound text frame (client side).
pub fn encode_input(event: &ClientEvent) -> Result<String, ProtocolError> {
    serde_json::to_string(&WireInput::from(event))
        .map_err(|e| ProtocolError::Encode(e.to_string()))
}

/// Decode one outbound text frame into a [`ServerEvent`] (client side).
pub fn decode_output(text: &str) -> Result<ServerEvent, ProtocolError> {
    let wire: WireOutput =
        serde_json::from_str(text).map_err(|e| ProtocolError::Malformed(e.to_string()))?;
    Ok(wire.into())
}

/// Encode a [`ServerEvent`] as an outbound text frame.
pub fn encode_output(event: &ServerEvent) -> Result<String, ProtocolError> {
    serde_json::to_string(&WireOutput::from(event))
        .map_err(|e| ProtocolError::Encode(e.to_string()))
}
