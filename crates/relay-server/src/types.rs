//! Shared types for the relay WebSocket server.
//!
//! This module defines:
//! - `ConnId`: a lightweight handle for accepted sockets
//! - channel aliases between connection tasks and the hub loop
//! - `HubRequest`: messages flowing from connections to the hub

use relay_core::{ClientEvent, ParticipantId, ServerEvent};
use tokio::sync::mpsc;

/// Identifier for one accepted socket.
///
/// This is intentionally opaque; we just guarantee uniqueness over
/// the lifetime of the process. It is distinct from the participant
/// identifier: when the same participant registers again from a new
/// socket, the new `ConnId` tells the hub which session is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnId(pub u64);

/// Outbound events from the hub to a given connection.
pub type OutboundTx = mpsc::UnboundedSender<ServerEvent>;
pub type OutboundRx = mpsc::UnboundedReceiver<ServerEvent>;

/// Message flowing from a connection task into the central hub task.
#[derive(Debug)]
pub enum HubRequest {
    /// The connection claimed an identifier.
    Register {
        conn: ConnId,
        id: ParticipantId,
        handle: OutboundTx,
    },

    /// A decoded event from a registered connection.
    Event {
        conn: ConnId,
        id: ParticipantId,
        event: ClientEvent,
    },

    /// The connection is gone (close frame, transport error, or a
    /// rename retiring the old identifier).
    Disconnect { conn: ConnId, id: ParticipantId },
}

/// Channel from connections → hub task.
pub type HubTx = mpsc::UnboundedSender<HubRequest>;
pub type HubRx = mpsc::UnboundedReceiver<HubRequest>;
