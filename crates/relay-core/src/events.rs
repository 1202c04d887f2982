//! Logical events flowing through the relay.
//!
//! These are **transport-agnostic** messages:
//! - [`ClientEvent`]: what a participant's connection feeds in.
//! - [`ServerEvent`]: what the relay produces for delivery.
//! - [`Outbound`]: a produced event together with its destination.
//!
//! Note: the JSON encoders live in the `relay-protocol` crate; this
//! module is purely logical.

use crate::conversation::HistoryEntry;
use crate::participant::ParticipantId;

/// A decoded request from a participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// Claim an identifier for this connection.
    Register { username: String },

    /// Relay text to the current partner (paired mode).
    Message { text: String },

    /// Dissolve the current pairing and wait for a new partner
    /// (paired mode).
    Skip,

    /// Send text to a named recipient (direct mode).
    DirectMessage {
        recipient: ParticipantId,
        message: String,
    },

    /// Request the current online roster (direct mode).
    GetUsers,

    /// Request the stored history with a counterpart (direct mode).
    GetConversation { with: ParticipantId },
}

/// An event produced by the relay for one or more participants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// A partner was found; carries the partner's identifier.
    Paired { partner: ParticipantId },

    /// The partner chose to skip; the receiver is back in the pool.
    Skipped,

    /// The partner disconnected; the receiver is back in the pool.
    PartnerLeft,

    /// Relayed text from the current partner.
    Message { from: ParticipantId, text: String },

    /// Registration acknowledgement with a snapshot of who else is
    /// online and the total count (receiver included).
    Registered {
        username: ParticipantId,
        online_users: Vec<ParticipantId>,
        total_users: usize,
    },

    /// Another participant registered.
    UserJoined {
        username: ParticipantId,
        total_users: usize,
    },

    /// A participant disconnected.
    UserLeft {
        username: ParticipantId,
        total_users: usize,
    },

    /// Roster snapshot, excluding the requester.
    UserList {
        users: Vec<ParticipantId>,
        total_users: usize,
    },

    /// Incoming direct message.
    DirectMessage {
        from: ParticipantId,
        message: String,
        timestamp: String,
    },

    /// Acknowledgement that a direct message was delivered and logged.
    MessageSent {
        to: ParticipantId,
        message: String,
        timestamp: String,
    },

    /// Full stored history with a counterpart, oldest first.
    ConversationHistory {
        with: ParticipantId,
        history: Vec<HistoryEntry>,
    },

    /// Something the sender should know went wrong (e.g. recipient not
    /// online). Protocol-level garbage gets no response at all.
    Error { message: String },
}

impl ServerEvent {
    /// Convenience constructor for a relayed partner message.
    pub fn message(from: impl Into<ParticipantId>, text: impl Into<String>) -> Self {
        ServerEvent::Message {
            from: from.into(),
            text: text.into(),
        }
    }

    /// Convenience constructor for an error event.
    pub fn error(message: impl Into<String>) -> Self {
        ServerEvent::Error {
            message: message.into(),
        }
    }
}

/// Who an outbound event is for.
///
/// Delivery through the connection registry is best-effort in every
/// case: a destination that is no longer connected is skipped silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Exactly one participant.
    One(ParticipantId),

    /// Every live connection.
    Everyone,

    /// Every live connection except the named participant.
    EveryoneExcept(ParticipantId),
}

/// A [`ServerEvent`] paired with its destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub to: Destination,
    pub event: ServerEvent,
}

impl Outbound {
    /// Event for a single participant.
    pub fn one(id: impl Into<ParticipantId>, event: ServerEvent) -> Self {
        Outbound {
            to: Destination::One(id.into()),
            event,
        }
    }

    /// Event for every live connection.
    pub fn everyone(event: ServerEvent) -> Self {
        Outbound {
            to: Destination::Everyone,
            event,
        }
    }

    /// Event for everyone but `id`.
    pub fn everyone_except(id: impl Into<ParticipantId>, event: ServerEvent) -> Self {
        Outbound {
            to: Destination::EveryoneExcept(id.into()),
            event,
        }
    }
}
