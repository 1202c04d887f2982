//! Serde representations of every frame on the wire.
//!
//! Frames are JSON objects discriminated by a snake_case `"type"`
//! field. Roster-count fields keep their historical camelCase
//! spellings (`onlineUsers`, `totalUsers`); everything else matches
//! the Rust field name.
//!
//! Inbound frames (client → server):
//!
//! ```json
//! {"type": "register", "username": "alice"}
//! {"type": "message", "text": "hi"}
//! {"type": "skip"}
//! {"type": "direct_message", "recipient": "bob", "message": "hi"}
//! {"type": "get_users"}
//! {"type": "get_conversation", "with": "bob"}
//! ```
//!
//! Outbound frames (server → client): see [`WireOutput`]. Unknown
//! extra fields on inbound frames are ignored; a missing or unknown
//! `"type"` fails the decode.
//!
//! The conversions to and from the logical `relay_core` events live
//! here so the codec itself stays a thin serde_json wrapper.

use serde::{Deserialize, Serialize};

use relay_core::{ClientEvent, HistoryEntry, ServerEvent};

/// Inbound frame shapes (client → server).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WireInput {
    Register { username: String },
    Message { text: String },
    Skip,
    DirectMessage { recipient: String, message: String },
    GetUsers,
    GetConversation { with: String },
}

/// Outbound frame shapes (server → client).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WireOutput {
    Paired {
        partner: String,
    },
    Skipped,
    PartnerLeft,
    Message {
        from: String,
        text: String,
    },
    Registered {
        username: String,
        #[serde(rename = "onlineUsers")]
        online_users: Vec<String>,
        #[serde(rename = "totalUsers")]
        total_users: usize,
    },
    UserJoined {
        username: String,
        #[serde(rename = "totalUsers")]
        total_users: usize,
    },
    UserLeft {
        username: String,
        #[serde(rename = "totalUsers")]
        total_users: usize,
    },
    UserList {
        users: Vec<String>,
        #[serde(rename = "totalUsers")]
        total_users: usize,
    },
    DirectMessage {
        from: String,
        message: String,
        timestamp: String,
    },
    MessageSent {
        to: String,
        message: String,
        timestamp: String,
    },
    ConversationHistory {
        with: String,
        history: Vec<WireHistoryEntry>,
    },
    Error {
        message: String,
    },
}

/// One stored message inside a `conversation_history` frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireHistoryEntry {
    pub sender: String,
    pub message: String,
    pub timestamp: String,
}

// -----------------------------------------------------------------------------
// Conversions between wire and logical events
// -----------------------------------------------------------------------------

impl From<WireInput> for ClientEvent {
    fn from(wire: WireInput) -> Self {
        match wire {
            WireInput::Register { username } => ClientEvent::Register { username },
            WireInput::Message { text } => ClientEvent::Message { text },
            WireInput::Skip => ClientEvent::Skip,
            WireInput::DirectMessage { recipient, message } => {
                ClientEvent::DirectMessage { recipient, message }
            }
            WireInput::GetUsers => ClientEvent::GetUsers,
            WireInput::GetConversation { with } => ClientEvent::GetConversation { with },
        }
    }
}

impl From<&ClientEvent> for WireInput {
    fn from(event: &ClientEvent) -> Self {
        match event {
            ClientEvent::Register { username } => WireInput::Register {
                username: username.clone(),
            },
            ClientEvent::Message { text } => WireInput::Message { text: text.clone() },
            ClientEvent::Skip => WireInput::Skip,
            ClientEvent::DirectMessage { recipient, message } => WireInput::DirectMessage {
                recipient: recipient.clone(),
                message: message.clone(),
            },
            ClientEvent::GetUsers => WireInput::GetUsers,
            ClientEvent::GetConversation { with } => WireInput::GetConversation {
                with: with.clone(),
            },
        }
    }
}

impl From<WireHistoryEntry> for HistoryEntry {
    fn from(wire: WireHistoryEntry) -> Self {
        HistoryEntry {
            sender: wire.sender,
            message: wire.message,
            timestamp: wire.timestamp,
        }
    }
}

impl From<&HistoryEntry> for WireHistoryEntry {
    fn from(entry: &HistoryEntry) -> Self {
        WireHistoryEntry {
            sender: entry.sender.clone(),
            message: entry.message.clone(),
            timestamp: entry.timestamp.clone(),
        }
    }
}

impl From<WireOutput> for ServerEvent {
    fn from(wire: WireOutput) -> Self {
        match wire {
            WireOutput::Paired { partner } => ServerEvent::Paired { partner },
            WireOutput::Skipped => ServerEvent::Skipped,
            WireOutput::PartnerLeft => ServerEvent::PartnerLeft,
            WireOutput::Message { from, text } => ServerEvent::Message { from, text },
            WireOutput::Registered {
                username,
                online_users,
                total_users,
            } => ServerEvent::Registered {
                username,
                online_users,
                total_users,
            },
            WireOutput::UserJoined {
                username,
                total_users,
            } => ServerEvent::UserJoined {
                username,
                total_users,
            },
            WireOutput::UserLeft {
                username,
                total_users,
            } => ServerEvent::UserLeft {
                username,
                total_users,
            },
            WireOutput::UserList { users, total_users } => ServerEvent::UserList {
                users,
                total_users,
            },
            WireOutput::DirectMessage {
                from,
                message,
                timestamp,
            } => ServerEvent::DirectMessage {
                from,
                message,
                timestamp,
            },
            WireOutput::MessageSent {
                to,
                message,
                timestamp,
            } => ServerEvent::MessageSent {
                to,
                message,
                timestamp,
            },
            WireOutput::ConversationHistory { with, history } => {
                ServerEvent::ConversationHistory {
                    with,
                    history: history.into_iter().map(Into::into).collect(),
                }
            }
            WireOutput::Error { message } => ServerEvent::Error { message },
        }
    }
}

impl From<&ServerEvent> for WireOutput {
    fn from(event: &ServerEvent) -> Self {
        match event {
            ServerEvent::Paired { partner } => WireOutput::Paired {
                partner: partner.clone(),
            },
            ServerEvent::Skipped => WireOutput::Skipped,
            ServerEvent::PartnerLeft => WireOutput::PartnerLeft,
            ServerEvent::Message { from, text } => WireOutput::Message {
                from: from.clone(),
                text: text.clone(),
            },
            ServerEvent::Registered {
                username,
                online_users,
                total_users,
            } => WireOutput::Registered {
                username: username.clone(),
                online_users: online_users.clone(),
                total_users: *total_users,
            },
            ServerEvent::UserJoined {
                username,
                total_users,
            } => WireOutput::UserJoined {
                username: username.clone(),
                total_users: *total_users,
            },
            ServerEvent::UserLeft {
                username,
                total_users,
            } => WireOutput::UserLeft {
                username: username.clone(),
                total_users: *total_users,
            },
            ServerEvent::UserList { users, total_users } => WireOutput::UserList {
                users: users.clone(),
                total_users: *total_users,
            },
            ServerEvent::DirectMessage {
                from,
                message,
                timestamp,
            } => WireOutput::DirectMessage {
                from: from.clone(),
                message: message.clone(),
                timestamp: timestamp.clone(),
            },
            ServerEvent::MessageSent {
                to,
                message,
                timestamp,
            } => WireOutput::MessageSent {
                to: to.clone(),
                message: message.clone(),
                timestamp: timestamp.clone(),
            },
            ServerEvent::ConversationHistory { with, history } => {
                WireOutput::ConversationHistory {
                    with: with.clone(),
                    history: history.iter().map(Into::into).collect(),
                }
            }
            ServerEvent::Error { message } => WireOutput::Error {
                message: message.clone(),
            },
        }
    }
}
