//! relay-core
//!
//! Pure relay logic:
//! - participant identifiers and per-participant state
//! - logical events (inbound/outbound) and routing destinations
//! - available pool + pairing (matchmaker)
//! - per-pair conversation log
//! - relay engine orchestrating both addressing modes

pub mod participant;
pub mod mode;
pub mod events;
pub mod conversation;
pub mod matchmaker;
pub mod relay;

pub use participant::{ParticipantId, ParticipantState};
pub use mode::Mode;

pub use events::{
    ClientEvent,
    Destination,
    Outbound,
    ServerEvent,
};

pub use conversation::{ConversationKey, ConversationLog, HistoryEntry};
pub use matchmaker::Matchmaker;
pub use relay::RelayEngine;
