//! In-memory conversation log for direct-addressing deployments.
//!
//! History is keyed by the *unordered* pair of participants, so the
//! log of A talking to B and B talking to A is the same sequence.
//! Entries are append-only and live for the process lifetime; nothing
//! is compacted or persisted.

use std::collections::HashMap;

use chrono::{SecondsFormat, Utc};

use crate::participant::ParticipantId;

/// Canonical key for a two-party conversation.
///
/// The two identifiers are stored in lexicographic order so that
/// `(A, B)` and `(B, A)` resolve to the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConversationKey(ParticipantId, ParticipantId);

impl ConversationKey {
    pub fn new(a: &str, b: &str) -> Self {
        if a <= b {
            ConversationKey(a.to_string(), b.to_string())
        } else {
            ConversationKey(b.to_string(), a.to_string())
        }
    }
}

/// One stored message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Who sent it (one of the two key members).
    pub sender: ParticipantId,

    /// Message text, verbatim.
    pub message: String,

    /// RFC 3339 UTC timestamp, millisecond precision.
    pub timestamp: String,
}

/// Append-only store of all conversations seen by this process.
#[derive(Debug, Default)]
pub struct ConversationLog {
    entries: HashMap<ConversationKey, Vec<HistoryEntry>>,
}

impl ConversationLog {
    pub fn new() -> Self {
        ConversationLog::default()
    }

    /// Append one message to the conversation between `sender` and
    /// `recipient`. The timestamp is supplied by the caller so that
    /// the delivery and the acknowledgement can carry the same one.
    pub fn append(&mut self, sender: &str, recipient: &str, message: &str, timestamp: &str) {
        let key = ConversationKey::new(sender, recipient);
        self.entries.entry(key).or_default().push(HistoryEntry {
            sender: sender.to_string(),
            message: message.to_string(),
            timestamp: timestamp.to_string(),
        });
    }

    /// Full ordered history between `a` and `b`, oldest first.
    /// Empty if the two have never exchanged a message.
    pub fn history(&self, a: &str, b: &str) -> Vec<HistoryEntry> {
        self.entries
            .get(&ConversationKey::new(a, b))
            .cloned()
            .unwrap_or_default()
    }

    /// Number of distinct conversations stored.
    pub fn conversation_count(&self) -> usize {
        self.entries.len()
    }
}

/// Current time as an RFC 3339 UTC string with millisecond precision,
/// e.g. `2026-01-02T03:04:05.678Z`. This is the format carried in
/// [`HistoryEntry::timestamp`] and on the wire.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
