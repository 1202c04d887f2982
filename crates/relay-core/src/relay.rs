//! Relay engine: the single owner of all conversational state.
//!
//! The engine consumes one [`ClientEvent`] at a time for a given
//! sender and returns the outbound events to deliver, leaving actual
//! delivery to the caller. It never blocks and never fails in the
//! domain sense: events that are malformed, inapplicable to the
//! configured [`Mode`], or sent from the wrong state are dropped
//! without mutating anything.
//!
//! Registration and disconnection flow through [`RelayEngine::register`]
//! and [`RelayEngine::disconnect`] so the caller can keep its
//! connection bookkeeping in step; a `ClientEvent::Register` arriving
//! through [`RelayEngine::process`] is therefore ignored.

use crate::conversation::{self, ConversationLog, HistoryEntry};
use crate::events::{ClientEvent, Outbound, ServerEvent};
use crate::matchmaker::Matchmaker;
use crate::mode::Mode;
use crate::participant::ParticipantId;

/// Engine for one deployment variant.
///
/// Owns the roster, the matchmaker (paired mode), and the conversation
/// log (direct mode). The unused half stays empty; it costs nothing
/// and keeps the two variants symmetric to drive.
#[derive(Debug)]
pub struct RelayEngine {
    mode: Mode,

    /// Registered identifiers, in registration order.
    roster: Vec<ParticipantId>,

    matchmaker: Matchmaker,
    conversations: ConversationLog,
}

impl RelayEngine {
    pub fn new(mode: Mode) -> Self {
        RelayEngine {
            mode,
            roster: Vec::new(),
            matchmaker: Matchmaker::new(),
            conversations: ConversationLog::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Registered identifiers, in registration order.
    pub fn roster(&self) -> &[ParticipantId] {
        &self.roster
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.roster.iter().any(|r| r == id)
    }

    /// Current partner of `id`, if any (paired mode).
    pub fn partner_of(&self, id: &str) -> Option<&ParticipantId> {
        self.matchmaker.partner_of(id)
    }

    /// The waiting pool, in arrival order (paired mode).
    pub fn pool(&self) -> &[ParticipantId] {
        self.matchmaker.pool()
    }

    /// Stored history between `a` and `b`, oldest first (direct mode).
    pub fn history(&self, a: &str, b: &str) -> Vec<HistoryEntry> {
        self.conversations.history(a, b)
    }

    /// Register `id`.
    ///
    /// - paired mode: joins the pool (which may immediately pair) and
    ///   sends no acknowledgement of its own.
    /// - direct mode: acknowledges with the online snapshot; when the
    ///   identifier is new, everyone else is told about the join. A
    ///   re-registration only refreshes the acknowledgement: the
    ///   roster did not change, so no join is broadcast.
    pub fn register(&mut self, id: &str) -> Vec<Outbound> {
        let is_new = !self.is_registered(id);
        if is_new {
            self.roster.push(id.to_string());
        }

        match self.mode {
            Mode::Paired => self.matchmaker.join_pool(id),
            Mode::Direct => {
                let mut outputs = vec![Outbound::one(
                    id,
                    ServerEvent::Registered {
                        username: id.to_string(),
                        online_users: self.others(id),
                        total_users: self.roster.len(),
                    },
                )];

                if is_new {
                    outputs.push(Outbound::everyone_except(
                        id,
                        ServerEvent::UserJoined {
                            username: id.to_string(),
                            total_users: self.roster.len(),
                        },
                    ));
                }

                outputs
            }
        }
    }

    /// Remove `id` permanently.
    ///
    /// The caller must already have unregistered the connection handle
    /// so none of the returned events can target the leaver.
    pub fn disconnect(&mut self, id: &str) -> Vec<Outbound> {
        let was_registered = self.is_registered(id);
        self.roster.retain(|r| r != id);

        match self.mode {
            Mode::Paired => self.matchmaker.disconnect(id),
            Mode::Direct => {
                if !was_registered {
                    return Vec::new();
                }
                vec![Outbound::everyone(ServerEvent::UserLeft {
                    username: id.to_string(),
                    total_users: self.roster.len(),
                })]
            }
        }
    }

    /// Process one event from `sender`, stamping direct messages with
    /// the current time.
    pub fn process(&mut self, sender: &str, event: ClientEvent) -> Vec<Outbound> {
        let now = conversation::now_timestamp();
        self.process_at(sender, event, &now)
    }

    /// Process one event from `sender` with an explicit timestamp.
    ///
    /// The timestamp is used once per direct-message send, so the
    /// delivery and the acknowledgement always agree.
    pub fn process_at(&mut self, sender: &str, event: ClientEvent, now: &str) -> Vec<Outbound> {
        match (self.mode, event) {
            (Mode::Paired, ClientEvent::Message { text }) => {
                match self.matchmaker.partner_of(sender) {
                    Some(partner) => {
                        vec![Outbound::one(
                            partner.clone(),
                            ServerEvent::message(sender, text),
                        )]
                    }
                    // Unpaired senders have nobody to talk to.
                    None => Vec::new(),
                }
            }

            (Mode::Paired, ClientEvent::Skip) => self.matchmaker.skip(sender),

            (Mode::Direct, ClientEvent::DirectMessage { recipient, message }) => {
                self.direct_message(sender, &recipient, &message, now)
            }

            (Mode::Direct, ClientEvent::GetUsers) => {
                vec![Outbound::one(
                    sender,
                    ServerEvent::UserList {
                        users: self.others(sender),
                        total_users: self.roster.len(),
                    },
                )]
            }

            (Mode::Direct, ClientEvent::GetConversation { with }) => {
                let history = self.conversations.history(sender, &with);
                vec![Outbound::one(
                    sender,
                    ServerEvent::ConversationHistory { with, history },
                )]
            }

            // Register flows through `register`; everything else is an
            // event for the other mode. Drop, no state change.
            _ => Vec::new(),
        }
    }

    fn direct_message(
        &mut self,
        sender: &str,
        recipient: &str,
        message: &str,
        now: &str,
    ) -> Vec<Outbound> {
        if !self.is_registered(recipient) {
            return vec![Outbound::one(sender, ServerEvent::error("User not online"))];
        }

        self.conversations.append(sender, recipient, message, now);

        vec![
            Outbound::one(
                recipient,
                ServerEvent::DirectMessage {
                    from: sender.to_string(),
                    message: message.to_string(),
                    timestamp: now.to_string(),
                },
            ),
            Outbound::one(
                sender,
                ServerEvent::MessageSent {
                    to: recipient.to_string(),
                    message: message.to_string(),
                    timestamp: now.to_string(),
                },
            ),
        ]
    }

    /// Everyone registered except `id`, in registration order.
    fn others(&self, id: &str) -> Vec<ParticipantId> {
        self.roster.iter().filter(|r| *r != id).cloned().collect()
    }
}
