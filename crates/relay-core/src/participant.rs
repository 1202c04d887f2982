//! Participant identity and lifecycle state.

/// Identifier for a participant.
///
/// This is the client-chosen name supplied at registration. It is
/// intentionally opaque; uniqueness is only "last registration wins"
/// over the lifetime of the process.
pub type ParticipantId = String;

/// Lifecycle state of one identifier.
///
/// Every identifier is in exactly one of these states at any time.
/// The available pool holds precisely the identifiers whose state is
/// `Available`; a `Paired` identifier is never in the pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantState {
    /// Not currently registered (or already disconnected).
    Unregistered,

    /// Registered and waiting in the pool for a partner.
    Available,

    /// Matched with exactly one other identifier.
    Paired {
        /// The partner's identifier. Symmetric: if A is paired with B,
        /// B is paired with A.
        with: ParticipantId,
    },
}

impl ParticipantState {
    /// Returns `true` for `Paired { .. }`.
    pub fn is_paired(&self) -> bool {
        matches!(self, ParticipantState::Paired { .. })
    }
}
