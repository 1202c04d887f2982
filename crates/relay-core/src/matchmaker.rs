//! Available pool and pairing relation.
//!
//! Per-identifier state machine:
//!
//! ```text
//! Unregistered -> Available -> Paired -> Available (skip) -> Paired ...
//!                                     -> terminal (disconnect)
//! ```
//!
//! Invariants maintained here:
//! - the pairing relation is symmetric and irreflexive;
//! - an identifier is in the pool iff its state is `Available`;
//! - the pool holds no duplicates.
//!
//! The pairing pass is greedy and order-stable: the first two pool
//! members are matched, then the next two, until fewer than two
//! remain. It is not a maximum matching; with an even pool everyone
//! is matched, with an odd pool exactly one identifier stays behind.

use std::collections::HashMap;

use crate::events::{Outbound, ServerEvent};
use crate::participant::{ParticipantId, ParticipantState};

/// Pool of waiting participants plus the current pairing relation.
#[derive(Debug, Default)]
pub struct Matchmaker {
    /// State per known identifier. Only `Available` / `Paired` entries
    /// are stored; absence means `Unregistered`.
    states: HashMap<ParticipantId, ParticipantState>,

    /// Waiting identifiers, in arrival order. Arrival order is the
    /// pairing tie-break: first available, first matched.
    pool: Vec<ParticipantId>,
}

impl Matchmaker {
    pub fn new() -> Self {
        Matchmaker::default()
    }

    /// Current state of `id`.
    pub fn state_of(&self, id: &str) -> ParticipantState {
        self.states
            .get(id)
            .cloned()
            .unwrap_or(ParticipantState::Unregistered)
    }

    /// The current partner of `id`, if paired.
    pub fn partner_of(&self, id: &str) -> Option<&ParticipantId> {
        match self.states.get(id) {
            Some(ParticipantState::Paired { with }) => Some(with),
            _ => None,
        }
    }

    /// The waiting pool, in arrival order.
    pub fn pool(&self) -> &[ParticipantId] {
        &self.pool
    }

    /// Add `id` to the pool and run a pairing pass.
    ///
    /// A no-op when `id` is already waiting or already paired, so a
    /// re-registration never corrupts the pool.
    pub fn join_pool(&mut self, id: &str) -> Vec<Outbound> {
        match self.states.get(id) {
            Some(ParticipantState::Available) | Some(ParticipantState::Paired { .. }) => {
                return Vec::new();
            }
            Some(ParticipantState::Unregistered) | None => {}
        }

        self.states
            .insert(id.to_string(), ParticipantState::Available);
        self.pool.push(id.to_string());

        self.pairing_pass()
    }

    /// Dissolve the current pairing of `id` and put both sides back in
    /// the pool, leaver first. The former partner is notified with a
    /// `Skipped` event; the leaver hears nothing until re-paired.
    ///
    /// A no-op when `id` has no partner.
    pub fn skip(&mut self, id: &str) -> Vec<Outbound> {
        let partner = match self.states.get(id) {
            Some(ParticipantState::Paired { with }) => with.clone(),
            _ => return Vec::new(),
        };

        self.states
            .insert(id.to_string(), ParticipantState::Available);
        self.states
            .insert(partner.clone(), ParticipantState::Available);
        self.pool.push(id.to_string());
        self.pool.push(partner.clone());

        let mut outputs = vec![Outbound::one(partner, ServerEvent::Skipped)];
        outputs.extend(self.pairing_pass());
        outputs
    }

    /// Remove `id` entirely. If it was paired, the former partner is
    /// notified with `PartnerLeft` and returned to the pool; the
    /// leaver itself is never re-inserted.
    pub fn disconnect(&mut self, id: &str) -> Vec<Outbound> {
        self.pool.retain(|p| p != id);

        let mut outputs = Vec::new();

        if let Some(ParticipantState::Paired { with }) = self.states.remove(id) {
            self.states
                .insert(with.clone(), ParticipantState::Available);
            self.pool.push(with.clone());
            outputs.push(Outbound::one(with, ServerEvent::PartnerLeft));
        }

        outputs.extend(self.pairing_pass());
        outputs
    }

    /// Greedily match waiting participants in arrival order.
    ///
    /// Everyone in the pool is unpaired by invariant, so the pass is
    /// simply: pair off the front two until fewer than two remain.
    /// Both sides of each new pairing are notified with the partner's
    /// identifier.
    fn pairing_pass(&mut self) -> Vec<Outbound> {
        let mut outputs = Vec::new();

        while self.pool.len() >= 2 {
            let a = self.pool.remove(0);
            let b = self.pool.remove(0);

            self.states.insert(
                a.clone(),
                ParticipantState::Paired { with: b.clone() },
            );
            self.states.insert(
                b.clone(),
                ParticipantState::Paired { with: a.clone() },
            );

            outputs.push(Outbound::one(
                a.clone(),
                ServerEvent::Paired { partner: b.clone() },
            ));
            outputs.push(Outbound::one(b, ServerEvent::Paired { partner: a }));
        }

        outputs
    }
}
