//! Registry of live connections and their outbound channels.
//!
//! The registry is the only place that maps a participant identifier
//! to a transport handle. It is owned exclusively by the hub task, so
//! no locking is needed; everything that mutates it goes through the
//! hub's single request loop.
//!
//! Delivery is best-effort by contract: sending to an identifier that
//! is not registered, or whose channel has closed, reports `false`
//! and is otherwise a no-op. Callers discard the outcome wherever
//! best-effort semantics are intended.

use std::collections::HashMap;

use relay_core::{Destination, Outbound, ParticipantId, ServerEvent};

use crate::types::{ConnId, OutboundTx};

/// Live connections, keyed by participant identifier.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: HashMap<ParticipantId, (ConnId, OutboundTx)>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        ConnectionRegistry::default()
    }

    /// Install or silently replace the handle for `id`.
    ///
    /// Returns the `ConnId` of the session that was replaced, if any.
    pub fn register(
        &mut self,
        id: ParticipantId,
        conn: ConnId,
        handle: OutboundTx,
    ) -> Option<ConnId> {
        self.connections
            .insert(id, (conn, handle))
            .map(|(old_conn, _)| old_conn)
    }

    /// Remove the mapping for `id`. Returns `true` if it existed.
    ///
    /// Must happen before any engine cleanup so that nothing routed
    /// afterwards can target the dead handle.
    pub fn unregister(&mut self, id: &str) -> bool {
        self.connections.remove(id).is_some()
    }

    /// The socket currently bound to `id`, if any.
    pub fn current_conn(&self, id: &str) -> Option<ConnId> {
        self.connections.get(id).map(|(conn, _)| *conn)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.connections.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Best-effort unicast. `false` means the event was dropped.
    pub fn send(&self, id: &str, event: ServerEvent) -> bool {
        match self.connections.get(id) {
            Some((_, tx)) => tx.send(event).is_ok(),
            None => false,
        }
    }

    /// Best-effort broadcast to every live connection, optionally
    /// skipping one participant. Closed channels are skipped without
    /// error.
    pub fn broadcast(&self, event: &ServerEvent, except: Option<&str>) {
        for (id, (_, tx)) in &self.connections {
            if except.is_some_and(|skip| skip == id) {
                continue;
            }
            let _ = tx.send(event.clone());
        }
    }

    /// Deliver one routed event to wherever it is addressed.
    pub fn dispatch(&self, outbound: Outbound) {
        match outbound.to {
            Destination::One(id) => {
                let _ = self.send(&id, outbound.event);
            }
            Destination::Everyone => self.broadcast(&outbound.event, None),
            Destination::EveryoneExcept(id) => self.broadcast(&outbound.event, Some(&id)),
        }
    }
}
