//! Central hub loop.
//!
//! This task owns the `RelayEngine` and the `ConnectionRegistry` and
//! processes all `HubRequest`s coming from connection tasks. Funneling
//! everything through one loop serializes every mutation of the
//! registry, the pool, the pairing relation, and the conversation log,
//! so events from one connection are handled in arrival order and a
//! pairing pass always runs to completion on the pool state that
//! triggered it.
//!
//! Staleness: when an identifier is re-registered from a new socket,
//! requests still arriving from the old socket carry the old `ConnId`
//! and are dropped here, so a replaced session can neither act for the
//! participant nor tear down the replacing session on its way out.

use relay_core::{Mode, Outbound, RelayEngine, ServerEvent};
use tracing::{debug, info, warn};

use crate::registry::ConnectionRegistry;
use crate::types::{HubRequest, HubRx};

/// Run the central hub processing loop.
///
/// - `hub_rx`: receives requests from all connection tasks.
/// - `mode`: addressing mode for this deployment.
/// - `max_clients`: registrations beyond this are refused.
pub async fn run_hub_loop(mut hub_rx: HubRx, mode: Mode, max_clients: usize) {
    let mut engine = RelayEngine::new(mode);
    let mut registry = ConnectionRegistry::new();

    while let Some(req) = hub_rx.recv().await {
        match req {
            HubRequest::Register { conn, id, handle } => {
                if !registry.contains(&id) && registry.len() >= max_clients {
                    warn!(
                        "refusing registration of '{}': max_clients ({}) reached",
                        id, max_clients
                    );
                    let _ = handle.send(ServerEvent::error("Server full"));
                    continue;
                }

                match registry.register(id.clone(), conn, handle) {
                    Some(old_conn) => info!(
                        "participant '{}' re-registered (conn {} replaces {})",
                        id, conn.0, old_conn.0
                    ),
                    None => info!("participant '{}' registered on conn {}", id, conn.0),
                }

                dispatch_all(&registry, engine.register(&id));
            }

            HubRequest::Event { conn, id, event } => {
                if registry.current_conn(&id) != Some(conn) {
                    debug!(
                        "dropping event from stale conn {} for '{}'",
                        conn.0, id
                    );
                    continue;
                }

                dispatch_all(&registry, engine.process(&id, event));
            }

            HubRequest::Disconnect { conn, id } => {
                if registry.current_conn(&id) != Some(conn) {
                    // A replaced session going away; the participant
                    // lives on through the newer socket.
                    debug!("ignoring disconnect of stale conn {} for '{}'", conn.0, id);
                    continue;
                }

                // Unregister first so nothing routed below can target
                // the dead handle.
                registry.unregister(&id);
                info!("participant '{}' disconnected", id);

                dispatch_all(&registry, engine.disconnect(&id));
            }
        }
    }

    info!("hub loop shutting down (hub_rx closed)");
}

fn dispatch_all(registry: &ConnectionRegistry, outputs: Vec<Outbound>) {
    for out in outputs {
        registry.dispatch(out);
    }
}
