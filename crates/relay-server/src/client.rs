// crates/relay-server/src/client.rs
// Per-socket I/O: decode inbound frames, forward to the hub, and
// drain the outbound channel back into the socket.

use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use relay_core::{ClientEvent, ParticipantId};
use relay_protocol::{decode_input, encode_output};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::types::{ConnId, HubRequest, HubTx, OutboundRx, OutboundTx};

/// Run the I/O loop for a single WebSocket connection.
pub async fn run_client(conn: ConnId, socket: WebSocket, hub_tx: HubTx) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    // Outbound channel for this connection; the sender side is what
    // gets installed in the registry at registration time.
    let (out_tx, mut out_rx): (OutboundTx, OutboundRx) = mpsc::unbounded_channel();

    // Writer task: consume ServerEvents and write JSON text frames.
    let writer = tokio::spawn(async move {
        while let Some(event) = out_rx.recv().await {
            let text = match encode_output(&event) {
                Ok(text) => text,
                Err(err) => {
                    warn!("conn {} encode error: {}", conn.0, err);
                    continue;
                }
            };
            if ws_tx.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    // The identifier this socket has claimed, if any. Frames arriving
    // before registration are dropped without a response.
    let mut registered: Option<ParticipantId> = None;

    while let Some(Ok(frame)) = ws_rx.next().await {
        let text = match frame {
            Message::Text(text) => text,
            Message::Close(_) => break,
            // Pings are answered by the transport layer; binary and
            // pong frames mean nothing to this protocol.
            _ => continue,
        };

        let event = match decode_input(&text) {
            Ok(event) => event,
            Err(err) => {
                debug!("conn {} dropping malformed frame: {}", conn.0, err);
                continue;
            }
        };

        match event {
            ClientEvent::Register { username } => {
                let id = username.trim().to_string();
                if id.is_empty() {
                    continue;
                }
                if let Some(prev) = registered.as_ref() {
                    if *prev != id {
                        // Renaming: retire the old identifier first.
                        let _ = hub_tx.send(HubRequest::Disconnect {
                            conn,
                            id: prev.clone(),
                        });
                    }
                }
                registered = Some(id.clone());
                if hub_tx
                    .send(HubRequest::Register {
                        conn,
                        id,
                        handle: out_tx.clone(),
                    })
                    .is_err()
                {
                    break;
                }
            }
            event => {
                let Some(id) = registered.clone() else {
                    continue;
                };
                if hub_tx.send(HubRequest::Event { conn, id, event }).is_err() {
                    break;
                }
            }
        }
    }

    if let Some(id) = registered {
        let _ = hub_tx.send(HubRequest::Disconnect { conn, id });
    }

    // Dropping out_tx lets the writer drain and finish on its own.
    drop(out_tx);
    let _ = writer.await;
}
