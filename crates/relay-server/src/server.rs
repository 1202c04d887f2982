//! HTTP listener and top-level server wiring.
//!
//! This module:
//! - Binds the configured address/port.
//! - Serves the static chat page at `/` and the logo at `/logo.png`;
//!   every other plain-HTTP path is a 404.
//! - Upgrades `/ws` to a WebSocket and assigns each socket a `ConnId`.
//! - Spawns:
//!   - a per-connection task to handle I/O,
//!   - a single central hub task that owns the `RelayEngine` and the
//!     `ConnectionRegistry`.
//!
//! The per-connection logic and the hub loop live in the `client` and
//! `hub` modules respectively.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::Context;
use axum::extract::ws::WebSocketUpgrade;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::client;
use crate::config::Config;
use crate::hub;
use crate::types::{ConnId, HubRx, HubTx};

/// Global-ish counter for assigning unique `ConnId`s.
static NEXT_CONN_ID: AtomicU64 = AtomicU64::new(1);

fn next_conn_id() -> ConnId {
    ConnId(NEXT_CONN_ID.fetch_add(1, Ordering::Relaxed))
}

/// Served when the configured chat page cannot be read at startup.
const FALLBACK_PAGE: &str =
    "<h1>Error: could not load the chat page. Check RELAY_INDEX_PATH.</h1>";

struct AppState {
    hub_tx: HubTx,
    index_html: String,
    logo_path: PathBuf,
}

/// Run the server with the given configuration.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let addr = config.socket_addr_string();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("listening on {} ({} mode)", addr, config.mode);

    // Channel from connections → hub task.
    let (hub_tx, hub_rx): (HubTx, HubRx) = mpsc::unbounded_channel();

    // Spawn the central hub task.
    {
        let mode = config.mode;
        let max_clients = config.max_clients;
        tokio::spawn(async move {
            hub::run_hub_loop(hub_rx, mode, max_clients).await;
        });
    }

    let state = Arc::new(AppState {
        hub_tx,
        index_html: load_index(&config.index_path),
        logo_path: config.logo_path.clone(),
    });

    let app = Router::new()
        .route("/", get(index))
        .route("/logo.png", get(logo))
        .route("/ws", get(ws_upgrade))
        .fallback(not_found)
        .with_state(state);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Read the chat page once at startup. A missing file downgrades to
/// an error page rather than refusing to start.
fn load_index(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(html) => html,
        Err(err) => {
            warn!("could not read chat page {}: {}", path.display(), err);
            FALLBACK_PAGE.to_string()
        }
    }
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.index_html.clone())
}

async fn logo(State(state): State<Arc<AppState>>) -> Response {
    match tokio::fs::read(&state.logo_path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "image/png")], bytes).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Logo not found").into_response(),
    }
}

async fn ws_upgrade(State(state): State<Arc<AppState>>, ws: WebSocketUpgrade) -> Response {
    let hub_tx = state.hub_tx.clone();
    ws.on_upgrade(move |socket| async move {
        let conn = next_conn_id();
        info!("conn {} established", conn.0);
        client::run_client(conn, socket, hub_tx).await;
        info!("conn {} closed", conn.0);
    })
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "404 Not Found")
}
