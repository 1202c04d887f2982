//! WebSocket relay server binary.

use relay_server::config::Config;
use relay_server::server;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    info!(
        "starting relay-server on {}:{} ({} mode, max_clients = {})",
        config.bind_addr, config.port, config.mode, config.max_clients
    );

    server::run(config).await
}
