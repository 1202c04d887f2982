//! Configuration for the relay server.
//!
//! For now this is intentionally simple: you can either use defaults
//! or override via a few environment variables:
//!
//! - `RELAY_BIND_ADDR`   (default: "0.0.0.0")
//! - `RELAY_PORT`        (default: "8080")
//! - `RELAY_MODE`        (default: "paired"; or "direct")
//! - `RELAY_MAX_CLIENTS` (default: "1024")
//! - `RELAY_INDEX_PATH`  (default: "assets/index.html")
//! - `RELAY_LOGO_PATH`   (default: "assets/logo.png")

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use relay_core::Mode;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// IP address / interface to bind to (e.g. "0.0.0.0" or "127.0.0.1").
    pub bind_addr: String,

    /// TCP port to listen on.
    pub port: u16,

    /// Addressing mode for this deployment.
    pub mode: Mode,

    /// Maximum number of simultaneously registered participants.
    pub max_clients: usize,

    /// Chat page served at the root path, read once at startup.
    pub index_path: PathBuf,

    /// Logo image served at `/logo.png`, read per request.
    pub logo_path: PathBuf,
}

impl Config {
    /// Construct a `Config` from environment variables, falling back
    /// to reasonable defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr = env::var("RELAY_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = read_env_or_default("RELAY_PORT", 8080u16)?;
        let mode = read_env_or_default("RELAY_MODE", Mode::Paired)?;
        let max_clients = read_env_or_default("RELAY_MAX_CLIENTS", 1024usize)?;

        let index_path = env::var("RELAY_INDEX_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("assets/index.html"));
        let logo_path = env::var("RELAY_LOGO_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("assets/logo.png"));

        Ok(Config {
            bind_addr,
            port,
            mode,
            max_clients,
            index_path,
            logo_path,
        })
    }

    /// Convenience: `addr:port` socket string.
    pub fn socket_addr_string(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn read_env_or_default<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .with_context(|| format!("invalid value for {}", key)),
        Err(_) => Ok(default),
    }
}
