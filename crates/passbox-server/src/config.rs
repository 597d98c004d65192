//! Server configuration for passbox.
//!
//! Loads configuration from environment variables with sensible defaults.
//! All settings can be overridden via `PASSBOX_*` environment variables.
//! A variable that is set but malformed is a startup error, never a
//! silent fallback to the default.

use std::net::SocketAddr;

use anyhow::Context;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT` — port to bind on (binds to `0.0.0.0`)
    /// - `PASSBOX_BIND_ADDR` — full bind address (overrides `PORT`,
    ///   default: `127.0.0.1:8080`)
    /// - `PASSBOX_LOG_LEVEL` — log filter (default: `info`)
    ///
    /// # Errors
    ///
    /// Returns an error when `PASSBOX_BIND_ADDR` is not a valid socket
    /// address or `PORT` is not a valid port number.
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr = resolve_bind_addr(
            std::env::var("PASSBOX_BIND_ADDR").ok().as_deref(),
            std::env::var("PORT").ok().as_deref(),
        )?;

        let log_level =
            std::env::var("PASSBOX_LOG_LEVEL").unwrap_or_else(|_| "info".to_owned());

        Ok(Self {
            bind_addr,
            log_level,
        })
    }
}

/// Resolve the bind address. Priority: `PASSBOX_BIND_ADDR` > `PORT` >
/// default `127.0.0.1:8080`.
fn resolve_bind_addr(bind_addr: Option<&str>, port: Option<&str>) -> anyhow::Result<SocketAddr> {
    if let Some(addr) = bind_addr {
        return addr
            .parse()
            .with_context(|| format!("invalid PASSBOX_BIND_ADDR '{addr}'"));
    }

    if let Some(port_str) = port {
        let port: u16 = port_str
            .parse()
            .with_context(|| format!("invalid PORT '{port_str}'"))?;
        return Ok(SocketAddr::from(([0, 0, 0, 0], port)));
    }

    Ok(SocketAddr::from(([127, 0, 0, 1], 8080)))
}
