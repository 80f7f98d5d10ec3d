//! Configuration for the presence API server.

use beacon_error::ConfigError;
use beacon_gateway::GatewayConfig;
use std::net::SocketAddr;

/// Configuration for the presence API server.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Gateway session configuration (token and timeouts).
    pub gateway: GatewayConfig,
    /// Socket address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Connect to the gateway before serving instead of on first request.
    pub preconnect: bool,
}

impl ServiceConfig {
    /// Create config from environment variables.
    ///
    /// Reads:
    /// - `DISCORD_BOT_TOKEN` (required)
    /// - `BEACON_BIND_ADDR` (default: "0.0.0.0:8000")
    /// - `BEACON_START_TIMEOUT_SECS` / `BEACON_QUERY_TIMEOUT_SECS`
    /// - `BEACON_PRECONNECT` (default: false)
    pub fn from_env() -> Result<Self, ConfigError> {
        let gateway = GatewayConfig::from_env()?;

        let bind_addr = match std::env::var("BEACON_BIND_ADDR") {
            Ok(raw) => raw.parse().map_err(|_| {
                ConfigError::new("BEACON_BIND_ADDR is not a valid socket address")
            })?,
            Err(_) => SocketAddr::from(([0, 0, 0, 0], 8000)),
        };

        let preconnect = std::env::var("BEACON_PRECONNECT")
            .map(|raw| matches!(raw.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            gateway,
            bind_addr,
            preconnect,
        })
    }
}
