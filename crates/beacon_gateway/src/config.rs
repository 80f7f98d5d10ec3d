//! Configuration for the gateway session.

use beacon_error::ConfigError;
use derive_builder::Builder;
use derive_getters::Getters;
use std::time::Duration;

/// Environment variable holding the bot token.
pub(crate) const TOKEN_ENV: &str = "DISCORD_BOT_TOKEN";

/// Configuration for the gateway session and its lookup strategies.
#[derive(Debug, Clone, Getters, Builder)]
#[builder(setter(into))]
pub struct GatewayConfig {
    /// Bot token from the Discord Developer Portal.
    token: String,
    /// Upper bound on how long `ensure_started` waits for readiness.
    #[builder(default = "Duration::from_secs(60)")]
    start_timeout: Duration,
    /// Upper bound on how long a single member query waits for its chunk
    /// response.
    #[builder(default = "Duration::from_secs(5)")]
    query_timeout: Duration,
}

impl GatewayConfig {
    /// Create a configuration with default timeouts.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            start_timeout: Duration::from_secs(60),
            query_timeout: Duration::from_secs(5),
        }
    }

    /// Create config from environment variables.
    ///
    /// Reads:
    /// - `DISCORD_BOT_TOKEN` (required)
    /// - `BEACON_START_TIMEOUT_SECS` (default: 60)
    /// - `BEACON_QUERY_TIMEOUT_SECS` (default: 5)
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = std::env::var(TOKEN_ENV)
            .map_err(|_| ConfigError::new(format!("{TOKEN_ENV} not set")))?;
        if token.trim().is_empty() {
            return Err(ConfigError::new(format!("{TOKEN_ENV} is empty")));
        }

        let start_timeout = read_secs("BEACON_START_TIMEOUT_SECS", 60)?;
        let query_timeout = read_secs("BEACON_QUERY_TIMEOUT_SECS", 5)?;

        Ok(Self {
            token,
            start_timeout,
            query_timeout,
        })
    }
}

fn read_secs(var: &str, default: u64) -> Result<Duration, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::new(format!("{var} is not a valid number of seconds"))),
        Err(_) => Ok(Duration::from_secs(default)),
    }
}
