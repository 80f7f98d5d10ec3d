//! Serenity client construction and connection driving.

use super::handler::GatewayHandler;
use super::link::DiscordLink;
use crate::{Connector, GatewayConfig};
use async_trait::async_trait;
use beacon_error::{GatewayError, GatewayErrorKind};
use serenity::Client;
use serenity::model::gateway::GatewayIntents;
use std::sync::{Arc, OnceLock};
use tokio::sync::oneshot;
use tracing::{info, instrument};

/// Production [`Connector`] backed by a Serenity gateway client.
pub struct DiscordConnector {
    config: GatewayConfig,
}

impl DiscordConnector {
    /// Create a connector for the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        Self { config }
    }

    /// Gateway intents the lookup strategies depend on: guild membership for
    /// the caches, presences for live status.
    fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MEMBERS | GatewayIntents::GUILD_PRESENCES
    }
}

#[async_trait]
impl Connector for DiscordConnector {
    type Link = DiscordLink;

    #[instrument(skip_all)]
    async fn run(&self, ready: oneshot::Sender<DiscordLink>) -> Result<(), GatewayError> {
        let shards = Arc::new(OnceLock::new());
        let handler = GatewayHandler::new(ready, Arc::clone(&shards), *self.config.query_timeout());

        info!(intents = ?Self::intents(), "Building gateway client");
        let mut client = Client::builder(self.config.token(), Self::intents())
            .event_handler(handler)
            .await
            .map_err(|e| {
                GatewayError::new(GatewayErrorKind::ConnectionFailed(format!(
                    "Failed to build client: {}",
                    e
                )))
            })?;

        // The handler needs the shard manager to assemble the session link,
        // and the shard manager only exists once the client does.
        let _ = shards.set(Arc::clone(&client.shard_manager));

        client.start().await.map_err(|e| {
            GatewayError::new(GatewayErrorKind::ConnectionFailed(format!(
                "Client error: {}",
                e
            )))
        })
    }
}
