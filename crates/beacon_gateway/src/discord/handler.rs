//! Serenity event handler for the gateway session.

use super::convert;
use super::link::DiscordLink;
use crate::MemberPresence;
use async_trait::async_trait;
use parking_lot::Mutex;
use serenity::client::{Context, EventHandler};
use serenity::gateway::ShardManager;
use serenity::model::event::GuildMembersChunkEvent;
use serenity::model::gateway::Ready;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

/// Registry of member queries awaiting their chunk responses, keyed by the
/// nonce the query was issued with.
#[derive(Clone, Default)]
pub(crate) struct ChunkWaiters {
    pending: Arc<Mutex<HashMap<String, oneshot::Sender<Vec<MemberPresence>>>>>,
}

impl ChunkWaiters {
    /// Register a waiter and return the receiving half.
    pub(crate) fn register(&self, nonce: String) -> oneshot::Receiver<Vec<MemberPresence>> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(nonce, tx);
        rx
    }

    /// Deliver a chunk response to its waiter, if one is still registered.
    pub(crate) fn complete(&self, nonce: &str, members: Vec<MemberPresence>) {
        let waiter = self.pending.lock().remove(nonce);
        match waiter {
            Some(tx) => {
                if tx.send(members).is_err() {
                    debug!(nonce, "Query waiter gone before chunk arrived");
                }
            }
            None => debug!(nonce, "Chunk response with no registered waiter"),
        }
    }

    /// Drop a waiter that gave up (timeout or error path).
    pub(crate) fn forget(&self, nonce: &str) {
        self.pending.lock().remove(nonce);
    }
}

/// Event handler wiring readiness and chunk responses back to the session.
///
/// Holds the one-shot sender for the session link until the first ready event
/// fires; reconnect-triggered ready events after that are logged and ignored.
pub struct GatewayHandler {
    ready: Mutex<Option<oneshot::Sender<DiscordLink>>>,
    waiters: ChunkWaiters,
    shards: Arc<OnceLock<Arc<ShardManager>>>,
    query_timeout: Duration,
}

impl GatewayHandler {
    /// Create a handler that publishes the session link through `ready`.
    ///
    /// `shards` is filled in by the connector once the client is built, which
    /// always happens before any event can fire.
    pub(crate) fn new(
        ready: oneshot::Sender<DiscordLink>,
        shards: Arc<OnceLock<Arc<ShardManager>>>,
        query_timeout: Duration,
    ) -> Self {
        Self {
            ready: Mutex::new(Some(ready)),
            waiters: ChunkWaiters::default(),
            shards,
            query_timeout,
        }
    }
}

#[async_trait]
impl EventHandler for GatewayHandler {
    async fn ready(&self, ctx: Context, data: Ready) {
        info!(
            user = %data.user.name,
            guilds = data.guilds.len(),
            "Gateway session is ready"
        );

        let Some(shards) = self.shards.get().cloned() else {
            warn!("Ready event before shard manager attachment; ignoring");
            return;
        };

        let sender = self.ready.lock().take();
        match sender {
            Some(tx) => {
                let link = DiscordLink::new(
                    ctx.cache.clone(),
                    ctx.http.clone(),
                    ctx.shard.clone(),
                    shards,
                    self.waiters.clone(),
                    self.query_timeout,
                );
                if tx.send(link).is_err() {
                    debug!("Session gave up waiting before the link was published");
                }
            }
            None => debug!("Reconnect ready event; session link already published"),
        }
    }

    async fn guild_members_chunk(&self, _ctx: Context, chunk: GuildMembersChunkEvent) {
        let Some(nonce) = chunk.nonce.clone() else {
            debug!(
                guild_id = chunk.guild_id.get(),
                "Unsolicited member chunk without nonce"
            );
            return;
        };

        debug!(
            guild_id = chunk.guild_id.get(),
            members = chunk.members.len(),
            %nonce,
            "Member chunk received"
        );
        self.waiters.complete(&nonce, convert::chunk_members(&chunk));
    }
}
