//! Handle to a ready gateway connection.

use super::convert;
use super::handler::ChunkWaiters;
use crate::{Lookup, MemberPresence, PresenceSource, PresenceStatus, SessionLink};
use async_trait::async_trait;
use beacon_error::{GatewayError, GatewayErrorKind};
use serenity::cache::Cache;
use serenity::gateway::{ChunkGuildFilter, ShardManager, ShardMessenger};
use serenity::http::Http;
use serenity::model::id::{GuildId, UserId};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Shared handle to a ready gateway session.
///
/// Published by the event handler on the first ready event. Everything inside
/// is `Arc`-held Serenity state, so cloning one of these per request is cheap.
#[derive(Clone)]
pub struct DiscordLink {
    cache: Arc<Cache>,
    http: Arc<Http>,
    shard: ShardMessenger,
    shards: Arc<ShardManager>,
    waiters: ChunkWaiters,
    query_timeout: Duration,
}

impl DiscordLink {
    pub(crate) fn new(
        cache: Arc<Cache>,
        http: Arc<Http>,
        shard: ShardMessenger,
        shards: Arc<ShardManager>,
        waiters: ChunkWaiters,
        query_timeout: Duration,
    ) -> Self {
        Self {
            cache,
            http,
            shard,
            shards,
            waiters,
            query_timeout,
        }
    }

    /// Status for a user from the guild's presence cache, offline when the
    /// cache has no live presence entry.
    fn cached_status(&self, guild_id: GuildId, user_id: UserId) -> PresenceStatus {
        self.cache
            .guild(guild_id)
            .and_then(|guild| {
                guild
                    .presences
                    .get(&user_id)
                    .map(|presence| convert::status_from(presence.status))
            })
            .unwrap_or(PresenceStatus::Offline)
    }
}

fn is_not_found(err: &serenity::Error) -> bool {
    matches!(
        err,
        serenity::Error::Http(serenity::http::HttpError::UnsuccessfulRequest(response))
            if response.status_code == serenity::http::StatusCode::NOT_FOUND
    )
}

#[async_trait]
impl SessionLink for DiscordLink {
    async fn close(&self) -> Result<(), GatewayError> {
        info!("Shutting down gateway shards");
        self.shards.shutdown_all().await;
        Ok(())
    }
}

#[async_trait]
impl PresenceSource for DiscordLink {
    fn guild_ids(&self) -> Vec<GuildId> {
        // Cache iteration order is arbitrary; sort for stable walks.
        let mut ids = self.cache.guilds();
        ids.sort_unstable();
        ids
    }

    fn cached_member(&self, guild_id: GuildId, user_id: UserId) -> Option<MemberPresence> {
        let cached = self
            .cache
            .guild(guild_id)
            .is_some_and(|guild| guild.members.contains_key(&user_id));
        if !cached {
            return None;
        }
        Some(MemberPresence::new(
            user_id,
            self.cached_status(guild_id, user_id),
        ))
    }

    #[instrument(skip(self), fields(guild_id = guild_id.get(), user_id = user_id.get()))]
    async fn fetch_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<Lookup, GatewayError> {
        match self.http.get_member(guild_id, user_id).await {
            Ok(member) => {
                // REST responses carry no presence; the guild cache is the
                // only place a live status for this member can come from.
                let status = self.cached_status(guild_id, user_id);
                debug!(%status, "Fetched member");
                Ok(Lookup::Found(MemberPresence::new(member.user.id, status)))
            }
            Err(ref e) if is_not_found(e) => {
                debug!("Member not in guild");
                Ok(Lookup::Absent)
            }
            Err(e) => Err(GatewayError::new(GatewayErrorKind::Fetch(e.to_string()))),
        }
    }

    #[instrument(skip(self), fields(guild_id = guild_id.get(), user_id = user_id.get()))]
    async fn query_members(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<Vec<MemberPresence>, GatewayError> {
        let nonce = Uuid::new_v4().simple().to_string();
        let rx = self.waiters.register(nonce.clone());

        debug!(%nonce, "Requesting member chunk");
        self.shard.chunk_guild(
            guild_id,
            Some(1),
            true,
            ChunkGuildFilter::UserIds(vec![user_id]),
            Some(nonce.clone()),
        );

        match tokio::time::timeout(self.query_timeout, rx).await {
            Ok(Ok(members)) => Ok(members),
            Ok(Err(_)) => {
                self.waiters.forget(&nonce);
                Err(GatewayError::new(GatewayErrorKind::QueryFailed(
                    "chunk responder dropped".into(),
                )))
            }
            Err(_) => {
                self.waiters.forget(&nonce);
                Err(GatewayError::new(GatewayErrorKind::QueryTimeout(
                    self.query_timeout.as_secs(),
                )))
            }
        }
    }
}
