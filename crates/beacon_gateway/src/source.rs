//! Capability trait for guild membership and presence lookups.

use crate::{Lookup, MemberPresence};
use async_trait::async_trait;
use beacon_error::GatewayError;
use serenity::model::id::{GuildId, UserId};

/// The narrow slice of a gateway session the resolver needs.
///
/// Only one production implementation exists ([`crate::DiscordLink`]); the
/// trait is here so resolver tests can run against a scripted fake instead of
/// a live connection.
#[async_trait]
pub trait PresenceSource: Send + Sync {
    /// Guilds the session currently belongs to, in stable iteration order.
    fn guild_ids(&self) -> Vec<GuildId>;

    /// Consult the guild's local membership cache. No network round trip.
    fn cached_member(&self, guild_id: GuildId, user_id: UserId) -> Option<MemberPresence>;

    /// Fetch one membership directly from the platform.
    ///
    /// A platform-side "unknown member" is an expected [`Lookup::Absent`];
    /// only transport-level failures surface as errors.
    async fn fetch_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<Lookup, GatewayError>;

    /// Issue a live member query scoped to exactly one user id, requesting
    /// presence data and permission to populate the guild cache.
    async fn query_members(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<Vec<MemberPresence>, GatewayError>;
}
