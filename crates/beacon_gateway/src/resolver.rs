//! Multi-strategy member/presence resolution.
//!
//! Given a user id, walk every guild the session belongs to and try, in
//! order: the local membership cache, a targeted fetch, and a live member
//! query. The first active status found anywhere wins; a user who is a
//! confirmed member somewhere but active nowhere resolves as offline; a user
//! no guild knows about resolves as not found.

use crate::{Lookup, MemberPresence, PresenceSource};
use beacon_error::GatewayError;
use serenity::model::id::UserId;
use tracing::{debug, instrument};

/// Terminal outcome of a presence resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The user was found with an actionable status.
    Active(MemberPresence),
    /// The user is a confirmed member of at least one guild, but no guild
    /// reports an actionable status. Carries the earliest membership found.
    Offline(MemberPresence),
    /// No guild has any membership record for the user.
    NotFound,
}

impl Resolution {
    /// Whether any membership was found at all.
    pub fn found(&self) -> bool {
        !matches!(self, Resolution::NotFound)
    }
}

/// Resolve a user's presence across every guild the session belongs to.
///
/// Per guild: an active cached status returns immediately without touching
/// the network; on a cache miss, a targeted fetch runs next (platform
/// "unknown member" just moves on); finally a live member query scoped to
/// this one user runs, with transport failures tolerated as zero results.
///
/// A guild that only turns up an inactive membership does not end the walk:
/// a later guild may still report the same user as active. The earliest
/// inactive membership is remembered and becomes the answer only when no
/// guild concludes.
///
/// # Errors
/// Propagates fetch transport failures and nothing else; query failures are
/// absorbed as empty results.
#[instrument(skip(source), fields(user_id = user_id.get()))]
pub async fn resolve_presence<S>(source: &S, user_id: UserId) -> Result<Resolution, GatewayError>
where
    S: PresenceSource + ?Sized,
{
    let mut fallback: Option<MemberPresence> = None;

    for guild_id in source.guild_ids() {
        let mut candidate = source.cached_member(guild_id, user_id);
        if let Some(member) = candidate {
            if member.is_active() {
                debug!(guild_id = guild_id.get(), "Cache hit with active status");
                return Ok(Resolution::Active(member));
            }
        }

        if candidate.is_none() {
            match source.fetch_member(guild_id, user_id).await? {
                Lookup::Found(member) => {
                    if member.is_active() {
                        debug!(guild_id = guild_id.get(), "Fetched member is active");
                        return Ok(Resolution::Active(member));
                    }
                    candidate = Some(member);
                }
                Lookup::Absent => {}
            }
        }

        let matched = match source.query_members(guild_id, user_id).await {
            Ok(matched) => matched,
            Err(e) => {
                // Query transport failures mean "no results", not "give up".
                debug!(guild_id = guild_id.get(), error = %e, "Member query failed");
                Vec::new()
            }
        };
        for queried in matched {
            if *queried.user_id() != user_id {
                continue;
            }
            if queried.is_active() {
                debug!(guild_id = guild_id.get(), "Queried member is active");
                return Ok(Resolution::Active(queried));
            }
            candidate = candidate.or(Some(queried));
        }

        if let Some(member) = candidate {
            // Keep walking: a later guild may still report this user as
            // active, but only the earliest inactive membership can win.
            fallback = fallback.or(Some(member));
        }
    }

    match fallback {
        Some(member) => Ok(Resolution::Offline(member)),
        None => Ok(Resolution::NotFound),
    }
}
