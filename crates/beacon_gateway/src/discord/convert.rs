//! Conversions from Serenity model types to Beacon domain types.

use crate::{MemberPresence, PresenceStatus};
use serenity::model::event::GuildMembersChunkEvent;
use serenity::model::id::UserId;
use serenity::model::user::OnlineStatus;
use std::collections::HashMap;

/// Reduce a Serenity online status to the service's classification.
///
/// Invisible users present as offline to other members, so they classify as
/// offline here too. The enum is non-exhaustive upstream; unknown future
/// statuses fall through to offline.
pub(crate) fn status_from(status: OnlineStatus) -> PresenceStatus {
    match status {
        OnlineStatus::Online => PresenceStatus::Online,
        OnlineStatus::Idle => PresenceStatus::Idle,
        OnlineStatus::DoNotDisturb => PresenceStatus::Dnd,
        _ => PresenceStatus::Offline,
    }
}

/// Flatten a member-chunk response into membership records.
///
/// Presence data only accompanies the chunk when the query asked for it, and
/// only for members the platform has live status for; everyone else in the
/// chunk is reported offline.
pub(crate) fn chunk_members(chunk: &GuildMembersChunkEvent) -> Vec<MemberPresence> {
    let statuses: HashMap<UserId, PresenceStatus> = chunk
        .presences
        .iter()
        .flatten()
        .map(|presence| (presence.user.id, status_from(presence.status)))
        .collect();

    chunk
        .members
        .keys()
        .map(|user_id| {
            let status = statuses
                .get(user_id)
                .copied()
                .unwrap_or(PresenceStatus::Offline);
            MemberPresence::new(*user_id, status)
        })
        .collect()
}
