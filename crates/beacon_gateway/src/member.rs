//! Member presence records and lookup outcomes.

use crate::PresenceStatus;
use derive_getters::Getters;
use serenity::model::id::UserId;

/// A user's membership in one guild, reduced to the presence data this
/// service cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct MemberPresence {
    /// Stable numeric snowflake identifying the user.
    user_id: UserId,
    /// The status attached to this membership.
    status: PresenceStatus,
}

impl MemberPresence {
    /// Create a new membership record.
    pub fn new(user_id: UserId, status: PresenceStatus) -> Self {
        Self { user_id, status }
    }

    /// Whether the attached status is actionable.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Outcome of a single membership lookup strategy.
///
/// Absence is an expected result of probing a guild the user does not belong
/// to, not an error, so it gets its own variant rather than an error path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// The guild has a membership record for the user.
    Found(MemberPresence),
    /// The user is not a member of the guild.
    Absent,
}

impl Lookup {
    /// The membership record, if one was found.
    pub fn found(self) -> Option<MemberPresence> {
        match self {
            Lookup::Found(member) => Some(member),
            Lookup::Absent => None,
        }
    }
}
