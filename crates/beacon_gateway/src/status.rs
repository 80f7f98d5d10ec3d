//! Presence status classification.

use serde::{Deserialize, Serialize};

/// A user's presence status within a guild.
///
/// `Offline` also stands in for absent presence data: a member the platform
/// knows about but reports no live status for is indistinguishable from an
/// offline member as far as this service is concerned.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PresenceStatus {
    /// Actively online.
    Online,
    /// Online but away.
    Idle,
    /// Online with do-not-disturb enabled.
    Dnd,
    /// Offline, invisible, or no presence data available.
    Offline,
}

impl PresenceStatus {
    /// Whether this status is actionable for an "is this user online" answer.
    ///
    /// Anything other than `Offline` counts.
    pub fn is_active(&self) -> bool {
        !matches!(self, PresenceStatus::Offline)
    }

    /// Uppercase wire label, matching the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            PresenceStatus::Online => "ONLINE",
            PresenceStatus::Idle => "IDLE",
            PresenceStatus::Dnd => "DND",
            PresenceStatus::Offline => "OFFLINE",
        }
    }
}

impl std::fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
