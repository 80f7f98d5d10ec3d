//! Tests for the multi-strategy presence resolver.

use async_trait::async_trait;
use beacon_error::{GatewayError, GatewayErrorKind};
use beacon_gateway::{
    GuildId, Lookup, MemberPresence, PresenceSource, PresenceStatus, Resolution, UserId,
    resolve_presence,
};
use parking_lot::Mutex;

const USER: u64 = 80351110224678912;

/// What one guild is scripted to answer for each strategy.
struct GuildScript {
    id: u64,
    cached: Option<PresenceStatus>,
    fetch: FetchScript,
    query: QueryScript,
}

enum FetchScript {
    Found(PresenceStatus),
    Absent,
    TransportError,
}

enum QueryScript {
    Members(Vec<(u64, PresenceStatus)>),
    TransportError,
}

impl GuildScript {
    fn empty(id: u64) -> Self {
        Self {
            id,
            cached: None,
            fetch: FetchScript::Absent,
            query: QueryScript::Members(Vec::new()),
        }
    }
}

/// Scripted presence source that records every network-strategy invocation.
struct FakeSource {
    guilds: Vec<GuildScript>,
    calls: Mutex<Vec<String>>,
}

impl FakeSource {
    fn new(guilds: Vec<GuildScript>) -> Self {
        Self {
            guilds,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn script(&self, guild_id: GuildId) -> &GuildScript {
        self.guilds
            .iter()
            .find(|guild| guild.id == guild_id.get())
            .expect("resolver asked about a guild the source never listed")
    }
}

#[async_trait]
impl PresenceSource for FakeSource {
    fn guild_ids(&self) -> Vec<GuildId> {
        self.guilds.iter().map(|guild| GuildId::new(guild.id)).collect()
    }

    fn cached_member(&self, guild_id: GuildId, user_id: UserId) -> Option<MemberPresence> {
        self.script(guild_id)
            .cached
            .map(|status| MemberPresence::new(user_id, status))
    }

    async fn fetch_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<Lookup, GatewayError> {
        self.calls.lock().push(format!("fetch:{}", guild_id.get()));
        match self.script(guild_id).fetch {
            FetchScript::Found(status) => Ok(Lookup::Found(MemberPresence::new(user_id, status))),
            FetchScript::Absent => Ok(Lookup::Absent),
            FetchScript::TransportError => Err(GatewayError::new(GatewayErrorKind::Fetch(
                "scripted transport failure".into(),
            ))),
        }
    }

    async fn query_members(
        &self,
        guild_id: GuildId,
        _user_id: UserId,
    ) -> Result<Vec<MemberPresence>, GatewayError> {
        self.calls.lock().push(format!("query:{}", guild_id.get()));
        match &self.script(guild_id).query {
            QueryScript::Members(members) => Ok(members
                .iter()
                .map(|(id, status)| MemberPresence::new(UserId::new(*id), *status))
                .collect()),
            QueryScript::TransportError => Err(GatewayError::new(
                GatewayErrorKind::QueryTimeout(5),
            )),
        }
    }
}

fn user() -> UserId {
    UserId::new(USER)
}

#[tokio::test]
async fn unknown_everywhere_resolves_to_not_found() {
    let source = FakeSource::new(vec![GuildScript::empty(1), GuildScript::empty(2)]);

    let resolution = resolve_presence(&source, user()).await.unwrap();

    assert_eq!(resolution, Resolution::NotFound);
    assert!(!resolution.found());
    // Every strategy ran in every guild before giving up.
    assert_eq!(
        source.calls(),
        vec!["fetch:1", "query:1", "fetch:2", "query:2"]
    );
}

#[tokio::test]
async fn active_cached_status_short_circuits_without_network() {
    let source = FakeSource::new(vec![GuildScript {
        cached: Some(PresenceStatus::Idle),
        ..GuildScript::empty(1)
    }]);

    let resolution = resolve_presence(&source, user()).await.unwrap();

    assert_eq!(
        resolution,
        Resolution::Active(MemberPresence::new(user(), PresenceStatus::Idle))
    );
    assert!(source.calls().is_empty());
}

#[tokio::test]
async fn later_guild_overrides_earlier_offline_membership() {
    // Guild 1 knows the user but offline; guild 2 has them online. The walk
    // must not stop at guild 1's inactive membership.
    let source = FakeSource::new(vec![
        GuildScript {
            cached: Some(PresenceStatus::Offline),
            ..GuildScript::empty(1)
        },
        GuildScript {
            cached: Some(PresenceStatus::Online),
            ..GuildScript::empty(2)
        },
    ]);

    let resolution = resolve_presence(&source, user()).await.unwrap();

    assert_eq!(
        resolution,
        Resolution::Active(MemberPresence::new(user(), PresenceStatus::Online))
    );
}

#[tokio::test]
async fn sole_offline_membership_is_found_but_inactive() {
    let source = FakeSource::new(vec![
        GuildScript {
            cached: Some(PresenceStatus::Offline),
            ..GuildScript::empty(1)
        },
        GuildScript::empty(2),
    ]);

    let resolution = resolve_presence(&source, user()).await.unwrap();

    assert_eq!(
        resolution,
        Resolution::Offline(MemberPresence::new(user(), PresenceStatus::Offline))
    );
    assert!(resolution.found());
}

#[tokio::test]
async fn cached_offline_member_skips_fetch_but_still_queries() {
    // A cached-but-offline membership suppresses the fetch (the cache already
    // answered membership) while the live query still gets its chance to
    // report fresher presence.
    let source = FakeSource::new(vec![GuildScript {
        cached: Some(PresenceStatus::Offline),
        query: QueryScript::Members(vec![(USER, PresenceStatus::Dnd)]),
        ..GuildScript::empty(1)
    }]);

    let resolution = resolve_presence(&source, user()).await.unwrap();

    assert_eq!(
        resolution,
        Resolution::Active(MemberPresence::new(user(), PresenceStatus::Dnd))
    );
    assert_eq!(source.calls(), vec!["query:1"]);
}

#[tokio::test]
async fn fetched_active_member_short_circuits() {
    let source = FakeSource::new(vec![GuildScript {
        fetch: FetchScript::Found(PresenceStatus::Online),
        ..GuildScript::empty(1)
    }]);

    let resolution = resolve_presence(&source, user()).await.unwrap();

    assert_eq!(
        resolution,
        Resolution::Active(MemberPresence::new(user(), PresenceStatus::Online))
    );
    assert_eq!(source.calls(), vec!["fetch:1"]);
}

#[tokio::test]
async fn query_transport_failure_reads_as_zero_results() {
    let source = FakeSource::new(vec![GuildScript {
        query: QueryScript::TransportError,
        ..GuildScript::empty(1)
    }]);

    let resolution = resolve_presence(&source, user()).await.unwrap();

    assert_eq!(resolution, Resolution::NotFound);
}

#[tokio::test]
async fn fetch_transport_failure_propagates() {
    let source = FakeSource::new(vec![GuildScript {
        fetch: FetchScript::TransportError,
        ..GuildScript::empty(1)
    }]);

    let err = resolve_presence(&source, user()).await.unwrap_err();
    assert!(matches!(err.kind(), GatewayErrorKind::Fetch(_)));
}

#[tokio::test]
async fn query_results_for_other_users_are_ignored() {
    let source = FakeSource::new(vec![GuildScript {
        query: QueryScript::Members(vec![(42, PresenceStatus::Online)]),
        ..GuildScript::empty(1)
    }]);

    let resolution = resolve_presence(&source, user()).await.unwrap();

    assert_eq!(resolution, Resolution::NotFound);
}

#[tokio::test]
async fn queried_inactive_member_becomes_the_fallback() {
    let source = FakeSource::new(vec![
        GuildScript {
            query: QueryScript::Members(vec![(USER, PresenceStatus::Offline)]),
            ..GuildScript::empty(1)
        },
        GuildScript::empty(2),
    ]);

    let resolution = resolve_presence(&source, user()).await.unwrap();

    assert_eq!(
        resolution,
        Resolution::Offline(MemberPresence::new(user(), PresenceStatus::Offline))
    );
    // Guild 2 still ran its full pipeline before the fallback won.
    assert_eq!(
        source.calls(),
        vec!["fetch:1", "query:1", "fetch:2", "query:2"]
    );
}
