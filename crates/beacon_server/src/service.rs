//! Seam between the HTTP layer and the gateway session.

use async_trait::async_trait;
use beacon_error::GatewayError;
use beacon_gateway::{DiscordConnector, Resolution, Session, UserId, resolve_presence};
use std::sync::Arc;
use tracing::instrument;

/// One presence lookup, end to end.
///
/// The HTTP handlers depend on this trait rather than the concrete session so
/// route tests can script resolver outcomes without a live gateway.
#[async_trait]
pub trait PresenceService: Send + Sync + 'static {
    /// Ensure the gateway session is usable and resolve the user's presence.
    async fn check(&self, user_id: UserId) -> Result<Resolution, GatewayError>;
}

/// Production [`PresenceService`] backed by the shared gateway session.
pub struct GatewayPresenceService {
    session: Arc<Session<DiscordConnector>>,
}

impl GatewayPresenceService {
    /// Wrap the shared session.
    pub fn new(session: Arc<Session<DiscordConnector>>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl PresenceService for GatewayPresenceService {
    #[instrument(skip(self), fields(user_id = user_id.get()))]
    async fn check(&self, user_id: UserId) -> Result<Resolution, GatewayError> {
        // Lazy start: the first lookup after boot (or after a failure) pays
        // for the connection; everyone else reuses it.
        let link = self.session.ensure_started().await?;
        resolve_presence(&link, user_id).await
    }
}
