//! Gateway session lifecycle management.
//!
//! A [`Session`] owns at most one live gateway connection. The connection is
//! started lazily by the first caller that needs it; callers arriving while a
//! start is in flight await that same attempt rather than spawning another
//! (single-flight). Start-state transitions are broadcast over a
//! [`tokio::sync::watch`] channel so every waiter resumes together, without a
//! poll-sleep loop.

use crate::GatewayConfig;
use async_trait::async_trait;
use beacon_error::{GatewayError, GatewayErrorKind};
use std::sync::Arc;
use tokio::sync::{Mutex, oneshot, watch};
use tracing::{debug, info, instrument, warn};

/// Handle to a ready gateway connection, shared with request handlers.
///
/// Implementations are expected to be cheap to clone (internally `Arc`-held).
#[async_trait]
pub trait SessionLink: Clone + Send + Sync + 'static {
    /// Gracefully release the underlying connection.
    async fn close(&self) -> Result<(), GatewayError>;
}

/// Drives one long-lived gateway connection.
///
/// `run` is expected to block for the lifetime of the connection, publishing
/// a [`SessionLink`] through `ready` once the session is usable. Returning
/// before sending the link marks the start attempt as failed.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    /// Handle published once the connection is ready.
    type Link: SessionLink;

    /// Run the connection until it ends.
    async fn run(&self, ready: oneshot::Sender<Self::Link>) -> Result<(), GatewayError>;
}

/// Observable state of one start attempt.
#[derive(Debug, Clone)]
enum StartState<L> {
    Starting,
    Ready(L),
    Failed(GatewayError),
}

/// Lifecycle manager for a single gateway session.
///
/// The session moves from not-started through starting to ready, and ends
/// closed. A failure during startup leaves a failed slot behind; the next
/// `ensure_started` call replaces it with a fresh attempt, so failed starts
/// are retryable.
pub struct Session<C: Connector> {
    connector: Arc<C>,
    config: GatewayConfig,
    slot: Mutex<Option<watch::Receiver<StartState<C::Link>>>>,
}

impl<C: Connector> Session<C> {
    /// Create a session manager. No connection is made until
    /// [`Session::ensure_started`] is called.
    pub fn new(connector: C, config: GatewayConfig) -> Self {
        Self {
            connector: Arc::new(connector),
            config,
            slot: Mutex::new(None),
        }
    }

    /// Ensure the gateway session is started and ready, starting it if
    /// necessary.
    ///
    /// Idempotent: an already-ready session returns its link immediately, and
    /// concurrent callers share a single in-flight start attempt. A start
    /// failure is delivered to every waiting caller; the next call after a
    /// failure begins a fresh attempt.
    ///
    /// # Errors
    /// Returns the start error published by the connection task, or
    /// `StartTimeout` if readiness does not arrive within the configured
    /// bound.
    #[instrument(skip(self))]
    pub async fn ensure_started(&self) -> Result<C::Link, GatewayError> {
        let rx = self.current_or_spawn().await;
        self.await_outcome(rx).await
    }

    /// Suspend until the session reaches the ready state.
    ///
    /// Unlike [`Session::ensure_started`] this never initiates a start; with
    /// no attempt in flight it fails with `NotStarted`.
    #[instrument(skip(self))]
    pub async fn wait_until_ready(&self) -> Result<C::Link, GatewayError> {
        let rx = {
            let slot = self.slot.lock().await;
            match slot.as_ref() {
                Some(rx) => rx.clone(),
                None => return Err(GatewayError::new(GatewayErrorKind::NotStarted)),
            }
        };
        self.await_outcome(rx).await
    }

    /// Whether the session is currently ready.
    pub async fn is_ready(&self) -> bool {
        let slot = self.slot.lock().await;
        slot.as_ref()
            .is_some_and(|rx| matches!(&*rx.borrow(), StartState::Ready(_)))
    }

    /// Close the session if it is ready and reset start tracking so a future
    /// start is possible.
    ///
    /// Intended to run exactly once per server lifecycle, after the HTTP
    /// server has finished serving.
    #[instrument(skip(self))]
    pub async fn close(&self) -> Result<(), GatewayError> {
        let link = {
            let mut slot = self.slot.lock().await;
            let link = slot.as_ref().and_then(|rx| match &*rx.borrow() {
                StartState::Ready(link) => Some(link.clone()),
                _ => None,
            });
            *slot = None;
            link
        };

        match link {
            Some(link) => {
                info!("Closing gateway session");
                link.close().await
            }
            None => {
                debug!("No ready gateway session to close");
                Ok(())
            }
        }
    }

    /// Reuse the in-flight or ready attempt, or spawn a new one. Checked and
    /// set under one lock acquisition to enforce single-flight.
    async fn current_or_spawn(&self) -> watch::Receiver<StartState<C::Link>> {
        let mut slot = self.slot.lock().await;
        if let Some(rx) = slot.as_ref() {
            if !matches!(&*rx.borrow(), StartState::Failed(_)) {
                return rx.clone();
            }
            debug!("Previous start attempt failed; starting a new one");
        }

        let rx = self.spawn_start();
        *slot = Some(rx.clone());
        rx
    }

    fn spawn_start(&self) -> watch::Receiver<StartState<C::Link>> {
        info!("Starting gateway session");
        let (tx, rx) = watch::channel(StartState::Starting);
        let (ready_tx, ready_rx) = oneshot::channel();

        let publish = tx.clone();
        tokio::spawn(async move {
            if let Ok(link) = ready_rx.await {
                info!("Gateway session ready");
                let _ = publish.send(StartState::Ready(link));
            }
        });

        let connector = Arc::clone(&self.connector);
        tokio::spawn(async move {
            match connector.run(ready_tx).await {
                Ok(()) => {
                    tx.send_modify(|state| {
                        let kind = if matches!(state, StartState::Starting) {
                            GatewayErrorKind::ClosedBeforeReady
                        } else {
                            GatewayErrorKind::ConnectionClosed
                        };
                        *state = StartState::Failed(GatewayError::new(kind));
                    });
                }
                Err(e) => {
                    warn!(error = %e, "Gateway connection task failed");
                    let _ = tx.send(StartState::Failed(e));
                }
            }
        });

        rx
    }

    async fn await_outcome(
        &self,
        mut rx: watch::Receiver<StartState<C::Link>>,
    ) -> Result<C::Link, GatewayError> {
        let bound = *self.config.start_timeout();
        let wait = async {
            loop {
                let state = rx.borrow_and_update().clone();
                match state {
                    StartState::Ready(link) => return Ok(link),
                    StartState::Failed(e) => return Err(e),
                    StartState::Starting => {
                        if rx.changed().await.is_err() {
                            return Err(GatewayError::new(GatewayErrorKind::ClosedBeforeReady));
                        }
                    }
                }
            }
        };

        match tokio::time::timeout(bound, wait).await {
            Ok(outcome) => outcome,
            Err(_) => Err(GatewayError::new(GatewayErrorKind::StartTimeout(
                bound.as_secs(),
            ))),
        }
    }
}
