//! Tests for the gateway session lifecycle manager.

use async_trait::async_trait;
use beacon_error::{GatewayError, GatewayErrorKind};
use beacon_gateway::{Connector, GatewayConfig, GatewayConfigBuilder, Session, SessionLink};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::oneshot;

/// Link handle that records how many times it was closed.
#[derive(Clone, Debug)]
struct FakeLink {
    closes: Arc<AtomicUsize>,
}

#[async_trait]
impl SessionLink for FakeLink {
    async fn close(&self) -> Result<(), GatewayError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Scripted connector: fails the first `failures` runs, then becomes ready
/// after a short delay and stays connected until the test ends.
struct FakeConnector {
    runs: Arc<AtomicUsize>,
    closes: Arc<AtomicUsize>,
    failures: usize,
    never_ready: bool,
}

impl FakeConnector {
    fn new(failures: usize) -> Self {
        Self {
            runs: Arc::new(AtomicUsize::new(0)),
            closes: Arc::new(AtomicUsize::new(0)),
            failures,
            never_ready: false,
        }
    }

    fn stalled() -> Self {
        Self {
            never_ready: true,
            ..Self::new(0)
        }
    }
}

#[async_trait]
impl Connector for FakeConnector {
    type Link = FakeLink;

    async fn run(&self, ready: oneshot::Sender<FakeLink>) -> Result<(), GatewayError> {
        let run = self.runs.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(10)).await;

        if self.never_ready {
            std::future::pending::<()>().await;
        }
        if run < self.failures {
            return Err(GatewayError::new(GatewayErrorKind::ConnectionFailed(
                "scripted failure".into(),
            )));
        }

        let _ = ready.send(FakeLink {
            closes: Arc::clone(&self.closes),
        });
        // Stay connected; the session owns shutdown.
        std::future::pending::<()>().await;
        Ok(())
    }
}

fn session(connector: FakeConnector) -> Session<FakeConnector> {
    Session::new(connector, GatewayConfig::new("test-token"))
}

#[tokio::test]
async fn concurrent_starts_collapse_into_one_attempt() {
    let connector = FakeConnector::new(0);
    let runs = Arc::clone(&connector.runs);
    let session = Arc::new(session(connector));

    let callers: Vec<_> = (0..8)
        .map(|_| {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.ensure_started().await })
        })
        .collect();

    for caller in futures::future::join_all(callers).await {
        assert!(caller.unwrap().is_ok());
    }
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn ensure_started_is_idempotent_once_ready() {
    let connector = FakeConnector::new(0);
    let runs = Arc::clone(&connector.runs);
    let session = session(connector);

    session.ensure_started().await.unwrap();
    session.ensure_started().await.unwrap();
    session.ensure_started().await.unwrap();

    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert!(session.is_ready().await);
}

#[tokio::test]
async fn start_failure_reaches_every_waiter_and_is_retryable() {
    let connector = FakeConnector::new(1);
    let runs = Arc::clone(&connector.runs);
    let session = Arc::new(session(connector));

    let first = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.ensure_started().await })
    };
    let second = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.ensure_started().await })
    };

    for outcome in [first.await.unwrap(), second.await.unwrap()] {
        let err = outcome.expect_err("first attempt is scripted to fail");
        assert!(matches!(
            err.kind(),
            GatewayErrorKind::ConnectionFailed(_)
        ));
    }
    assert_eq!(runs.load(Ordering::SeqCst), 1);

    // The failed slot does not wedge the session: the next call starts over.
    session.ensure_started().await.unwrap();
    assert_eq!(runs.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn wait_until_ready_requires_a_start_attempt() {
    let session = session(FakeConnector::new(0));
    let err = session.wait_until_ready().await.unwrap_err();
    assert!(matches!(err.kind(), GatewayErrorKind::NotStarted));
}

#[tokio::test]
async fn wait_until_ready_joins_the_inflight_attempt() {
    let connector = FakeConnector::new(0);
    let runs = Arc::clone(&connector.runs);
    let session = Arc::new(session(connector));

    let starter = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.ensure_started().await })
    };
    // Give the starter a moment to claim the slot.
    tokio::time::sleep(Duration::from_millis(2)).await;

    session.wait_until_ready().await.unwrap();
    starter.await.unwrap().unwrap();
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn close_releases_the_link_and_permits_a_fresh_start() {
    let connector = FakeConnector::new(0);
    let runs = Arc::clone(&connector.runs);
    let closes = Arc::clone(&connector.closes);
    let session = session(connector);

    session.ensure_started().await.unwrap();
    session.close().await.unwrap();

    assert_eq!(closes.load(Ordering::SeqCst), 1);
    assert!(!session.is_ready().await);

    session.ensure_started().await.unwrap();
    assert_eq!(runs.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn close_without_a_ready_session_is_a_no_op() {
    let connector = FakeConnector::new(0);
    let closes = Arc::clone(&connector.closes);
    let session = session(connector);

    session.close().await.unwrap();
    assert_eq!(closes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn stalled_start_times_out_with_a_distinct_kind() {
    let config = GatewayConfigBuilder::default()
        .token("test-token")
        .start_timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let session = Session::new(FakeConnector::stalled(), config);

    let err = session.ensure_started().await.unwrap_err();
    assert!(matches!(err.kind(), GatewayErrorKind::StartTimeout(_)));
}
