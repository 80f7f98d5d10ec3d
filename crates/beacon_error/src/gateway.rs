//! Gateway error types.
//!
//! Errors produced while starting, driving, or querying the Discord gateway
//! session.

use derive_getters::Getters;

/// Gateway error variants.
///
/// Represents error conditions arising from the gateway session lifecycle and
/// the member/presence lookup strategies.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum GatewayErrorKind {
    /// Connection to the Discord gateway failed.
    #[display("Connection failed: {_0}")]
    ConnectionFailed(String),

    /// The connection task ended before the session ever became ready.
    #[display("Gateway closed before becoming ready")]
    ClosedBeforeReady,

    /// The connection ended after the session had been ready.
    #[display("Gateway connection closed")]
    ConnectionClosed,

    /// A readiness wait was issued with no start attempt in flight.
    #[display("Gateway session not started")]
    NotStarted,

    /// The session did not become ready within the configured bound.
    #[display("Gateway start timed out after {_0}s")]
    StartTimeout(u64),

    /// A member fetch failed at the transport layer.
    #[display("Member fetch failed: {_0}")]
    Fetch(String),

    /// A member query failed at the transport layer.
    #[display("Member query failed: {_0}")]
    QueryFailed(String),

    /// A member query received no response within the configured bound.
    #[display("Member query timed out after {_0}s")]
    QueryTimeout(u64),
}

/// Gateway error with source location tracking.
///
/// Captures the error kind along with the file and line where the error
/// occurred. `Clone` is required because a failed start attempt is replayed
/// to every caller awaiting it.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Gateway Error: {} at line {} in {}", kind, line, file)]
pub struct GatewayError {
    kind: GatewayErrorKind,
    line: u32,
    file: &'static str,
}

impl GatewayError {
    /// Create a new GatewayError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use beacon_error::{GatewayError, GatewayErrorKind};
    ///
    /// let err = GatewayError::new(GatewayErrorKind::NotStarted);
    /// ```
    #[track_caller]
    pub fn new(kind: GatewayErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;
