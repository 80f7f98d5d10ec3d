//! Top-level error wrapper types.

use crate::{ConfigError, GatewayError, ServerError};

/// This is the foundation error enum. Each Beacon crate converts its local
/// error type into a variant here at the workspace boundary.
///
/// # Examples
///
/// ```
/// use beacon_error::{BeaconError, ConfigError};
///
/// let config_err = ConfigError::new("DISCORD_BOT_TOKEN not set");
/// let err: BeaconError = config_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum BeaconErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Gateway session error
    #[from(GatewayError)]
    Gateway(GatewayError),
    /// HTTP server error
    #[from(ServerError)]
    Server(ServerError),
}

/// Beacon error with kind discrimination.
///
/// # Examples
///
/// ```
/// use beacon_error::{BeaconResult, GatewayError, GatewayErrorKind};
///
/// fn might_fail() -> BeaconResult<()> {
///     Err(GatewayError::new(GatewayErrorKind::NotStarted))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Beacon Error: {}", _0)]
pub struct BeaconError(Box<BeaconErrorKind>);

impl BeaconError {
    /// Create a new error from a kind.
    pub fn new(kind: BeaconErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &BeaconErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to BeaconErrorKind
impl<T> From<T> for BeaconError
where
    T: Into<BeaconErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Beacon operations.
pub type BeaconResult<T> = std::result::Result<T, BeaconError>;
