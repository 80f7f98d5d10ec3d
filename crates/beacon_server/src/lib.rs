//! HTTP API for the Beacon presence service.
//!
//! Exposes the presence resolver over two lookup routes (a JSON body route
//! and a path-parameter route), plus health and metrics endpoints. The
//! gateway session behind the resolver is started lazily by the first lookup
//! request and closed once when the server stops serving.
//!
//! # Usage
//!
//! ```rust,ignore
//! use beacon_gateway::{DiscordConnector, Session};
//! use beacon_server::{ApiState, GatewayPresenceService, LookupMetrics, ServiceConfig, serve};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServiceConfig::from_env()?;
//!     let session = Arc::new(Session::new(
//!         DiscordConnector::new(config.gateway.clone()),
//!         config.gateway.clone(),
//!     ));
//!     let state = ApiState::new(
//!         Arc::new(GatewayPresenceService::new(Arc::clone(&session))),
//!         Arc::new(LookupMetrics::new()),
//!     );
//!     serve(&config, state).await?;
//!     session.close().await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod config;
mod metrics;
mod request;
mod response;
mod serve;
mod service;

pub use api::{ApiState, create_router};
pub use beacon_error::{ServerError, ServerErrorKind};
pub use config::ServiceConfig;
pub use metrics::{LookupMetrics, MetricsSnapshot};
pub use request::UserQuery;
pub use response::{ApiError, StatusResponse};
pub use serve::serve;
pub use service::{GatewayPresenceService, PresenceService};
