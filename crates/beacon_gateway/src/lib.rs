//! Discord gateway integration for Beacon.
//!
//! This crate owns the two pieces of machinery behind the presence service:
//!
//! - **Session lifecycle**: a single long-lived gateway connection that is
//!   started lazily on first use, shared by every caller through single-flight
//!   semantics, and closed once when the server shuts down.
//! - **Presence resolution**: a cascading lookup that walks every guild the
//!   session belongs to, consulting the member cache, a targeted REST fetch,
//!   and a live gateway member query in turn until a usable status appears.
//!
//! # Architecture
//!
//! The lifecycle manager ([`Session`]) and the resolver
//! ([`resolve_presence`]) are written against narrow capability traits
//! ([`Connector`], [`SessionLink`], [`PresenceSource`]) so tests can
//! substitute fakes. The production implementations backed by Serenity live
//! in the [`discord`] module.
//!
//! # Usage
//!
//! ```rust,ignore
//! use beacon_gateway::{DiscordConnector, GatewayConfig, Session, resolve_presence};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GatewayConfig::new(std::env::var("DISCORD_BOT_TOKEN")?);
//!     let session = Session::new(DiscordConnector::new(config.clone()), config);
//!
//!     let link = session.ensure_started().await?;
//!     let resolution = resolve_presence(&link, 80351110224678912.into()).await?;
//!     println!("{:?}", resolution);
//!
//!     session.close().await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod discord;
mod member;
mod resolver;
mod session;
mod source;
mod status;

pub use beacon_error::{GatewayError, GatewayErrorKind, GatewayResult};
pub use config::{GatewayConfig, GatewayConfigBuilder};
pub use discord::{DiscordConnector, DiscordLink, GatewayHandler};
pub use member::{Lookup, MemberPresence};
pub use resolver::{Resolution, resolve_presence};
pub use session::{Connector, Session, SessionLink};
pub use source::PresenceSource;
pub use status::PresenceStatus;

// Serenity id types are part of this crate's public API surface.
pub use serenity::model::id::{GuildId, UserId};
