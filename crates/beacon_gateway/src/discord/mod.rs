//! Serenity-backed gateway implementation.
//!
//! Production implementations of the session and lookup seams:
//!
//! - **connector**: builds the Serenity client and drives the connection for
//!   its whole lifetime.
//! - **handler**: Serenity event handler that publishes the session link on
//!   ready and routes member-chunk responses back to their waiting queries.
//! - **link**: the cheaply-clonable handle request handlers use to read guild
//!   caches and issue fetches/queries.
//! - **convert**: Serenity model types reduced to this crate's domain types.

mod connector;
mod convert;
mod handler;
mod link;

pub use connector::DiscordConnector;
pub use handler::GatewayHandler;
pub use link::DiscordLink;
