//! Error types for the Beacon presence service.
//!
//! This crate provides the foundation error types used throughout the Beacon
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error
//! handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use beacon_error::{BeaconResult, ConfigError};
//!
//! fn load_token() -> BeaconResult<String> {
//!     Err(ConfigError::new("DISCORD_BOT_TOKEN not set"))?
//! }
//!
//! match load_token() {
//!     Ok(token) => println!("Got token of length {}", token.len()),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod gateway;
mod server;

pub use config::ConfigError;
pub use error::{BeaconError, BeaconErrorKind, BeaconResult};
pub use gateway::{GatewayError, GatewayErrorKind, GatewayResult};
pub use server::{ServerError, ServerErrorKind};
