//! Avents Telemetry - Logging setup for applications embedding avents.
//!
//! The `avents` crate emits `tracing` events (subscriptions created and
//! removed, conservative notifiers enabled and disabled, avents rejected by
//! filters) but never installs a subscriber. This crate provides:
//! - Configurable logging setup with multiple formats
//! - A serde/TOML-loadable [`LogConfig`]
//!
//! # Example
//!
//! ```rust,no_run
//! use avents_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), avents_telemetry::TelemetryError> {
//! let config = LogConfig::new("info")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("avents=debug");
//!
//! setup_logging(&config)?;
//! tracing::info!("Logging ready");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, LogFormat, LogTarget, setup_default_logging, setup_logging};
