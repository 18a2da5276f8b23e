//! Avents Test - Shared test utilities for avents.
//!
//! This crate provides recording handlers and callback counters that can be
//! used across the avents crates as a dev-dependency.
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! avents-test.workspace = true
//! ```
//!
//! Then use in your tests:
//!
//! ```rust,ignore
//! #[cfg(test)]
//! mod tests {
//!     use avents::EventNotifier;
//!     use avents_test::Recorder;
//!
//!     #[test]
//!     fn test_delivery() {
//!         let recorder: Recorder<i32> = Recorder::new();
//!         let notifier: EventNotifier<i32> = EventNotifier::new();
//!         notifier.subscribe(recorder.handler("first"));
//!
//!         notifier.notify(&1);
//!         assert_eq!(recorder.tagged(), vec![("first", 1)]);
//!     }
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod prelude;

pub mod logging;
pub mod mocks;

pub use logging::*;
pub use mocks::*;
