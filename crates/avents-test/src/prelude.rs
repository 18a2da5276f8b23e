//! Prelude module - commonly used test utilities.
//!
//! Use `use avents_test::prelude::*;` in test modules.

pub use crate::{CallCounter, Recorder, init_test_logging};
