//! Test logging.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install a test-writer subscriber so `tracing` output shows up in failing
/// tests. Honors `RUST_LOG` and defaults to `avents=trace`.
///
/// Safe to call from every test; only the first call installs anything, and
/// an already installed global subscriber is left in place.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("avents=trace"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
