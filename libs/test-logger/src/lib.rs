//! Logger for tests.
//!
//! Installs a process wide subscriber the first time [LOGGER_INIT] is dereferenced, so every test in a binary can
//! ask for logs without racing to install its own. Filtering follows `RUST_LOG`.

use once_cell::sync::Lazy;

/// Dereferencing this installs the test subscriber, once per process.
pub static LOGGER_INIT: Lazy<fn()> = Lazy::new(logger_init);

fn logger_init() -> fn() {
    #[cfg(feature = "tracing")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
        // Another harness may already own the global subscriber.
        let _ = tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().try_init();
    }
    || ()
}
