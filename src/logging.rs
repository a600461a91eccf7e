//! Logging setup.
//!
//! Structured logging goes through `tracing`; this module installs the
//! `tracing-subscriber` formatter. The level filter is read from `RUST_LOG`
//! and defaults to `info`, e.g. `RUST_LOG=payroll_engine=debug`.

use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global subscriber.
///
/// Returns `false` if a subscriber was already installed, in which case the
/// existing one is kept.
///
/// ```no_run
/// payroll_engine::logging::init();
/// ```
pub fn init() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .try_init()
        .is_ok()
}

/// Installs a debug-level subscriber that writes through the test harness.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
