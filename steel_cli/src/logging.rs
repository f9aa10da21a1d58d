//! Logging setup with `tracing-subscriber`.
//!
//! `RUST_LOG` sets the filter (default `info`), e.g. `RUST_LOG=steel_core=debug`.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialise logging for the CLI. Log lines go to stderr so stdout stays
/// clean for results.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Debug-level logging captured by the test harness
#[cfg(test)]
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
