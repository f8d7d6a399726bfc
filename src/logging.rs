//! Log setup for the CLI.
//!
//! Logs go to stderr so reports on stdout stay machine-readable. `RUST_LOG`
//! takes precedence over the level passed in, e.g.
//! `RUST_LOG=queue_sim::engine=trace` prints every client assignment.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Ignored when a subscriber is already installed.
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .try_init();
}
