// src/logging.rs

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info,sheetfeed=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| match std::env::var("LOG_LEVEL") {
        Ok(level) => EnvFilter::new(DEFAULT_FILTER)
            .add_directive(level.parse().unwrap_or(Level::INFO.into())),
        Err(_) => EnvFilter::new(DEFAULT_FILTER),
    })
}

/// Install the global fmt subscriber, writing to stderr so stdout stays
/// clean for JSON output. `RUST_LOG` wins over `LOG_LEVEL`.
pub fn init() {
    let _ = fmt::Subscriber::builder()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Subscriber for unit tests; output is captured by the test harness.
#[cfg(test)]
pub(crate) fn init_test() {
    let _ = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,sheetfeed=debug")),
        )
        .with_test_writer()
        .try_init();
}
