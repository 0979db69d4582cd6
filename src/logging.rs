//! Logging and tracing setup for the portal client.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directives used when `RUST_LOG` is unset. The HTTP stack only reports
/// warnings; exchanges are already logged by the API client.
pub const DEFAULT_FILTER: &str = "seva_portal=info,reqwest=warn,hyper=warn,hyper_util=warn";

fn filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Initialize the tracing subscriber with JSON formatting.
///
/// Reads directives from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
pub fn init() {
    tracing_subscriber::registry()
        .with(filter_or(DEFAULT_FILTER))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(false),
        )
        .init();
}

/// Human-readable output captured by the test harness.
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(filter_or("seva_portal=debug,axum=warn,hyper=warn"))
        .try_init();
}
