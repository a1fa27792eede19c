//! Tracing setup for harness runs.
//!
//! Diagnostics go to stderr and follow `RUST_LOG`; the rendered result
//! tables on stdout are the product output and are unaffected.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the subscriber. Defaults to `info` when `RUST_LOG` is
/// unset, so step successes and failures are visible as they happen.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
