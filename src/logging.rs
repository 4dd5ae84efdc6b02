//! Logger setup
//!
//! Logs go to stderr so that stdout only ever carries rendered output.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `ghcard=info` (or `ghcard=debug`
/// when `verbose` is set).
pub fn init_logger(verbose: bool) {
    let fallback = if verbose { "ghcard=debug" } else { "ghcard=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .compact(),
        )
        .init();
}
