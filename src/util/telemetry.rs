//! Telemetry helpers for structured logging and tracing.

use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber filtered by `directive` (for example `info` or
/// `thanks_sender=debug`). Falls back to `RUST_LOG` when the directive is empty
/// or invalid. Does nothing if a subscriber is already set.
pub fn init_tracing(directive: &str) {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let filter = if directive.trim().is_empty() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::from_default_env())
    };
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
