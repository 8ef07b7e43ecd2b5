//! Tracing setup for the binaries.

use tracing_subscriber::EnvFilter;

/// Install a stderr `fmt` subscriber filtered by `directives`.
///
/// Invalid directives fall back to `warn`. Calling this twice is harmless; the
/// second install is ignored.
pub fn init_logging(directives: &str) {
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
