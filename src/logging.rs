// Logging
// Human-readable tracing output on stderr

use std::io;
use std::sync::Once;

use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install the global tracing subscriber
///
/// The filter comes from `RUST_LOG`; without it, `info` and above are shown,
/// or `debug` when `verbose` is set. Later calls do nothing.
pub fn init_logging(verbose: bool) {
    INIT.call_once(|| {
        let default_level = if verbose { "debug" } else { "info" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(false)
            .try_init();
    });
}
