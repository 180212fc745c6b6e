//! `tracing-subscriber` initialisation (§6 ambient expansion).
//!
//! The service logs structured spans around refresh/search/resolve via
//! `tracing`; this module wires a single process-wide subscriber writing to
//! stderr (stdout is reserved for the MCP stdio transport), controlled by
//! `RUST_LOG` or the CLI's `--log-level` flag.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

/// Initialise the global `tracing` subscriber.
///
/// `default_level` is used when `RUST_LOG` is unset; valid values are the
/// usual `tracing` level names (`error`, `warn`, `info`, `debug`, `trace`).
/// Safe to call once per process; a second call is a no-op logged at
/// `warn`.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::warn!("tracing subscriber already initialised, ignoring second init() call");
    }
}
