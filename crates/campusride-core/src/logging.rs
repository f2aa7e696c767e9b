//! Diagnostic logging setup.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "CAMPUSRIDE_LOG";
const DEFAULT_FILTER: &str = "warn";

/// Installs the global stderr subscriber, filtered by `CAMPUSRIDE_LOG`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
