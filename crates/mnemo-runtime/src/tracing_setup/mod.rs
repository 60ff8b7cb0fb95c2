//! Tracing setup: structured JSON logging.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directive.
pub const LOG_ENV: &str = "MNEMO_LOG";

const DEFAULT_DIRECTIVE: &str = "mnemo=info";

/// Initialize the tracing subscriber with structured JSON output.
///
/// Respects `MNEMO_LOG`; defaults to `mnemo=info`. Returns false when a
/// global subscriber was already installed.
pub fn init_tracing() -> bool {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .json()
        .try_init()
        .is_ok()
}

/// Initialize tracing with an explicit filter string.
pub fn init_tracing_with_filter(filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .json()
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_harmless() {
        let _ = init_tracing();
        assert!(!init_tracing());
        assert!(!init_tracing_with_filter("debug"));
    }
}
