//! Tracing setup: structured logging with span definitions and event types.

pub mod events;
pub mod spans;

use tracing_subscriber::EnvFilter;
use vitae_core::config::ObservabilityConfig;

/// Environment variable read for the log filter.
pub const LOG_ENV: &str = "VITAE_LOG";

/// Initialize the tracing subscriber with the default config: JSON output
/// at `info`.
///
/// Respects `VITAE_LOG`. Safe to call more than once; only the first call
/// installs a subscriber.
pub fn init_tracing() {
    init_tracing_from_config(&ObservabilityConfig::default());
}

/// Initialize tracing from an observability config section. `VITAE_LOG`
/// overrides `log_level` when set.
pub fn init_tracing_from_config(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);
    let _ = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
