//! Logging initialization. Everything goes to stderr so stdout stays clean
//! for tables and `--json` output.

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// `RUST_LOG` wins over everything; otherwise `--debug`, otherwise the
/// configured level.
pub fn filter_directive(config: &LoggingConfig, debug_override: bool, env: Option<String>) -> String {
    let level = if debug_override {
        "debug".to_string()
    } else {
        config.level.clone()
    };
    env.filter(|v| !v.trim().is_empty()).unwrap_or(level)
}

pub fn init_logging(config: &LoggingConfig, debug_override: bool) -> Result<()> {
    let directive = filter_directive(config, debug_override, std::env::var("RUST_LOG").ok());
    let filter = EnvFilter::try_new(&directive)
        .map_err(|err| anyhow!("invalid log filter `{directive}`: {err}"))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|err| anyhow!("logging already initialized: {err}"))?;

    tracing::debug!(filter = %directive, "logging initialized");
    Ok(())
}
