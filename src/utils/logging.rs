//! Tracing subscriber initialization for the binary.

use crate::utils::toml_config::LoggingConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the filter: `RUST_LOG` wins, then `--verbose`, then the configured level.
pub fn env_filter(config: &LoggingConfig, verbose: bool) -> EnvFilter {
    let fallback = if verbose { "debug" } else { config.level.as_str() };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install the global subscriber. Logs go to stderr so stdout stays JSON.
pub fn init_tracing(config: &LoggingConfig, verbose: bool) {
    let filter = env_filter(config, verbose);
    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("tracing already initialized: {}", e);
    }
}
