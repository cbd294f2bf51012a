//! Console logging setup: `RUST_LOG`-style filter, human-readable lines on stderr.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub log_level: String,
    /// Include span targets (module paths) in each line.
    pub with_target: bool,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self {
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            with_target: std::env::var("LOG_TARGET")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
        }
    }

    /// Raise the level to `debug` unless RUST_LOG already says otherwise.
    pub fn verbose(mut self, verbose: bool) -> Self {
        if verbose && std::env::var("RUST_LOG").is_err() {
            self.log_level = "debug".to_string();
        }
        self
    }
}

/// Console logging on stderr, so stdout stays free for results.
pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.log_level)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(config.with_target),
        )
        .try_init()?;
    Ok(())
}
