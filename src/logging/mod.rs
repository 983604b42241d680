//! Logging and observability
//!
//! Structured logging with the `tracing` stack: console output always, plus
//! an optional daily-rotated file layer when a log directory is configured.
//! Initialize once at startup and keep the returned guard alive for the
//! program's lifetime so buffered file output is flushed.

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Guard that must be kept alive for the duration of the program
/// to ensure logs are flushed properly
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize the logging system
///
/// `level_override` (from the CLI) wins over the configured level; the
/// `RUST_LOG` environment variable wins over both.
pub fn init_logging(config: &LoggingConfig, level_override: Option<&str>) -> Result<LoggingGuard> {
    let level = level_override.unwrap_or(&config.level);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("Invalid log level: {level}"))?;

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, file_guard) = match &config.dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
            let appender = rolling::daily(dir, "scour.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_directive_rejected() {
        let config = LoggingConfig {
            level: "scour=info=debug".to_string(),
            dir: None,
        };
        let result = EnvFilter::try_new(&config.level);
        assert!(result.is_err());
    }
}
