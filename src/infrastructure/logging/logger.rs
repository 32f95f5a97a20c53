use super::config::{LogConfig, LogFormat};
use anyhow::{Context, Result};
use std::io;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Logger implementation using tracing
///
/// Logs go to stderr so stdout stays free for command output.
#[derive(Debug)]
pub struct LoggerImpl {
    level: LevelFilter,
    format: LogFormat,
}

impl LoggerImpl {
    /// Initialize the global subscriber with the given configuration
    ///
    /// # Errors
    /// Returns an error if the level is invalid or a global subscriber is
    /// already installed
    pub fn init(config: &LogConfig) -> Result<Self> {
        let default_level = parse_log_level(&config.level)?;

        let env_filter = EnvFilter::builder()
            .with_default_directive(default_level.into())
            .from_env_lossy();

        match config.format {
            LogFormat::Json => {
                let stderr_layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(io::stderr)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(env_filter);

                tracing_subscriber::registry()
                    .with(stderr_layer)
                    .try_init()
                    .context("Failed to install JSON log subscriber")?;
            }
            LogFormat::Pretty => {
                let stderr_layer = tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(env_filter);

                tracing_subscriber::registry()
                    .with(stderr_layer)
                    .try_init()
                    .context("Failed to install pretty log subscriber")?;
            }
        }

        tracing::info!(
            level = %config.level,
            format = ?config.format,
            "logger initialized"
        );

        Ok(Self {
            level: default_level,
            format: config.format,
        })
    }

    pub const fn level(&self) -> LevelFilter {
        self.level
    }

    pub const fn format(&self) -> LogFormat {
        self.format
    }
}

/// Parse a log level name into a filter.
///
/// Besides the tracing levels, `fatal` maps to `error` and `silent` turns
/// logging off.
pub fn parse_log_level(level: &str) -> Result<LevelFilter> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(LevelFilter::TRACE),
        "debug" => Ok(LevelFilter::DEBUG),
        "info" => Ok(LevelFilter::INFO),
        "warn" => Ok(LevelFilter::WARN),
        "error" | "fatal" => Ok(LevelFilter::ERROR),
        "silent" => Ok(LevelFilter::OFF),
        _ => anyhow::bail!("Invalid log level: {level}"),
    }
}
