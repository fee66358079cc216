//! Structured logging with tracing
//!
//! Two output modes, selected by [`LoggingConfig::json_format`]:
//!
//! - JSON: [`StructuredLogLayer`] renders one `{ts, level, logger, message,
//!   correlationId, ...}` object per line.
//! - Text: the `tracing-subscriber` fmt layer.
//!
//! `MES_LOG` overrides the configured level with a full `EnvFilter`
//! directive.

pub mod layer;
pub mod record;
pub mod sink;

pub use layer::StructuredLogLayer;
pub use record::LogRecord;
pub use sink::{LogSink, MemoryLogSink, WriterSink};

// Re-export LoggingConfig for convenience
pub use crate::config::LoggingConfig;

use crate::constants::LOG_ENV_VAR;
use crate::error_ext::ErrorContext;
use mes_domain::error::{Error, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::{Level, info, warn};
use tracing_appender::rolling::{self, RollingFileAppender};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};

/// Initialize the global subscriber from `config`
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(&config.level));
    let registry = Registry::default().with(filter);

    if config.json_format {
        let sink: Arc<dyn LogSink> = match &config.file_output {
            Some(path) => Arc::new(WriterSink::new(file_appender(path))),
            None => Arc::new(WriterSink::new(std::io::stdout)),
        };
        registry
            .with(StructuredLogLayer::new(sink))
            .try_init()
            .context("Failed to install log subscriber")?;
    } else {
        let stdout = fmt::layer().with_target(true).with_thread_names(true);
        let file = config.file_output.as_deref().map(|path| {
            fmt::layer()
                .with_writer(file_appender(path))
                .with_ansi(false)
                .with_target(true)
        });
        registry
            .with(stdout)
            .with(file)
            .try_init()
            .context("Failed to install log subscriber")?;
    }

    info!("Logging initialized with level: {}", level);
    Ok(())
}

fn file_appender(path: &Path) -> RollingFileAppender {
    rolling::daily(
        path.parent().unwrap_or_else(|| Path::new(".")),
        path.file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("mes.log")),
    )
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}

/// Log configuration loading status
pub fn log_config_loaded(config_path: &Path, success: bool) {
    if success {
        info!("Configuration loaded from {}", config_path.display());
    } else {
        warn!("Configuration file not found: {}", config_path.display());
    }
}
