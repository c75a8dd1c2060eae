//! Tracing setup: console output with an env filter, optional rolling file.

use anyhow::Result;
use std::path::PathBuf;
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Directory for daily-rotated log files; None disables file output
    pub log_dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl LogConfig {
    pub fn from_server_config(server_config: &crate::config::ServerConfig) -> Self {
        let mut config = Self::default();
        if let Some(ref level) = server_config.log_level {
            config.level = level.clone();
        }
        if let Ok(dir) = std::env::var("SENTINEL_LOG_DIR") {
            config.log_dir = Some(PathBuf::from(dir));
        }
        config
    }
}

/// Initialize the global subscriber. The returned guard must be held for
/// the process lifetime or buffered file output is lost on shutdown.
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sentinel_rs={0},tower_http={0}", config.level)));

    let console_layer = fmt::layer().with_target(true);

    match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = rolling::daily(dir, "sentinel.log");
            let (writer, guard) = non_blocking(file_appender);
            let file_layer = fmt::layer().with_ansi(false).with_writer(writer);

            tracing_subscriber::registry()
                .with(filter)
                .with(console_layer)
                .with(file_layer)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(console_layer)
                .init();
            Ok(None)
        }
    }
}
