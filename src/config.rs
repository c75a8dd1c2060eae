//! Process configuration: defaults, optional TOML file, environment override.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SentinelConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub stream: StreamConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Bind address for the HTTP/WebSocket listener
    pub bind_addr: String,
    /// Allowed CORS origins; "*" enables the permissive layer
    pub allowed_origins: Vec<String>,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Path to the trained model bundle produced by the offline trainer
    pub path: String,
}

/// Tuning knobs for the per-connection event stream.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StreamConfig {
    /// Pause between ticks, in milliseconds
    pub tick_interval_ms: u64,
    /// Probability of generating an anomalous-shaped transaction
    pub anomaly_bias: f64,
    /// Emit a summary log every N ticks
    pub summary_every: u64,
}

impl Default for SentinelConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_addr: "0.0.0.0:8000".to_string(),
                allowed_origins: vec!["*".to_string()],
                log_level: Some("info".to_string()),
            },
            model: ModelConfig {
                path: "data/trained_model.json".to_string(),
            },
            stream: StreamConfig::default(),
        }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1200,
            anomaly_bias: 0.12,
            summary_every: 10,
        }
    }
}

impl SentinelConfig {
    /// Load configuration: defaults, then an optional config file, then
    /// environment variables with the SENTINEL prefix.
    pub fn load() -> Result<Self, crate::Error> {
        let mut settings = config::Config::builder();

        let default_config = SentinelConfig::default();
        settings = settings.add_source(
            config::Config::try_from(&default_config)
                .map_err(|e| crate::Error::Config(e.to_string()))?,
        );

        let config_paths = ["sentinel.toml", "config.toml", "config/sentinel.toml"];
        for path in &config_paths {
            if std::path::Path::new(path).exists() {
                settings = settings.add_source(config::File::with_name(path));
                break;
            }
        }

        // Environment override (e.g. SENTINEL_SERVER_BIND_ADDR=0.0.0.0:9000)
        settings = settings.add_source(
            config::Environment::with_prefix("SENTINEL")
                .separator("_")
                .try_parsing(true),
        );

        let mut final_config: SentinelConfig = settings
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| crate::Error::Config(e.to_string()))?;

        // Deployment platforms hand out the port via PORT
        if let Ok(port) = std::env::var("PORT") {
            let port: u16 = port
                .parse()
                .map_err(|_| crate::Error::Config(format!("invalid PORT value: {}", port)))?;
            final_config.server.bind_addr = format!("0.0.0.0:{}", port);
        }

        if let Ok(model_path) = std::env::var("MODEL_PATH") {
            final_config.model.path = model_path;
        }

        Ok(final_config)
    }
}
