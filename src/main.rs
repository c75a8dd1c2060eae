use anyhow::Result;
use sentinel_rs::{config::SentinelConfig, http_server, logging, ModelArtifact, RiskScorer};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = SentinelConfig::load()?;

    let log_config = logging::LogConfig::from_server_config(&config.server);
    let _guard = logging::init_logging(&log_config)?;

    // One-time artifact load; failure engages fallback scoring for the
    // process lifetime and is never retried per request.
    let artifact = match ModelArtifact::load(&config.model.path) {
        Ok(artifact) => Some(artifact),
        Err(e) => {
            warn!("Model load failed, fallback scoring engaged: {}", e);
            None
        }
    };
    let scorer = Arc::new(RiskScorer::new(artifact));

    info!(
        "Sentinel backend starting: bind_addr={}, model_loaded={}",
        config.server.bind_addr,
        scorer.has_model()
    );

    http_server::serve(&config, scorer).await?;
    Ok(())
}
