//! Per-connection streaming session: a cancellable background loop that
//! generates, scores and delivers one transaction per tick.

use super::generator::{GeneratorConfig, TransactionGenerator};
use super::manager::{ConnectionManager, SessionId};
use super::types::Envelope;
use crate::config::StreamConfig;
use crate::scoring::RiskScorer;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Owns the generation loop for one admitted connection.
///
/// The loop ends on cancellation, delivery failure, or task abort; every
/// exit path removes the session from the manager (removal is idempotent,
/// so racing with the transport-side cleanup is harmless).
pub struct StreamSession {
    id: SessionId,
    cancel: CancellationToken,
    task: JoinHandle<u64>,
}

impl StreamSession {
    /// Spawn the loop for an already-admitted session.
    pub fn spawn(
        id: SessionId,
        manager: Arc<ConnectionManager>,
        scorer: Arc<RiskScorer>,
        config: StreamConfig,
    ) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let task = tokio::spawn(run_stream(id, manager, scorer, config, token));
        Self { id, cancel, task }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Signal cancellation without waiting; the loop observes it at its
    /// next suspension point (within one tick interval).
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Cancel and wait for the loop to finish. Returns the tick count.
    pub async fn shutdown(self) -> u64 {
        self.cancel.cancel();
        self.task.await.unwrap_or(0)
    }
}

async fn run_stream(
    id: SessionId,
    manager: Arc<ConnectionManager>,
    scorer: Arc<RiskScorer>,
    config: StreamConfig,
    cancel: CancellationToken,
) -> u64 {
    info!("Starting transaction stream for session {}", id);

    let generator = TransactionGenerator::new(GeneratorConfig {
        anomaly_bias: config.anomaly_bias,
        ..GeneratorConfig::default()
    });
    let interval = Duration::from_millis(config.tick_interval_ms);
    let mut ticks: u64 = 0;

    loop {
        ticks += 1;

        match generator.generate() {
            Ok((event, hints)) => {
                let result = scorer.score(&event, &hints);
                let amount = event.amount;
                let threat_level = result.threat_level;
                let is_anomaly = result.is_anomaly;

                let envelope = Envelope::transaction(event, result);
                if let Err(e) = manager.deliver(&id, &envelope).await {
                    warn!("Delivery failed for session {}: {}", id, e);
                    break;
                }

                if ticks % config.summary_every.max(1) == 0 {
                    info!(
                        "Session {}: sent {} transactions, last: ${:.2} ({})",
                        id, ticks, amount, threat_level
                    );
                }
                if is_anomaly {
                    warn!(
                        "Session {}: anomaly #{}: ${:.2} - {}",
                        id, ticks, amount, threat_level
                    );
                }
            }
            // a failed tick is skipped, never stalls the loop
            Err(e) => warn!("Session {}: event generation failed: {}", id, e),
        }

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }

    manager.remove(&id).await;
    info!("Stream ended for session {} after {} ticks", id, ticks);
    ticks
}
