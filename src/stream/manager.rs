//! Process-wide registry of active streaming sessions.

use super::types::Envelope;
use crate::error::DeliveryError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

/// Opaque handle for one admitted session.
pub type SessionId = Uuid;

/// Outbound half of a client transport.
///
/// The production implementation wraps a WebSocket sink; tests substitute
/// a channel-backed sink to drive sessions without a socket.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn send_text(&self, payload: String) -> Result<(), DeliveryError>;
}

/// Tracks live client sessions and delivers point-to-point messages.
///
/// Admission and removal are the only mutators; both run under one lock so
/// concurrent session lifecycles never corrupt the count. Delivery clones
/// the sink out of the registry before sending, so a send never holds the
/// lock and never mutates the registry.
#[derive(Default)]
pub struct ConnectionManager {
    connections: Mutex<HashMap<SessionId, Arc<dyn EventSink>>>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly accepted transport and return its handle.
    pub async fn admit(&self, sink: Arc<dyn EventSink>) -> SessionId {
        let id = Uuid::new_v4();
        let mut connections = self.connections.lock().await;
        connections.insert(id, sink);
        info!(
            "Client connected: {} ({} active)",
            id,
            connections.len()
        );
        id
    }

    /// Remove a session. Idempotent: removing an unknown handle is a
    /// no-op and returns false.
    pub async fn remove(&self, id: &SessionId) -> bool {
        let mut connections = self.connections.lock().await;
        let removed = connections.remove(id).is_some();
        if removed {
            info!(
                "Client disconnected: {} ({} remaining)",
                id,
                connections.len()
            );
        }
        removed
    }

    /// Send one envelope to exactly one session. Failures are returned to
    /// the caller; the registry is left untouched either way.
    pub async fn deliver(&self, id: &SessionId, envelope: &Envelope) -> crate::Result<()> {
        let sink = self
            .connections
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| DeliveryError::UnknownSession(id.to_string()))?;

        let payload = serde_json::to_string(envelope)?;
        sink.send_text(payload).await?;
        Ok(())
    }

    pub async fn active_count(&self) -> usize {
        self.connections.lock().await.len()
    }

    /// Consistent snapshot of the active handles.
    pub async fn handles(&self) -> Vec<SessionId> {
        self.connections.lock().await.keys().copied().collect()
    }
}
