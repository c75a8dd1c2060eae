//! HTTP and WebSocket surface: status, health, and the streaming endpoint.

use crate::config::{SentinelConfig, ServerConfig};
use crate::error::{DeliveryError, Error};
use crate::scoring::RiskScorer;
use crate::stream::{ConnectionManager, EventSink, StreamSession};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::{Json, Response},
    routing::get,
    Router,
};
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// Shared state behind every route.
pub struct AppState {
    pub manager: Arc<ConnectionManager>,
    pub scorer: Arc<RiskScorer>,
    pub stream: crate::config::StreamConfig,
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: &SentinelConfig, scorer: Arc<RiskScorer>) -> crate::Result<()> {
    let state = Arc::new(AppState {
        manager: Arc::new(ConnectionManager::new()),
        scorer,
        stream: config.stream.clone(),
    });
    let app = router(state, &config.server);

    info!("Starting sentinel server on {}", config.server.bind_addr);
    let listener = TcpListener::bind(&config.server.bind_addr)
        .await
        .map_err(|e| Error::Server(format!("Failed to bind: {}", e)))?;
    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Server(e.to_string()))?;

    Ok(())
}

pub fn router(state: Arc<AppState>, server: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(root_status))
        .route("/health", get(health))
        .route("/ws/stream", get(websocket_handler))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(&server.allowed_origins))
        .with_state(state)
}

fn build_cors(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<_> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root_status() -> Json<Value> {
    Json(json!({
        "status": "running",
        "message": "Sentinel risk-scoring stream server",
    }))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "model_loaded": state.scorer.has_model(),
    }))
}

async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Per-connection lifecycle: admit, stream, observe close, clean up.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();
    let sink = Arc::new(WsSink {
        sender: Mutex::new(sender),
    });

    let session_id = state.manager.admit(sink).await;
    let session = StreamSession::spawn(
        session_id,
        state.manager.clone(),
        state.scorer.clone(),
        state.stream.clone(),
    );

    // The stream is server-push only; inbound frames are drained just to
    // observe Close and transport errors.
    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Close(_)) => {
                debug!("Close frame received for session {}", session_id);
                break;
            }
            Ok(_) => {}
            Err(e) => {
                debug!("WebSocket error for session {}: {}", session_id, e);
                break;
            }
        }
    }

    let ticks = session.shutdown().await;
    state.manager.remove(&session_id).await;
    info!(
        "Session {} closed after {} transactions",
        session_id, ticks
    );
}

/// `EventSink` over the write half of an accepted WebSocket.
struct WsSink {
    sender: Mutex<SplitSink<WebSocket, Message>>,
}

#[async_trait::async_trait]
impl EventSink for WsSink {
    async fn send_text(&self, payload: String) -> Result<(), DeliveryError> {
        let mut sender = self.sender.lock().await;
        sender
            .send(Message::Text(payload.into()))
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))
    }
}
