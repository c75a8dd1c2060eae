//! Error types for the sentinel streaming server.

use thiserror::Error;

/// Result type alias for sentinel operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for streaming and scoring operations
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Model artifact could not be loaded at startup
    #[error("Model load error: {0}")]
    ModelLoad(String),

    /// Per-event scoring failure (recovered by fallback scoring)
    #[error("Scoring error: {0}")]
    Scoring(#[from] ScoringError),

    /// Transport write failure (fatal to the affected session)
    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    /// Synthetic event generation failure (tick is skipped)
    #[error("Generator error: {0}")]
    Generator(String),

    /// Server lifecycle error
    #[error("Server error: {0}")]
    Server(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures on the primary scoring path.
///
/// Any of these routes the affected event to the heuristic fallback;
/// none of them is ever surfaced to a client.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// No trained artifact is loaded
    #[error("no model artifact loaded")]
    MissingArtifact,

    /// Artifact names a feature the event cannot provide
    #[error("unknown feature in artifact: {0}")]
    UnknownFeature(String),

    /// Feature vector length disagrees with scaler or model parameters
    #[error("feature dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Scaler has a zero scale entry, normalization would divide by zero
    #[error("zero scale for feature index {0}")]
    ZeroScale(usize),
}

/// Transport-level delivery failures.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Handle is not (or no longer) registered
    #[error("unknown session: {0}")]
    UnknownSession(String),

    /// Underlying transport refused the write
    #[error("transport error: {0}")]
    Transport(String),
}
