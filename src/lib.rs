//! # sentinel-rs
//!
//! Real-time risk-scoring stream server: emits synthetic financial
//! transactions, scores each against a pre-trained outlier model (with a
//! heuristic fallback when none is loaded), and pushes annotated events to
//! connected WebSocket clients.

pub mod config;
pub mod error;
pub mod http_server;
pub mod logging;
pub mod model;
pub mod scoring;
pub mod stream;

pub use config::SentinelConfig;
pub use error::{Error, Result};
pub use model::ModelArtifact;
pub use scoring::{RiskScorer, ScoreResult, ThreatLevel};
pub use stream::{ConnectionManager, StreamSession, TransactionGenerator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Config("missing bind_addr".to_string());
        assert!(err.to_string().contains("missing bind_addr"));
    }
}
