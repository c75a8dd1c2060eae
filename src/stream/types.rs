//! Wire types for the transaction stream.

use crate::scoring::ScoreResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One synthetic transaction. Immutable once created; only the event
/// generator constructs these.
///
/// `hour`, `velocity` and `geo_distance` are optional so externally built
/// events can omit them; the scorer substitutes fixed defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionEvent {
    /// Unique, time-ordered identifier (`TXN_<timestamp>_<suffix>`)
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub amount: f64,
    pub location: String,
    pub device: String,
    pub merchant: String,
    /// Hour of day, 0-23
    pub hour: Option<u8>,
    /// Transactions per unit-time proxy
    pub velocity: Option<f64>,
    /// Distance proxy from the account's usual location
    pub geo_distance: Option<f64>,
}

impl TransactionEvent {
    pub fn hour_or_default(&self) -> u8 {
        self.hour.unwrap_or(12)
    }

    pub fn velocity_or_default(&self) -> f64 {
        self.velocity.unwrap_or(1.0)
    }

    pub fn geo_distance_or_default(&self) -> f64 {
        self.geo_distance.unwrap_or(100.0)
    }
}

/// Context the generator attaches to an event for the explanation flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneratorHints {
    /// The simulated account switched devices for this transaction
    pub device_change: bool,
}

/// Event augmented with its score, as delivered to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredTransaction {
    #[serde(flatten)]
    pub event: TransactionEvent,
    pub risk_score: f64,
    pub is_anomaly: bool,
    pub threat_level: crate::scoring::ThreatLevel,
    pub confidence: f64,
    pub explanation: crate::scoring::Explanation,
}

/// Outbound message wrapper: `{"type": "transaction", "data": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub r#type: String,
    pub data: ScoredTransaction,
}

impl Envelope {
    pub fn transaction(event: TransactionEvent, result: ScoreResult) -> Self {
        Self {
            r#type: "transaction".to_string(),
            data: ScoredTransaction {
                event,
                risk_score: result.risk_score,
                is_anomaly: result.is_anomaly,
                threat_level: result.threat_level,
                confidence: result.confidence,
                explanation: result.explanation,
            },
        }
    }
}
