//! Score result wire types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Four-tier categorical label derived from `risk_score`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ThreatLevel {
    Safe,
    Medium,
    High,
    Critical,
}

impl ThreatLevel {
    /// Fixed-threshold classification shared by the primary and fallback
    /// scoring paths.
    pub fn from_risk(risk_score: f64) -> Self {
        if risk_score > 0.85 {
            ThreatLevel::Critical
        } else if risk_score > 0.65 {
            ThreatLevel::High
        } else if risk_score > 0.45 {
            ThreatLevel::Medium
        } else {
            ThreatLevel::Safe
        }
    }
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ThreatLevel::Safe => "SAFE",
            ThreatLevel::Medium => "MEDIUM",
            ThreatLevel::High => "HIGH",
            ThreatLevel::Critical => "CRITICAL",
        };
        write!(f, "{}", label)
    }
}

/// Per-event explanation flags, derived from raw feature thresholds plus
/// generator-supplied hints. Independent of the model output except for
/// `amount_spike`, which mirrors the anomaly verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub amount_flag: bool,
    pub time_flag: bool,
    pub velocity_flag: bool,
    pub geo_flag: bool,
    pub device_change: bool,
    pub unusual_time: bool,
    pub amount_spike: bool,
}

/// Scorer output for one transaction event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Risk in [0, 1]; higher means more anomalous
    pub risk_score: f64,
    /// `risk_score > 0.65`
    pub is_anomaly: bool,
    pub threat_level: ThreatLevel,
    /// Decorative jitter in [0.85, 1.0), not a scoring guarantee
    pub confidence: f64,
    pub explanation: Explanation,
}
