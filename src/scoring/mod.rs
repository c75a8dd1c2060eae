//! Anomaly scoring pipeline: feature extraction, score computation,
//! threshold classification and explanation flags.

pub mod scorer;
pub mod types;

pub use scorer::{RiskScorer, ANOMALY_THRESHOLD};
pub use types::{Explanation, ScoreResult, ThreatLevel};
