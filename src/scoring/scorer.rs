//! Risk scorer: model-backed primary path with a total heuristic fallback.

use super::types::{Explanation, ScoreResult, ThreatLevel};
use crate::error::ScoringError;
use crate::model::ModelArtifact;
use crate::stream::types::{GeneratorHints, TransactionEvent};
use rand::Rng;
use tracing::debug;

/// Events scoring above this are flagged anomalous.
pub const ANOMALY_THRESHOLD: f64 = 0.65;

/// Scores transaction events against the loaded model artifact.
///
/// Shared read-only across all sessions; holds no per-request state. When
/// no artifact is loaded (or any step of the primary path fails for one
/// event), the heuristic fallback keeps the stream available.
#[derive(Debug)]
pub struct RiskScorer {
    artifact: Option<ModelArtifact>,
}

impl RiskScorer {
    pub fn new(artifact: Option<ModelArtifact>) -> Self {
        Self { artifact }
    }

    /// Whether a trained artifact is loaded (surfaced by `/health`).
    pub fn has_model(&self) -> bool {
        self.artifact.is_some()
    }

    /// Score one event. Total: every failure on the primary path routes
    /// this event to the fallback heuristic, never to the caller.
    pub fn score(&self, event: &TransactionEvent, hints: &GeneratorHints) -> ScoreResult {
        let risk_score = match self.model_risk(event) {
            Ok(risk) => risk,
            Err(e) => {
                debug!("Primary scoring path unavailable, using fallback: {}", e);
                fallback_risk(event)
            }
        };

        let is_anomaly = risk_score > ANOMALY_THRESHOLD;
        let explanation = Explanation {
            amount_flag: event.amount > 1000.0,
            time_flag: event.hour_or_default() < 6,
            velocity_flag: event.velocity_or_default() > 5.0,
            geo_flag: event.geo_distance_or_default() > 1000.0,
            device_change: hints.device_change,
            unusual_time: event.hour_or_default() < 6,
            amount_spike: is_anomaly,
        };

        ScoreResult {
            risk_score,
            is_anomaly,
            threat_level: ThreatLevel::from_risk(risk_score),
            confidence: 0.85 + rand::thread_rng().gen::<f64>() * 0.15,
            explanation,
        }
    }

    /// Primary path: project, normalize, score, logistic transform.
    fn model_risk(&self, event: &TransactionEvent) -> Result<f64, ScoringError> {
        let artifact = self.artifact.as_ref().ok_or(ScoringError::MissingArtifact)?;
        let features = extract_features(event, &artifact.feature_names)?;
        let scaled = artifact.scaler.transform(&features)?;
        let raw = artifact.model.raw_score(&scaled)?;
        Ok(1.0 / (1.0 + raw.exp()))
    }
}

/// Heuristic risk used whenever the model path is unavailable.
fn fallback_risk(event: &TransactionEvent) -> f64 {
    if event.amount > 1000.0 {
        0.8
    } else {
        0.3
    }
}

/// Project the event onto the artifact's feature ordering. A feature name
/// outside the four known fields means a misconfigured artifact.
fn extract_features(
    event: &TransactionEvent,
    feature_names: &[String],
) -> Result<Vec<f64>, ScoringError> {
    feature_names
        .iter()
        .map(|name| match name.as_str() {
            "amount" => Ok(event.amount),
            "hour" => Ok(f64::from(event.hour_or_default())),
            "velocity" => Ok(event.velocity_or_default()),
            "geo_distance" => Ok(event.geo_distance_or_default()),
            other => Err(ScoringError::UnknownFeature(other.to_string())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GaussianOutlierModel, StandardScaler};
    use chrono::Utc;

    fn make_event(amount: f64, hour: u8, velocity: f64, geo_distance: f64) -> TransactionEvent {
        TransactionEvent {
            id: "TXN_test".to_string(),
            timestamp: Utc::now(),
            amount,
            location: "Tokyo".to_string(),
            device: "Mobile".to_string(),
            merchant: "Amazon".to_string(),
            hour: Some(hour),
            velocity: Some(velocity),
            geo_distance: Some(geo_distance),
        }
    }

    fn trained_artifact() -> ModelArtifact {
        // scaler centered on normal traffic, model standard-normal over
        // the scaled space (what the offline trainer produces)
        ModelArtifact {
            model: GaussianOutlierModel {
                means: vec![0.0; 4],
                std_devs: vec![1.0; 4],
            },
            scaler: StandardScaler {
                mean: vec![105.0, 15.0, 1.75, 255.0],
                scale: vec![55.0, 4.0, 0.7, 140.0],
            },
            feature_names: vec![
                "amount".to_string(),
                "hour".to_string(),
                "velocity".to_string(),
                "geo_distance".to_string(),
            ],
        }
    }

    #[test]
    fn test_fallback_high_amount() {
        let scorer = RiskScorer::new(None);
        let result = scorer.score(
            &make_event(5000.0, 3, 10.0, 3000.0),
            &GeneratorHints::default(),
        );

        assert!((result.risk_score - 0.8).abs() < f64::EPSILON);
        assert!(result.is_anomaly);
        assert_eq!(result.threat_level, ThreatLevel::High);
        assert!(result.explanation.amount_flag);
        assert!(result.explanation.time_flag);
        assert!(result.explanation.velocity_flag);
        assert!(result.explanation.geo_flag);
        assert!(result.explanation.amount_spike);
    }

    #[test]
    fn test_fallback_low_amount() {
        let scorer = RiskScorer::new(None);
        let result = scorer.score(
            &make_event(50.0, 14, 1.0, 100.0),
            &GeneratorHints::default(),
        );

        assert!((result.risk_score - 0.3).abs() < f64::EPSILON);
        assert!(!result.is_anomaly);
        assert_eq!(result.threat_level, ThreatLevel::Safe);
        assert!(!result.explanation.amount_flag);
        assert!(!result.explanation.time_flag);
    }

    #[test]
    fn test_flag_boundaries_are_strict() {
        let scorer = RiskScorer::new(None);
        let result = scorer.score(
            &make_event(1000.0, 6, 5.0, 1000.0),
            &GeneratorHints::default(),
        );

        assert!(!result.explanation.amount_flag);
        assert!(!result.explanation.time_flag);
        assert!(!result.explanation.velocity_flag);
        assert!(!result.explanation.geo_flag);
    }

    #[test]
    fn test_primary_path_flags_outliers() {
        let scorer = RiskScorer::new(Some(trained_artifact()));

        let anomalous = scorer.score(
            &make_event(5000.0, 3, 12.0, 4000.0),
            &GeneratorHints::default(),
        );
        assert!(anomalous.risk_score > 0.85);
        assert!(anomalous.is_anomaly);
        assert_eq!(anomalous.threat_level, ThreatLevel::Critical);

        let typical = scorer.score(
            &make_event(105.0, 15, 1.75, 255.0),
            &GeneratorHints::default(),
        );
        assert!(typical.risk_score <= 0.65);
        assert!(!typical.is_anomaly);
    }

    #[test]
    fn test_misconfigured_artifact_falls_back() {
        let mut artifact = trained_artifact();
        artifact.feature_names[2] = "card_country".to_string();
        let scorer = RiskScorer::new(Some(artifact));

        let result = scorer.score(
            &make_event(5000.0, 3, 10.0, 3000.0),
            &GeneratorHints::default(),
        );
        assert!((result.risk_score - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_substitution_for_absent_features() {
        let event = TransactionEvent {
            hour: None,
            velocity: None,
            geo_distance: None,
            ..make_event(50.0, 0, 0.0, 0.0)
        };
        let features =
            extract_features(&event, &trained_artifact().feature_names).unwrap();
        assert_eq!(features, vec![50.0, 12.0, 1.0, 100.0]);
    }

    #[test]
    fn test_confidence_range() {
        let scorer = RiskScorer::new(None);
        for _ in 0..50 {
            let result = scorer.score(
                &make_event(50.0, 14, 1.0, 100.0),
                &GeneratorHints::default(),
            );
            assert!(result.confidence >= 0.85 && result.confidence < 1.0);
        }
    }

    #[test]
    fn test_hint_passthrough() {
        let scorer = RiskScorer::new(None);
        let result = scorer.score(
            &make_event(50.0, 14, 1.0, 100.0),
            &GeneratorHints {
                device_change: true,
            },
        );
        assert!(result.explanation.device_change);
    }
}
