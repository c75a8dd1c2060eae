//! End-to-end scoring behavior across the primary and fallback paths.

use chrono::Utc;
use sentinel_rs::scoring::ANOMALY_THRESHOLD;
use sentinel_rs::stream::{GeneratorHints, TransactionEvent, TransactionGenerator};
use sentinel_rs::{ModelArtifact, RiskScorer, ThreatLevel};
use std::io::Write;

fn event(amount: f64, hour: u8, velocity: f64, geo_distance: f64) -> TransactionEvent {
    TransactionEvent {
        id: "TXN_20250101120000_0001".to_string(),
        timestamp: Utc::now(),
        amount,
        location: "Dubai".to_string(),
        device: "ATM".to_string(),
        merchant: "Shell".to_string(),
        hour: Some(hour),
        velocity: Some(velocity),
        geo_distance: Some(geo_distance),
    }
}

#[test]
fn test_anomalous_event_without_artifact() -> Result<(), Box<dyn std::error::Error>> {
    let scorer = RiskScorer::new(None);

    let result = scorer.score(&event(5000.0, 3, 10.0, 3000.0), &GeneratorHints::default());

    assert!((result.risk_score - 0.8).abs() < f64::EPSILON);
    assert_eq!(result.threat_level, ThreatLevel::High);
    assert!(result.is_anomaly);
    assert!(result.explanation.amount_flag);
    assert!(result.explanation.time_flag);

    Ok(())
}

#[test]
fn test_normal_event_without_artifact() -> Result<(), Box<dyn std::error::Error>> {
    let scorer = RiskScorer::new(None);

    let result = scorer.score(&event(50.0, 3, 10.0, 3000.0), &GeneratorHints::default());

    assert!((result.risk_score - 0.3).abs() < f64::EPSILON);
    assert_eq!(result.threat_level, ThreatLevel::Safe);
    assert!(!result.is_anomaly);

    Ok(())
}

#[test]
fn test_corrupt_artifact_engages_fallback() -> Result<(), Box<dyn std::error::Error>> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(file, "{{\"model\": \"garbage\"}}")?;

    let artifact = ModelArtifact::load(file.path()).ok();
    assert!(artifact.is_none());

    let scorer = RiskScorer::new(artifact);
    assert!(!scorer.has_model());

    let result = scorer.score(&event(5000.0, 3, 10.0, 3000.0), &GeneratorHints::default());
    assert!((result.risk_score - 0.8).abs() < f64::EPSILON);

    Ok(())
}

#[test]
fn test_score_invariants_over_generated_events() -> Result<(), Box<dyn std::error::Error>> {
    let scorer = RiskScorer::new(None);
    let generator = TransactionGenerator::default();

    for _ in 0..500 {
        let (event, hints) = generator.generate()?;
        let result = scorer.score(&event, &hints);

        assert!((0.0..=1.0).contains(&result.risk_score));
        assert!((0.0..=1.0).contains(&result.confidence));
        assert_eq!(result.is_anomaly, result.risk_score > ANOMALY_THRESHOLD);
        assert_eq!(result.threat_level, ThreatLevel::from_risk(result.risk_score));

        if event.amount > 1000.0 {
            assert!(result.explanation.amount_flag);
        }
        if event.hour_or_default() < 6 {
            assert!(result.explanation.time_flag);
            assert!(result.explanation.unusual_time);
        }
        assert_eq!(result.explanation.amount_spike, result.is_anomaly);
    }

    Ok(())
}
