//! Gaussian outlier model over the scaled feature space.

use crate::error::ScoringError;
use serde::{Deserialize, Serialize};

/// Per-feature Gaussian model fitted by the offline trainer.
///
/// Scores follow the `score_samples` convention: values near zero mean the
/// vector looks like the training bulk, strongly negative values mean an
/// outlier. The logistic transform `1 / (1 + exp(raw))` therefore maps
/// outliers toward a risk of 1 with no sign adjustment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaussianOutlierModel {
    pub means: Vec<f64>,
    pub std_devs: Vec<f64>,
}

impl GaussianOutlierModel {
    pub fn dims(&self) -> usize {
        self.means.len()
    }

    /// Raw outlier score: negative half of the mean squared z-score.
    pub fn raw_score(&self, features: &[f64]) -> Result<f64, ScoringError> {
        if features.len() != self.means.len() || self.std_devs.len() != self.means.len() {
            return Err(ScoringError::DimensionMismatch {
                expected: self.means.len(),
                got: features.len(),
            });
        }

        let mean_sq_z = features
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let std_dev = self.std_devs[i].max(1e-6);
                // clamp extreme z-scores so a single wild feature saturates
                // rather than dominating the exponent
                let z = ((value - self.means[i]) / std_dev).abs().min(10.0);
                z * z
            })
            .sum::<f64>()
            / self.means.len() as f64;

        Ok(-0.5 * mean_sq_z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard_model(dims: usize) -> GaussianOutlierModel {
        GaussianOutlierModel {
            means: vec![0.0; dims],
            std_devs: vec![1.0; dims],
        }
    }

    #[test]
    fn test_typical_vector_scores_near_zero() {
        let model = standard_model(4);
        let raw = model.raw_score(&[0.0, 0.0, 0.0, 0.0]).unwrap();
        assert!(raw.abs() < 1e-9);
    }

    #[test]
    fn test_outlier_scores_strongly_negative() {
        let model = standard_model(4);
        let typical = model.raw_score(&[0.5, 0.5, 0.5, 0.5]).unwrap();
        let outlier = model.raw_score(&[8.0, 8.0, 8.0, 8.0]).unwrap();
        assert!(outlier < typical);
        assert!(outlier < -10.0);
    }

    #[test]
    fn test_z_score_clamping() {
        let model = standard_model(1);
        let raw = model.raw_score(&[1_000_000.0]).unwrap();
        assert!((raw - (-50.0)).abs() < 1e-9);
    }

    #[test]
    fn test_dimension_mismatch() {
        let model = standard_model(4);
        assert!(matches!(
            model.raw_score(&[1.0, 2.0]),
            Err(ScoringError::DimensionMismatch { expected: 4, got: 2 })
        ));
    }
}
