//! Model bundle deserialization and validation.

use super::outlier::GaussianOutlierModel;
use crate::error::{Error, ScoringError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Trained scoring bundle, loaded once at startup and immutable afterwards.
///
/// The offline trainer writes a JSON file with three sections:
///
/// ```json
/// {
///   "model": { "means": [...], "std_devs": [...] },
///   "scaler": { "mean": [...], "scale": [...] },
///   "feature_names": ["amount", "hour", "velocity", "geo_distance"]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Outlier-scoring model over the scaled feature space
    pub model: GaussianOutlierModel,
    /// Feature normalization parameters
    pub scaler: StandardScaler,
    /// Feature identifiers in the model's expected input order
    pub feature_names: Vec<String>,
}

impl ModelArtifact {
    /// Load and validate the bundle from `path`.
    pub fn load(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::ModelLoad(format!("{}: {}", path.display(), e)))?;
        let artifact: ModelArtifact = serde_json::from_str(&raw)
            .map_err(|e| Error::ModelLoad(format!("{}: {}", path.display(), e)))?;
        artifact.validate()?;
        info!(
            "Model artifact loaded from {} ({} features)",
            path.display(),
            artifact.feature_names.len()
        );
        Ok(artifact)
    }

    /// All three sections must agree on the feature dimensionality.
    fn validate(&self) -> crate::Result<()> {
        let dims = self.feature_names.len();
        if dims == 0 {
            return Err(Error::ModelLoad("feature_names is empty".to_string()));
        }
        if self.model.dims() != dims {
            return Err(Error::ModelLoad(format!(
                "model expects {} features, feature_names lists {}",
                self.model.dims(),
                dims
            )));
        }
        if self.scaler.dims() != dims {
            return Err(Error::ModelLoad(format!(
                "scaler covers {} features, feature_names lists {}",
                self.scaler.dims(),
                dims
            )));
        }
        Ok(())
    }
}

/// Per-feature normalization: subtract mean, divide by scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn dims(&self) -> usize {
        self.mean.len()
    }

    pub fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ScoringError> {
        if features.len() != self.mean.len() || self.scale.len() != self.mean.len() {
            return Err(ScoringError::DimensionMismatch {
                expected: self.mean.len(),
                got: features.len(),
            });
        }

        features
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                if self.scale[i].abs() < f64::EPSILON {
                    return Err(ScoringError::ZeroScale(i));
                }
                Ok((value - self.mean[i]) / self.scale[i])
            })
            .collect()
    }
}
