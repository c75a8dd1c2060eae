//! Trained model artifact handling.
//!
//! The artifact is produced by an offline training job and consumed here
//! as an immutable, process-wide value. Loading failures never abort the
//! process; scoring degrades to the heuristic fallback instead.

pub mod artifact;
pub mod outlier;

pub use artifact::{ModelArtifact, StandardScaler};
pub use outlier::GaussianOutlierModel;
