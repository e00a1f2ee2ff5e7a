use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::RiskLabel;

/// Number of clinical measurements the classifier consumes, in artifact
/// order: age, sex, cp, trestbps, chol, fbs, restecg, thalach, exang,
/// oldpeak, slope, ca, thal.
pub const FEATURE_COUNT: usize = 13;

/// Decision threshold on the positive-class probability.
const DECISION_THRESHOLD: f64 = 0.5;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("model artifact unreadable at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("model artifact is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model expects {expected} features, artifact has {actual}")]
    FeatureCount { expected: usize, actual: usize },

    #[error("artifact names {names} features but carries {coefficients} coefficients")]
    NameMismatch { names: usize, coefficients: usize },
}

/// On-disk shape of the serialized classifier. Unknown fields are ignored so
/// exports may carry extra metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelArtifact {
    #[serde(default)]
    pub model_type: Option<String>,
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

/// Pre-trained binary classifier over one fixed-size feature vector.
///
/// Loaded once at startup and read-only thereafter. `predict_proba` returns
/// `[p(negative), p(positive)]`; index 1 is the positive class.
#[derive(Debug, Clone)]
pub struct RiskModel {
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
}

impl RiskModel {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let raw = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: ModelArtifact = serde_json::from_str(&raw)?;

        tracing::info!(
            path = %path.display(),
            model_type = artifact.model_type.as_deref().unwrap_or("unknown"),
            features = artifact.coefficients.len(),
            "Classifier artifact loaded"
        );

        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ModelError> {
        if artifact.feature_names.len() != artifact.coefficients.len() {
            return Err(ModelError::NameMismatch {
                names: artifact.feature_names.len(),
                coefficients: artifact.coefficients.len(),
            });
        }

        let coefficients: [f64; FEATURE_COUNT] = artifact
            .coefficients
            .as_slice()
            .try_into()
            .map_err(|_| ModelError::FeatureCount {
                expected: FEATURE_COUNT,
                actual: artifact.coefficients.len(),
            })?;

        Ok(Self {
            coefficients,
            intercept: artifact.intercept,
        })
    }

    pub fn predict(&self, features: &[f64; FEATURE_COUNT]) -> RiskLabel {
        if self.predict_proba(features)[1] >= DECISION_THRESHOLD {
            RiskLabel::High
        } else {
            RiskLabel::Low
        }
    }

    pub fn predict_proba(&self, features: &[f64; FEATURE_COUNT]) -> [f64; 2] {
        let positive = inv_logit(self.decision(features));
        [1.0 - positive, positive]
    }

    fn decision(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        self.coefficients
            .iter()
            .zip(features.iter())
            .map(|(c, x)| c * x)
            .sum::<f64>()
            + self.intercept
    }
}

fn inv_logit(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
