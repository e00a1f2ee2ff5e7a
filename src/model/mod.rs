pub mod logistic;

pub use logistic::{FEATURE_COUNT, ModelArtifact, ModelError, RiskModel};

use serde::{Deserialize, Serialize};

/// Binary outcome of the classifier. Serialized as `"low"` / `"high"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLabel {
    Low,
    High,
}

impl RiskLabel {
    pub fn is_high(self) -> bool {
        matches!(self, RiskLabel::High)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLabel::Low => "low",
            RiskLabel::High => "high",
        }
    }
}

/// One classification of one record: the label plus the positive-class
/// probability as a percentage in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: RiskLabel,
    pub probability: f64,
}
