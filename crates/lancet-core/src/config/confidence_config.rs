use serde::{Deserialize, Serialize};

use super::defaults;
use crate::scoring;

/// Weights for the four confidence components. Renormalized to sum to 1
/// before use, so any positive mix is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    pub retrieval_weight: f64,
    pub graph_coverage_weight: f64,
    pub source_agreement_weight: f64,
    pub verification_weight: f64,
}

impl ConfidenceConfig {
    /// Weights in declaration order, normalized to sum to 1.
    pub fn normalized(&self) -> [f64; 4] {
        let normalized = scoring::normalize_weights(&[
            self.retrieval_weight,
            self.graph_coverage_weight,
            self.source_agreement_weight,
            self.verification_weight,
        ]);
        [normalized[0], normalized[1], normalized[2], normalized[3]]
    }
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            retrieval_weight: defaults::DEFAULT_RETRIEVAL_WEIGHT,
            graph_coverage_weight: defaults::DEFAULT_GRAPH_COVERAGE_WEIGHT,
            source_agreement_weight: defaults::DEFAULT_SOURCE_AGREEMENT_WEIGHT,
            verification_weight: defaults::DEFAULT_VERIFICATION_WEIGHT,
        }
    }
}
