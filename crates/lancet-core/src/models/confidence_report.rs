use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Coarse confidence bucket used to decide whether to warn the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "HIGH CONFIDENCE",
            Self::Medium => "MEDIUM CONFIDENCE",
            Self::Low => "LOW CONFIDENCE",
        }
    }
}

/// One component's contribution to the composite confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScore {
    pub score: f64,
    pub weight: f64,
}

/// Composite confidence for one query. Stateless: recomputed per request,
/// identical inputs yield an identical report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceReport {
    pub overall: f64,
    pub level: ConfidenceLevel,
    pub components: BTreeMap<String, ComponentScore>,
    /// Caution text attached at medium/low levels.
    pub warning: Option<String>,
}
