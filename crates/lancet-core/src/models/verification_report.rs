use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::claim::{Claim, ClaimCategory};

/// Why a claim failed verification.
///
/// Verification failure is not an error condition: it is the signal this
/// pipeline exists to detect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    /// A required field was empty, so there was nothing to check.
    MissingField { field: String },
    /// The claimed node or relationship is absent from the graph.
    NotInGraph { detail: String },
    /// The graph could not be queried for this claim after retries.
    QueryFailed { reason: String },
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "missing {field}"),
            Self::NotInGraph { detail } => write!(f, "not found in graph: {detail}"),
            Self::QueryFailed { reason } => write!(f, "query error: {reason}"),
        }
    }
}

/// The verdict for one claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationOutcome {
    pub claim: Claim,
    pub verified: bool,
    /// Present exactly when `verified` is false.
    pub reason: Option<FailureReason>,
}

impl VerificationOutcome {
    pub fn verified(claim: Claim) -> Self {
        Self {
            claim,
            verified: true,
            reason: None,
        }
    }

    pub fn unverified(claim: Claim, reason: FailureReason) -> Self {
        Self {
            claim,
            verified: false,
            reason: Some(reason),
        }
    }
}

/// Aggregate verdict over every claim extracted from one answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub total_claims: usize,
    pub verified_claims: usize,
    pub unverified_claims: usize,
    /// Per-category verified/total; 1.0 for categories with zero claims.
    pub score_by_category: BTreeMap<ClaimCategory, f64>,
    /// Claims checked per category.
    pub claims_by_category: BTreeMap<ClaimCategory, usize>,
    /// verified/total across all categories; exactly 1.0 when no claims
    /// exist, since an answer with no falsifiable statements is not an error.
    pub overall_score: f64,
    pub unverified: Vec<VerificationOutcome>,
    pub generated_at: DateTime<Utc>,
}

impl VerificationReport {
    /// Build a report from per-claim outcomes, computing all aggregates.
    pub fn from_outcomes(outcomes: Vec<VerificationOutcome>) -> Self {
        let total_claims = outcomes.len();
        let verified_claims = outcomes.iter().filter(|o| o.verified).count();

        let mut score_by_category = BTreeMap::new();
        let mut claims_by_category = BTreeMap::new();
        for category in [
            ClaimCategory::Instrument,
            ClaimCategory::StepOrder,
            ClaimCategory::Anatomy,
            ClaimCategory::Complication,
        ] {
            let in_category: Vec<_> = outcomes
                .iter()
                .filter(|o| o.claim.category() == category)
                .collect();
            let score = if in_category.is_empty() {
                1.0
            } else {
                in_category.iter().filter(|o| o.verified).count() as f64 / in_category.len() as f64
            };
            score_by_category.insert(category, score);
            claims_by_category.insert(category, in_category.len());
        }

        let overall_score = if total_claims == 0 {
            1.0
        } else {
            verified_claims as f64 / total_claims as f64
        };

        Self {
            total_claims,
            verified_claims,
            unverified_claims: total_claims - verified_claims,
            score_by_category,
            claims_by_category,
            overall_score,
            unverified: outcomes.into_iter().filter(|o| !o.verified).collect(),
            generated_at: Utc::now(),
        }
    }

    /// Report for an answer with nothing checkable in it.
    pub fn empty() -> Self {
        Self::from_outcomes(Vec::new())
    }
}
