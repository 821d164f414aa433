//! Uncertainty-triggered abstention: the terminal gate.
//!
//! Safety-first: better to refuse than to surface unverified content. The
//! decision is an ordinary return value consumed by the caller, never an
//! error path.

use tracing::info;

use lancet_core::config::AbstentionConfig;
use lancet_core::models::{
    AbstentionDecision, ClaimCategory, VerificationOutcome, VerificationReport,
};

/// Phrases that mark a claim as critical regardless of the overall score.
const CRITICAL_KEYWORDS: [&str; 3] = ["dosage", "contraindication", "complication management"];

/// Decides when the system refuses to answer.
#[derive(Debug, Clone)]
pub struct AbstentionPolicy {
    config: AbstentionConfig,
}

impl AbstentionPolicy {
    pub fn new(config: AbstentionConfig) -> Self {
        Self { config }
    }

    /// Evaluate the gate for one verification report.
    ///
    /// Abstains when (a) nothing checkable could be extracted, (b) the
    /// verification score falls below the threshold (exclusive: a score
    /// equal to the threshold answers), or (c) any critical claim is
    /// unverified, independent of the score.
    pub fn decide(&self, report: &VerificationReport) -> AbstentionDecision {
        if !self.config.enabled {
            return AbstentionDecision::answer();
        }

        if report.total_claims == 0 {
            info!("abstaining: no verifiable claims extracted");
            return AbstentionDecision::abstain(
                "Unable to extract verifiable claims from the answer. \
                 The question may be too vague or outside the knowledge base.",
            );
        }

        if report.overall_score < self.config.threshold {
            info!(
                score = report.overall_score,
                threshold = self.config.threshold,
                "abstaining: verification score below threshold"
            );
            return AbstentionDecision::abstain(format!(
                "Insufficient verification confidence ({:.0}%). Only {}/{} claims verified in the knowledge graph.",
                report.overall_score * 100.0,
                report.verified_claims,
                report.total_claims
            ));
        }

        let critical = count_critical(&report.unverified);
        if critical > 0 {
            info!(critical, "abstaining: critical unverified claims");
            return AbstentionDecision::abstain(format!(
                "Detected {critical} critical unverified claim(s) in the answer. Cannot provide a safe response."
            ));
        }

        AbstentionDecision::answer()
    }
}

/// Unverified claims whose subject is critical: every anatomy claim, plus any
/// claim mentioning a critical-keyword topic.
fn count_critical(unverified: &[VerificationOutcome]) -> usize {
    unverified
        .iter()
        .filter(|outcome| {
            if outcome.claim.category() == ClaimCategory::Anatomy {
                return true;
            }
            let text = outcome.claim.describe();
            CRITICAL_KEYWORDS.iter().any(|k| text.contains(k))
        })
        .count()
}
