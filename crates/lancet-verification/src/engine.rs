//! VerificationEngine: the produced `verify` operation.
//!
//! extract claims → verify against the graph → classify failures onto the
//! taxonomy → derive the confidence level → apply the abstention gate →
//! assemble the assessment.

use std::sync::Arc;

use tracing::info;

use lancet_core::config::LancetConfig;
use lancet_core::models::{AnswerAssessment, ConfidenceLevel};
use lancet_core::scoring;
use lancet_core::traits::{ClaimExtractor, GraphStore};

use crate::abstention::AbstentionPolicy;
use crate::claims::ClaimBoundary;
use crate::taxonomy;
use crate::verifier::GraphVerifier;

/// Full verification pipeline for one generated answer.
pub struct VerificationEngine {
    boundary: ClaimBoundary,
    verifier: GraphVerifier,
    abstention: AbstentionPolicy,
}

impl VerificationEngine {
    pub fn new(
        extractor: Arc<dyn ClaimExtractor>,
        graph: Arc<dyn GraphStore>,
        config: &LancetConfig,
    ) -> Self {
        Self {
            boundary: ClaimBoundary::new(extractor, &config.remote),
            verifier: GraphVerifier::new(graph, &config.remote),
            abstention: AbstentionPolicy::new(config.abstention.clone()),
        }
    }

    /// Verify one answer against the knowledge graph.
    pub async fn verify(&self, query: &str, answer: &str) -> AnswerAssessment {
        let claims = self.boundary.extract(answer, query).await;
        let report = self.verifier.verify(&claims).await;
        let hallucinations = taxonomy::analyze(&report.unverified);
        let confidence_level = scoring::confidence_level(report.overall_score);
        let abstention = self.abstention.decide(&report);
        let warning = warning_message(confidence_level, &hallucinations);

        info!(
            verified = report.verified_claims,
            total = report.total_claims,
            hallucinations = hallucinations.total(),
            abstain = abstention.should_abstain,
            "verification complete"
        );

        AnswerAssessment {
            report,
            confidence_level,
            hallucinations,
            abstention,
            warning,
        }
    }
}

/// Warning banner for anything short of high confidence; high-confidence
/// answers pass through unmodified.
fn warning_message(
    level: ConfidenceLevel,
    hallucinations: &lancet_core::models::HallucinationAnalysis,
) -> Option<String> {
    let mut lines = Vec::new();
    match level {
        ConfidenceLevel::High => {}
        ConfidenceLevel::Medium => lines.push(
            "Based on available guidelines; verify with a senior clinician before clinical application."
                .to_string(),
        ),
        ConfidenceLevel::Low => lines.push(
            "CAUTION: insufficient evidence in the knowledge base. Consult a supervisor or primary sources before use."
                .to_string(),
        ),
    }

    let critical = hallucinations.severity_counts.critical;
    let high = hallucinations.severity_counts.high;
    if critical > 0 {
        lines.push(format!(
            "CRITICAL: {critical} critical hallucination(s) detected. Do not use for patient care."
        ));
    } else if high > 0 {
        lines.push(format!(
            "WARNING: {high} high-severity hallucination(s) detected. Verify before use."
        ));
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}
