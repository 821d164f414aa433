use serde::{Deserialize, Serialize};

use super::abstention::AbstentionDecision;
use super::confidence_report::ConfidenceLevel;
use super::hallucination::HallucinationAnalysis;
use super::verification_report::VerificationReport;

/// Complete assessment of one generated answer: verification, hallucination
/// classification, and the terminal abstention decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerAssessment {
    pub report: VerificationReport,
    /// Level derived from the overall verification score.
    pub confidence_level: ConfidenceLevel,
    pub hallucinations: HallucinationAnalysis,
    pub abstention: AbstentionDecision,
    /// Warning banner for medium/low confidence; absent at high confidence.
    pub warning: Option<String>,
}
