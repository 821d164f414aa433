//! User-facing rendering of assessments, warnings, and refusals.
//!
//! On abstention the output is an explicit refusal with the stated reason and
//! a pointer to primary sources, never a confident-sounding answer.

use lancet_core::constants::{NO_DOCUMENTS_MESSAGE, NO_RELEVANT_CONTEXT_MESSAGE};
use lancet_core::models::{AnswerAssessment, ConfidenceReport};

/// Render a verified answer with its annotation block, or the refusal when
/// the assessment abstained.
pub fn render_answer(answer: &str, assessment: &AnswerAssessment) -> String {
    if assessment.abstention.should_abstain {
        return render_abstention(assessment);
    }

    let mut out = String::new();
    if let Some(warning) = &assessment.warning {
        out.push_str(warning);
        out.push_str("\n\n---\n\n");
    }
    out.push_str(answer);
    out.push_str(&render_annotation(assessment));
    out
}

/// The annotation block: confidence badge, verification line, severity and
/// category breakdowns.
pub fn render_annotation(assessment: &AnswerAssessment) -> String {
    let report = &assessment.report;
    let mut out = format!(
        "\n\n{}\nVerification: {}/{} claims verified against knowledge graph ({:.0}%)\n",
        assessment.confidence_level.label(),
        report.verified_claims,
        report.total_claims,
        report.overall_score * 100.0
    );

    let hallucinations = &assessment.hallucinations;
    if hallucinations.total() > 0 {
        out.push_str(&format!(
            "\nHallucination Detection:\n  Total: {}\n  Safety Score: {:.2}/1.00\n",
            hallucinations.total(),
            hallucinations.safety_score
        ));
        let counts = hallucinations.severity_counts;
        let mut parts = Vec::new();
        for (label, count) in [
            ("Critical", counts.critical),
            ("High", counts.high),
            ("Medium", counts.medium),
            ("Low", counts.low),
        ] {
            if count > 0 {
                parts.push(format!("{label}: {count}"));
            }
        }
        if !parts.is_empty() {
            out.push_str(&format!("  Severity: {}\n", parts.join(", ")));
        }
    }

    // Only categories that actually had claims are worth printing.
    let interesting: Vec<String> = report
        .score_by_category
        .iter()
        .filter(|(category, _)| {
            report
                .claims_by_category
                .get(*category)
                .copied()
                .unwrap_or(0)
                > 0
        })
        .map(|(category, score)| format!("  {}: {:.0}%", category.label(), score * 100.0))
        .collect();
    if !interesting.is_empty() {
        out.push_str("\nCategory Verification:\n");
        out.push_str(&interesting.join("\n"));
        out.push('\n');
    }

    out
}

/// Explicit refusal with the stated reason and escalation guidance.
pub fn render_abstention(assessment: &AnswerAssessment) -> String {
    let reason = assessment
        .abstention
        .reason
        .as_deref()
        .unwrap_or("Unknown reason");
    let report = &assessment.report;

    format!(
        "SYSTEM ABSTENTION\n\
         The system cannot provide a safe answer for this query.\n\n\
         Reason: {reason}\n\
         Verified claims: {}/{}\n\n\
         Recommendation: consult a primary source:\n\
           - Attending surgeon or senior resident\n\
           - Primary surgical literature\n\
           - Institutional protocols\n",
        report.verified_claims, report.total_claims
    )
}

/// Component breakdown of a composite confidence report.
pub fn render_confidence(report: &ConfidenceReport) -> String {
    let mut out = format!(
        "\n{} ({:.0}%)\nConfidence Components:\n",
        report.level.label(),
        report.overall * 100.0
    );
    for (name, component) in &report.components {
        out.push_str(&format!(
            "  {}: {:.0}% (weight {:.2})\n",
            name,
            component.score * 100.0,
            component.weight
        ));
    }
    if let Some(warning) = &report.warning {
        out.push('\n');
        out.push_str(warning);
        out.push('\n');
    }
    out
}

/// Fixed response for an empty index. Callers take this path before any
/// retrieval or verification runs, so no abstention fires here.
pub fn no_documents_response() -> &'static str {
    NO_DOCUMENTS_MESSAGE
}

/// Fixed response when retrieval found nothing usable for the query.
pub fn no_relevant_context_response() -> &'static str {
    NO_RELEVANT_CONTEXT_MESSAGE
}
