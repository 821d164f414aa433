//! Hallucination taxonomy and classifier.
//!
//! Maps each unverified claim onto a fixed, severity-tagged taxonomy keyed by
//! claim category and failure reason, then aggregates the distribution into a
//! safety score and targeted recommendations. The classification confidence
//! reflects certainty of the mapping, not of the underlying fact.

use std::collections::BTreeMap;

use lancet_core::models::{
    ClaimCategory, FailureReason, HallucinationAnalysis, HallucinationRecord, HallucinationType,
    Severity, SeverityCounts, TaxonomyCategory, VerificationOutcome,
};
use lancet_core::scoring;

/// Static taxonomy entry for one hallucination type.
#[derive(Debug, Clone, Copy)]
pub struct TaxonomyEntry {
    pub category: TaxonomyCategory,
    pub severity: Severity,
    pub description: &'static str,
    pub example: &'static str,
}

/// Look up the fixed taxonomy entry for a hallucination type.
pub fn entry(hallucination_type: HallucinationType) -> TaxonomyEntry {
    use HallucinationType::*;
    use Severity::*;
    use TaxonomyCategory::*;

    match hallucination_type {
        AnatomicalStructureError => TaxonomyEntry {
            category: Anatomical,
            severity: Critical,
            description: "Incorrect anatomical structure mentioned",
            example: "Appendix located in upper left quadrant",
        },
        AnatomicalLocationError => TaxonomyEntry {
            category: Anatomical,
            severity: Critical,
            description: "Wrong anatomical location specified",
            example: "Laparoscopic port placed through liver",
        },
        AnatomicalRelationshipError => TaxonomyEntry {
            category: Anatomical,
            severity: High,
            description: "Wrong spatial relationship between structures",
            example: "Cystic duct medial to common hepatic duct",
        },
        InstrumentIncorrect => TaxonomyEntry {
            category: Instrument,
            severity: High,
            description: "Wrong instrument specified for surgical step",
            example: "Use scalpel for laparoscopic dissection",
        },
        InstrumentNonexistent => TaxonomyEntry {
            category: Instrument,
            severity: Critical,
            description: "Fabricated or nonexistent surgical instrument",
            example: "Quantum endoscopic dissector",
        },
        InstrumentUsageError => TaxonomyEntry {
            category: Instrument,
            severity: Medium,
            description: "Wrong technique or usage for an instrument",
            example: "Apply stapler before alignment",
        },
        StepOrderError => TaxonomyEntry {
            category: Procedural,
            severity: Critical,
            description: "Incorrect ordering of surgical steps",
            example: "Close incision before removing specimen",
        },
        StepOmission => TaxonomyEntry {
            category: Procedural,
            severity: High,
            description: "Missing critical step",
            example: "Skip critical view of safety",
        },
        StepFabrication => TaxonomyEntry {
            category: Procedural,
            severity: High,
            description: "Invented step not in the procedure",
            example: "Perform triple somersault maneuver",
        },
        TechniqueError => TaxonomyEntry {
            category: Procedural,
            severity: High,
            description: "Wrong surgical technique",
            example: "Blunt dissection of calot triangle with cautery",
        },
        ComplicationExaggerated => TaxonomyEntry {
            category: Complication,
            severity: Medium,
            description: "Overstated complication risk or severity",
            example: "50% mortality rate for appendectomy",
        },
        ComplicationMinimized => TaxonomyEntry {
            category: Complication,
            severity: High,
            description: "Understated complication risk",
            example: "Bile duct injury is harmless",
        },
        ComplicationInvented => TaxonomyEntry {
            category: Complication,
            severity: Medium,
            description: "Nonexistent complication",
            example: "Spontaneous appendix regrowth",
        },
        ManagementError => TaxonomyEntry {
            category: Complication,
            severity: Critical,
            description: "Incorrect complication management advice",
            example: "Ignore bleeding and continue",
        },
        ContraindicationMissed => TaxonomyEntry {
            category: Contraindication,
            severity: Critical,
            description: "Missing contraindication warning",
            example: "No mention of anticoagulation status",
        },
        ContraindicationInvented => TaxonomyEntry {
            category: Contraindication,
            severity: High,
            description: "False contraindication warning",
            example: "Never operate on patients over 60",
        },
        DosageError => TaxonomyEntry {
            category: Quantitative,
            severity: Critical,
            description: "Incorrect medication dosage",
            example: "10g aspirin daily",
        },
        MeasurementError => TaxonomyEntry {
            category: Quantitative,
            severity: High,
            description: "Wrong measurement or size",
            example: "30mm trocar for standard port",
        },
        StatisticError => TaxonomyEntry {
            category: Quantitative,
            severity: Medium,
            description: "Fabricated or incorrect statistics",
            example: "99.9% success rate where literature shows 85%",
        },
        NoCitation => TaxonomyEntry {
            category: Attribution,
            severity: Low,
            description: "Factual claim without a source",
            example: "Studies show...",
        },
        FalseCitation => TaxonomyEntry {
            category: Attribution,
            severity: High,
            description: "Citation does not support the claim",
            example: "According to an unrelated paper",
        },
        OutdatedInformation => TaxonomyEntry {
            category: Attribution,
            severity: Medium,
            description: "Superseded guidance presented as current",
            example: "Routine drain placement for all cases",
        },
    }
}

/// Map one verification failure onto its hallucination type.
fn map_failure(category: ClaimCategory, reason: &FailureReason) -> HallucinationType {
    match category {
        ClaimCategory::Instrument => match reason {
            FailureReason::NotInGraph { detail } if detail.contains("not found") => {
                HallucinationType::InstrumentNonexistent
            }
            _ => HallucinationType::InstrumentIncorrect,
        },
        ClaimCategory::StepOrder => HallucinationType::StepOrderError,
        ClaimCategory::Anatomy => match reason {
            FailureReason::NotInGraph { detail } if detail.contains("location") => {
                HallucinationType::AnatomicalLocationError
            }
            _ => HallucinationType::AnatomicalStructureError,
        },
        ClaimCategory::Complication => HallucinationType::ManagementError,
    }
}

/// Certainty of the classification itself.
fn classification_confidence(reason: &FailureReason) -> f64 {
    match reason {
        // A clean graph miss is a strong signal.
        FailureReason::NotInGraph { .. } => 0.95,
        // Missing fields classify by inference.
        FailureReason::MissingField { .. } => 0.7,
        // Anything else is ambiguous.
        FailureReason::QueryFailed { .. } => 0.5,
    }
}

/// Classify one unverified outcome. Verified outcomes have nothing to map.
pub fn classify(outcome: &VerificationOutcome) -> Option<HallucinationRecord> {
    if outcome.verified {
        return None;
    }
    let reason = outcome.reason.as_ref()?;
    let hallucination_type = map_failure(outcome.claim.category(), reason);
    let taxonomy = entry(hallucination_type);
    Some(HallucinationRecord {
        claim: outcome.claim.clone(),
        hallucination_type,
        category: taxonomy.category,
        severity: taxonomy.severity,
        classification_confidence: classification_confidence(reason),
    })
}

/// Classify every unverified outcome and aggregate the distributions.
pub fn analyze(unverified: &[VerificationOutcome]) -> HallucinationAnalysis {
    let records: Vec<HallucinationRecord> = unverified.iter().filter_map(classify).collect();

    let mut category_distribution: BTreeMap<TaxonomyCategory, usize> = BTreeMap::new();
    let mut severity_counts = SeverityCounts::default();
    for record in &records {
        *category_distribution.entry(record.category).or_default() += 1;
        severity_counts.record(record.severity);
    }

    let recommendations = recommendations(&category_distribution, &severity_counts);
    let safety_score = scoring::safety_score(&severity_counts);

    HallucinationAnalysis {
        records,
        category_distribution,
        severity_counts,
        recommendations,
        safety_score,
    }
}

/// Targeted follow-ups based on where the errors cluster.
fn recommendations(
    categories: &BTreeMap<TaxonomyCategory, usize>,
    severities: &SeverityCounts,
) -> Vec<String> {
    let mut out = Vec::new();
    if severities.critical > 0 {
        out.push("CRITICAL: manual review required before clinical use".to_string());
    }
    let by_category = [
        (
            TaxonomyCategory::Anatomical,
            "Enhance the anatomy knowledge graph with more detailed relationships",
        ),
        (
            TaxonomyCategory::Instrument,
            "Expand instrument-procedure mappings in the knowledge graph",
        ),
        (
            TaxonomyCategory::Procedural,
            "Add explicit step-ordering constraints to the graph",
        ),
        (
            TaxonomyCategory::Complication,
            "Include comprehensive complication data in the knowledge base",
        ),
        (
            TaxonomyCategory::Quantitative,
            "Verify all numeric claims against original literature",
        ),
    ];
    for (category, text) in by_category {
        if categories.get(&category).copied().unwrap_or(0) > 0 {
            out.push(text.to_string());
        }
    }
    out
}
