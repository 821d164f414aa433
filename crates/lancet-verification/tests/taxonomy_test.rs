//! Taxonomy mapping and hallucination analysis tests.

use lancet_core::models::{
    AnatomyClaim, AnatomyRelation, Claim, ComplicationClaim, FailureReason, HallucinationType,
    InstrumentClaim, Severity, StepOrderClaim, StepRelation, TaxonomyCategory,
    VerificationOutcome,
};
use lancet_verification::taxonomy;

fn unverified(claim: Claim, reason: FailureReason) -> VerificationOutcome {
    VerificationOutcome::unverified(claim, reason)
}

fn instrument_claim() -> Claim {
    Claim::Instrument(InstrumentClaim {
        step: "dissection".into(),
        instrument: "laser".into(),
        usage: String::new(),
    })
}

fn step_order_claim() -> Claim {
    Claim::StepOrder(StepOrderClaim {
        procedure: "appendectomy".into(),
        step_before: "close incision".into(),
        step_after: "remove specimen".into(),
        relation: StepRelation::Precedes,
    })
}

fn anatomy_claim() -> Claim {
    Claim::Anatomy(AnatomyClaim {
        procedure: "appendectomy".into(),
        structure: "appendix".into(),
        relation: AnatomyRelation::Involves,
    })
}

fn complication_claim() -> Claim {
    Claim::Complication(ComplicationClaim {
        procedure: "appendectomy".into(),
        complication: "bleeding".into(),
        management: "ignore it".into(),
    })
}

fn not_in_graph(detail: &str) -> FailureReason {
    FailureReason::NotInGraph {
        detail: detail.into(),
    }
}

#[test]
fn step_order_failures_are_critical() {
    let record = taxonomy::classify(&unverified(
        step_order_claim(),
        not_in_graph("step ordering not found in graph"),
    ))
    .expect("classified");

    assert_eq!(record.hallucination_type, HallucinationType::StepOrderError);
    assert_eq!(record.category, TaxonomyCategory::Procedural);
    assert_eq!(record.severity, Severity::Critical);
    assert!((record.classification_confidence - 0.95).abs() < 1e-12);
}

#[test]
fn instrument_mapping_depends_on_reason() {
    // A clean "not found" means the instrument likely doesn't exist.
    let nonexistent = taxonomy::classify(&unverified(
        instrument_claim(),
        not_in_graph("instrument not found in graph"),
    ))
    .unwrap();
    assert_eq!(
        nonexistent.hallucination_type,
        HallucinationType::InstrumentNonexistent
    );
    assert_eq!(nonexistent.severity, Severity::Critical);

    // A missing relationship means the wrong instrument for the step.
    let incorrect = taxonomy::classify(&unverified(
        instrument_claim(),
        not_in_graph("no graph relationship found"),
    ))
    .unwrap();
    assert_eq!(
        incorrect.hallucination_type,
        HallucinationType::InstrumentIncorrect
    );
    assert_eq!(incorrect.severity, Severity::High);
}

#[test]
fn anatomy_mapping_distinguishes_location_errors() {
    let structure = taxonomy::classify(&unverified(
        anatomy_claim(),
        not_in_graph("anatomical structure not found in graph"),
    ))
    .unwrap();
    assert_eq!(
        structure.hallucination_type,
        HallucinationType::AnatomicalStructureError
    );

    let location = taxonomy::classify(&unverified(
        anatomy_claim(),
        not_in_graph("wrong location for structure"),
    ))
    .unwrap();
    assert_eq!(
        location.hallucination_type,
        HallucinationType::AnatomicalLocationError
    );
    assert_eq!(location.severity, Severity::Critical);
}

#[test]
fn complication_failures_map_to_management_error() {
    let record = taxonomy::classify(&unverified(
        complication_claim(),
        not_in_graph("complication not found in graph"),
    ))
    .unwrap();
    assert_eq!(record.hallucination_type, HallucinationType::ManagementError);
    assert_eq!(record.category, TaxonomyCategory::Complication);
    assert_eq!(record.severity, Severity::Critical);
}

#[test]
fn classification_confidence_tracks_signal_quality() {
    let clean = taxonomy::classify(&unverified(
        instrument_claim(),
        not_in_graph("not found in graph"),
    ))
    .unwrap();
    assert!((clean.classification_confidence - 0.95).abs() < 1e-12);

    let missing = taxonomy::classify(&unverified(
        instrument_claim(),
        FailureReason::MissingField {
            field: "step".into(),
        },
    ))
    .unwrap();
    assert!((missing.classification_confidence - 0.7).abs() < 1e-12);

    let ambiguous = taxonomy::classify(&unverified(
        instrument_claim(),
        FailureReason::QueryFailed {
            reason: "graph down".into(),
        },
    ))
    .unwrap();
    assert!((ambiguous.classification_confidence - 0.5).abs() < 1e-12);
}

#[test]
fn verified_outcomes_are_not_classified() {
    assert!(taxonomy::classify(&VerificationOutcome::verified(instrument_claim())).is_none());
}

#[test]
fn analysis_aggregates_distributions_and_safety() {
    let outcomes = vec![
        unverified(
            step_order_claim(),
            not_in_graph("step ordering not found in graph"),
        ),
        unverified(instrument_claim(), not_in_graph("no graph relationship found")),
        unverified(
            complication_claim(),
            not_in_graph("complication not found in graph"),
        ),
    ];
    let analysis = taxonomy::analyze(&outcomes);

    assert_eq!(analysis.total(), 3);
    assert_eq!(analysis.severity_counts.critical, 2);
    assert_eq!(analysis.severity_counts.high, 1);
    assert_eq!(
        analysis.category_distribution[&TaxonomyCategory::Procedural],
        1
    );
    // 1 - (2*1.0 + 1*0.5)/3 = 1/6.
    assert!((analysis.safety_score - (1.0 - 2.5 / 3.0)).abs() < 1e-9);

    // Critical entries force the manual-review recommendation.
    assert!(analysis.recommendations[0].contains("manual review"));
    assert!(analysis
        .recommendations
        .iter()
        .any(|r| r.contains("step-ordering")));
}

#[test]
fn clean_analysis_has_perfect_safety() {
    let analysis = taxonomy::analyze(&[]);
    assert_eq!(analysis.total(), 0);
    assert_eq!(analysis.safety_score, 1.0);
    assert!(analysis.recommendations.is_empty());
}

#[test]
fn taxonomy_table_covers_quantitative_policy() {
    // Dosage errors are the archetypal critical quantitative hallucination.
    let dosage = taxonomy::entry(HallucinationType::DosageError);
    assert_eq!(dosage.category, TaxonomyCategory::Quantitative);
    assert_eq!(dosage.severity, Severity::Critical);

    let citation = taxonomy::entry(HallucinationType::NoCitation);
    assert_eq!(citation.severity, Severity::Low);
}
