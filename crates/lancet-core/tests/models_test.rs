//! Tests for model aggregation invariants.

use lancet_core::models::{
    AnatomyClaim, AnatomyRelation, Claim, ClaimCategory, ComplicationClaim, FailureReason,
    InstrumentClaim, VerificationOutcome, VerificationReport,
};

fn instrument_claim(step: &str, instrument: &str) -> Claim {
    Claim::Instrument(InstrumentClaim {
        step: step.into(),
        instrument: instrument.into(),
        usage: String::new(),
    })
}

fn anatomy_claim(structure: &str) -> Claim {
    Claim::Anatomy(AnatomyClaim {
        procedure: "appendectomy".into(),
        structure: structure.into(),
        relation: AnatomyRelation::Involves,
    })
}

#[test]
fn zero_claims_scores_one() {
    let report = VerificationReport::empty();
    assert_eq!(report.total_claims, 0);
    assert_eq!(report.overall_score, 1.0);
    for score in report.score_by_category.values() {
        assert_eq!(*score, 1.0);
    }
}

#[test]
fn overall_score_is_verified_over_total() {
    let outcomes = vec![
        VerificationOutcome::verified(instrument_claim("incision", "scalpel")),
        VerificationOutcome::unverified(
            instrument_claim("closure", "laser"),
            FailureReason::NotInGraph {
                detail: "no USES relationship".into(),
            },
        ),
        VerificationOutcome::verified(anatomy_claim("appendix")),
        VerificationOutcome::verified(anatomy_claim("cecum")),
    ];
    let report = VerificationReport::from_outcomes(outcomes);

    assert_eq!(report.total_claims, 4);
    assert_eq!(report.verified_claims, 3);
    assert_eq!(report.unverified_claims, 1);
    assert!((report.overall_score - 0.75).abs() < 1e-12);

    // Category scores: instruments 1/2, anatomy 2/2, untouched categories 1.0.
    assert!((report.score_by_category[&ClaimCategory::Instrument] - 0.5).abs() < 1e-12);
    assert_eq!(report.score_by_category[&ClaimCategory::Anatomy], 1.0);
    assert_eq!(report.score_by_category[&ClaimCategory::StepOrder], 1.0);
    assert_eq!(report.score_by_category[&ClaimCategory::Complication], 1.0);

    // Only failed outcomes are retained in `unverified`.
    assert_eq!(report.unverified.len(), 1);
    assert!(!report.unverified[0].verified);
}

#[test]
fn claim_description_mentions_category_terms() {
    let claim = Claim::Complication(ComplicationClaim {
        procedure: "cholecystectomy".into(),
        complication: "bile leak".into(),
        management: "drain placement".into(),
    });
    let text = claim.describe();
    assert!(text.contains("complication"));
    assert!(text.contains("bile leak"));
    // Rendering is lowercased for keyword scans.
    assert_eq!(text, text.to_lowercase());
}
