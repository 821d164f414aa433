//! Graph verifier tests: per-category checks and score aggregation.

use std::sync::Arc;

use lancet_core::config::RemoteCallConfig;
use lancet_core::models::{
    AnatomyClaim, AnatomyRelation, ClaimCategory, ClaimSet, ComplicationClaim, FailureReason,
    InstrumentClaim, StepOrderClaim, StepRelation,
};
use lancet_core::traits::NodeType;
use lancet_verification::GraphVerifier;
use test_fixtures::InMemoryGraphStore;

fn seeded_graph() -> Arc<InMemoryGraphStore> {
    let graph = InMemoryGraphStore::new();
    graph.add_procedure(
        "Laparoscopic Appendectomy",
        &["Appendix", "Cecum"],
        &["Trocar", "Stapler"],
        &["Bleeding", "Infection"],
        &["Laparoscopic"],
        &["Antibiotics"],
    );
    graph.add_step_sequence(&[
        "Port placement",
        "Identify appendix",
        "Divide mesoappendix",
        "Remove specimen",
    ]);
    graph.add_step_instrument("Divide mesoappendix", "Stapler");
    // An anatomy node with no procedure relation, for the partial-credit path.
    graph.add_node(NodeType::Anatomy, "Gallbladder");
    graph
}

fn verifier(graph: Arc<InMemoryGraphStore>) -> GraphVerifier {
    GraphVerifier::new(graph, &RemoteCallConfig::default())
}

fn instrument(step: &str, instrument: &str) -> InstrumentClaim {
    InstrumentClaim {
        step: step.into(),
        instrument: instrument.into(),
        usage: String::new(),
    }
}

fn step_order(before: &str, after: &str, relation: StepRelation) -> StepOrderClaim {
    StepOrderClaim {
        procedure: "laparoscopic appendectomy".into(),
        step_before: before.into(),
        step_after: after.into(),
        relation,
    }
}

fn anatomy(structure: &str) -> AnatomyClaim {
    AnatomyClaim {
        procedure: "laparoscopic appendectomy".into(),
        structure: structure.into(),
        relation: AnatomyRelation::Involves,
    }
}

#[tokio::test]
async fn instrument_claim_with_uses_edge_verifies() {
    let claims = ClaimSet {
        instrument_claims: vec![instrument("divide mesoappendix", "stapler")],
        ..Default::default()
    };
    let report = verifier(seeded_graph()).verify(&claims).await;
    assert_eq!(report.verified_claims, 1);
    assert_eq!(report.overall_score, 1.0);
}

#[tokio::test]
async fn instrument_claim_falls_back_to_node_existence() {
    // No USES edge between these two, but both nodes exist.
    let claims = ClaimSet {
        instrument_claims: vec![instrument("port placement", "trocar")],
        ..Default::default()
    };
    let report = verifier(seeded_graph()).verify(&claims).await;
    assert_eq!(report.verified_claims, 1);
}

#[tokio::test]
async fn unknown_instrument_is_unverified() {
    let claims = ClaimSet {
        instrument_claims: vec![instrument("port placement", "quantum dissector")],
        ..Default::default()
    };
    let report = verifier(seeded_graph()).verify(&claims).await;
    assert_eq!(report.verified_claims, 0);
    assert!(matches!(
        report.unverified[0].reason,
        Some(FailureReason::NotInGraph { .. })
    ));
}

#[tokio::test]
async fn empty_instrument_field_is_missing_not_queried() {
    let claims = ClaimSet {
        instrument_claims: vec![instrument("port placement", "  ")],
        ..Default::default()
    };
    let report = verifier(seeded_graph()).verify(&claims).await;
    match &report.unverified[0].reason {
        Some(FailureReason::MissingField { field }) => assert_eq!(field, "instrument"),
        other => panic!("expected missing field, got {other:?}"),
    }
}

#[tokio::test]
async fn recorded_step_order_verifies() {
    let claims = ClaimSet {
        step_order_claims: vec![step_order(
            "identify appendix",
            "divide mesoappendix",
            StepRelation::Precedes,
        )],
        ..Default::default()
    };
    let report = verifier(seeded_graph()).verify(&claims).await;
    assert_eq!(report.verified_claims, 1);
}

#[tokio::test]
async fn contradicted_step_order_is_unverified() {
    // The graph records the opposite direction.
    let claims = ClaimSet {
        step_order_claims: vec![step_order(
            "divide mesoappendix",
            "identify appendix",
            StepRelation::Precedes,
        )],
        ..Default::default()
    };
    let report = verifier(seeded_graph()).verify(&claims).await;
    assert_eq!(report.verified_claims, 0);
    assert_eq!(report.total_claims, 1);
    assert_eq!(report.overall_score, 0.0);
}

#[tokio::test]
async fn anatomy_with_procedure_relation_verifies() {
    let claims = ClaimSet {
        anatomy_claims: vec![anatomy("appendix")],
        ..Default::default()
    };
    let report = verifier(seeded_graph()).verify(&claims).await;
    assert_eq!(report.verified_claims, 1);
}

#[tokio::test]
async fn anatomy_gets_partial_credit_for_bare_node() {
    // Gallbladder exists in the graph but no procedure relates to it the
    // expected way; the claim still verifies by node existence.
    let claims = ClaimSet {
        anatomy_claims: vec![anatomy("gallbladder")],
        ..Default::default()
    };
    let report = verifier(seeded_graph()).verify(&claims).await;
    assert_eq!(report.verified_claims, 1);
}

#[tokio::test]
async fn unknown_anatomy_is_unverified() {
    let claims = ClaimSet {
        anatomy_claims: vec![anatomy("flux capacitor")],
        ..Default::default()
    };
    let report = verifier(seeded_graph()).verify(&claims).await;
    assert_eq!(report.verified_claims, 0);
}

#[tokio::test]
async fn complication_existence_check() {
    let claims = ClaimSet {
        complication_claims: vec![
            ComplicationClaim {
                procedure: "appendectomy".into(),
                complication: "bleeding".into(),
                management: "pressure and cautery".into(),
            },
            ComplicationClaim {
                procedure: "appendectomy".into(),
                complication: "spontaneous combustion".into(),
                management: String::new(),
            },
        ],
        ..Default::default()
    };
    let report = verifier(seeded_graph()).verify(&claims).await;
    assert_eq!(report.verified_claims, 1);
    assert_eq!(report.total_claims, 2);
    assert!((report.overall_score - 0.5).abs() < 1e-12);
    assert!(
        (report.score_by_category[&ClaimCategory::Complication] - 0.5).abs() < 1e-12
    );
}

#[tokio::test]
async fn containment_matching_tolerates_lexical_variation() {
    // "appendectomy" is a substring of the stored "Laparoscopic Appendectomy".
    let claims = ClaimSet {
        anatomy_claims: vec![AnatomyClaim {
            procedure: "appendectomy".into(),
            structure: "Cecum".into(),
            relation: AnatomyRelation::Involves,
        }],
        ..Default::default()
    };
    let report = verifier(seeded_graph()).verify(&claims).await;
    assert_eq!(report.verified_claims, 1);
}

#[tokio::test]
async fn empty_claim_set_scores_one() {
    let report = verifier(seeded_graph()).verify(&ClaimSet::default()).await;
    assert_eq!(report.total_claims, 0);
    assert_eq!(report.overall_score, 1.0);
}

#[tokio::test]
async fn mixed_categories_aggregate_overall_score() {
    let claims = ClaimSet {
        instrument_claims: vec![
            instrument("divide mesoappendix", "stapler"),
            instrument("closure", "quantum dissector"),
        ],
        anatomy_claims: vec![anatomy("appendix"), anatomy("flux capacitor")],
        ..Default::default()
    };
    let report = verifier(seeded_graph()).verify(&claims).await;
    assert_eq!(report.total_claims, 4);
    assert_eq!(report.verified_claims, 2);
    assert!((report.overall_score - 0.5).abs() < 1e-12);
    assert_eq!(report.unverified.len(), 2);
}
