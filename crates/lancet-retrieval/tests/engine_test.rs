//! Multi-step aggregation tests, including the double-hit boost scenario.

use std::sync::Arc;

use lancet_core::config::LancetConfig;
use lancet_core::models::SubqueryPlan;
use lancet_retrieval::{HybridRetriever, QueryDecomposer, RetrievalEngine, RetrievalOptions};
use test_fixtures::{
    HashingEmbedder, InMemoryGraphStore, InMemoryVectorIndex, ScriptedDecomposer,
    StaticEntityExtractor,
};

/// Two disjoint procedures: "appendectomy" sub-queries hit one graph item,
/// "cholecystectomy" sub-queries hit the other. Raw graph scores are exactly
/// 1.0 for exact matches, which makes boost arithmetic observable.
fn engine(config: &LancetConfig) -> RetrievalEngine {
    let graph = InMemoryGraphStore::new();
    graph.add_procedure(
        "Appendectomy",
        &["Appendix"],
        &["Trocar"],
        &["Infection"],
        &[],
        &[],
    );
    graph.add_procedure(
        "Cholecystectomy",
        &["Gallbladder"],
        &["Clip applier"],
        &["Bile leak"],
        &[],
        &[],
    );

    let hybrid = HybridRetriever::new(
        Arc::new(InMemoryVectorIndex::new()),
        Arc::new(HashingEmbedder),
        Arc::new(graph),
        Arc::new(StaticEntityExtractor::new()),
        config,
    );
    let decomposer = QueryDecomposer::new(
        Arc::new(ScriptedDecomposer::returning_empty()),
        config.decomposition.clone(),
        &config.remote,
    );
    RetrievalEngine::new(decomposer, Arc::new(hybrid), config.clone())
}

fn options() -> RetrievalOptions {
    RetrievalOptions {
        use_graph: true,
        expand_entities: false,
    }
}

fn complex_plan(subqueries: &[&str]) -> SubqueryPlan {
    SubqueryPlan {
        original_query: subqueries.join(" and "),
        subqueries: subqueries.iter().map(|s| s.to_string()).collect(),
        is_complex: true,
        complexity_score: 3.0,
    }
}

#[tokio::test]
async fn double_hit_item_is_boosted_and_outranks_single_hit() {
    let config = LancetConfig::default();
    let engine = engine(&config);

    // Appendectomy is retrieved by 2 of 3 sub-queries; cholecystectomy by 1.
    // Both carry the same raw score (exact graph match = 1.0).
    let plan = complex_plan(&[
        "What are the steps of appendectomy?",
        "Which instruments does appendectomy need?",
        "What complications can cholecystectomy cause?",
    ]);
    let results = engine.retrieve_with_plan(&plan, 5, options()).await;

    let appendectomy = results
        .iter()
        .find(|r| r.item.metadata.procedure.as_deref() == Some("Appendectomy"))
        .expect("double-hit item present");
    let cholecystectomy = results
        .iter()
        .find(|r| r.item.metadata.procedure.as_deref() == Some("Cholecystectomy"))
        .expect("single-hit item present");

    // One extra hit beyond the first: raw × 1.1.
    assert_eq!(appendectomy.subquery_hit_count(), 2);
    assert!((appendectomy.final_score - appendectomy.item.raw_score * 1.1).abs() < 1e-9);
    assert_eq!(
        appendectomy.subquery_hit_count(),
        appendectomy.retrieving_subqueries.len()
    );

    // Equal raw scores, but the double-hit item ranks first.
    assert_eq!(cholecystectomy.subquery_hit_count(), 1);
    assert_eq!(appendectomy.item.raw_score, cholecystectomy.item.raw_score);
    assert!(appendectomy.final_score > cholecystectomy.final_score);
    let first = &results[0];
    assert_eq!(first.item.metadata.procedure.as_deref(), Some("Appendectomy"));
}

#[tokio::test]
async fn boost_saturates_at_the_configured_cap() {
    let mut config = LancetConfig::default();
    config.decomposition.subquery_boost_cap = 1.15;
    let engine = engine(&config);

    // Four sub-queries all hitting the same item would boost 1.3× uncapped.
    let plan = complex_plan(&[
        "appendectomy steps",
        "appendectomy instruments",
        "appendectomy complications",
        "appendectomy anatomy",
    ]);
    let results = engine.retrieve_with_plan(&plan, 5, options()).await;

    let item = results.first().expect("aggregated item");
    assert_eq!(item.subquery_hit_count(), 4);
    assert!((item.final_score - item.item.raw_score * 1.15).abs() < 1e-9);
}

#[tokio::test]
async fn simple_plan_degrades_to_single_retrieval() {
    let config = LancetConfig::default();
    let engine = engine(&config);

    let results = engine
        .retrieve("appendectomy", 5, options())
        .await;

    assert!(!results.is_empty());
    for result in &results {
        assert_eq!(result.retrieving_subqueries.len(), 1);
        assert!(result.retrieving_subqueries.contains(&0));
        // Single path ranks by the hybrid weighted score unchanged.
        assert!((result.final_score - result.item.weighted_score).abs() < 1e-12);
    }
}

#[tokio::test]
async fn results_are_truncated_to_caller_top_k() {
    let config = LancetConfig::default();
    let engine = engine(&config);

    let plan = complex_plan(&[
        "appendectomy overview",
        "cholecystectomy overview",
    ]);
    let results = engine.retrieve_with_plan(&plan, 1, options()).await;
    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn aggregated_output_is_sorted_by_final_score() {
    let config = LancetConfig::default();
    let engine = engine(&config);

    let plan = complex_plan(&[
        "appendectomy steps",
        "appendectomy instruments",
        "cholecystectomy complications",
    ]);
    let results = engine.retrieve_with_plan(&plan, 10, options()).await;
    for pair in results.windows(2) {
        assert!(pair[0].final_score >= pair[1].final_score);
    }
}
