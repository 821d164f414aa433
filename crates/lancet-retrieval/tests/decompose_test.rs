//! Query decomposer tests: heuristic gating, service delegation, fallbacks.

use std::sync::Arc;
use std::time::Duration;

use lancet_core::config::LancetConfig;
use lancet_retrieval::QueryDecomposer;
use test_fixtures::ScriptedDecomposer;

fn decomposer(generator: Arc<ScriptedDecomposer>, config: &LancetConfig) -> QueryDecomposer {
    QueryDecomposer::new(generator, config.decomposition.clone(), &config.remote)
}

const COMPLEX_QUERY: &str = "What are the steps for laparoscopic appendectomy, \
     what instruments are needed, and how do you manage a perforated appendix?";

#[tokio::test]
async fn simple_query_is_not_decomposed() {
    let generator = Arc::new(ScriptedDecomposer::returning(&["should not be called"]));
    let config = LancetConfig::default();
    let plan = decomposer(Arc::clone(&generator), &config)
        .plan("What is a trocar?")
        .await;

    assert!(!plan.is_complex);
    assert_eq!(plan.subqueries, vec!["What is a trocar?"]);
    assert_eq!(generator.calls(), 0, "service must not be called for simple queries");
}

#[tokio::test]
async fn complex_query_delegates_to_service() {
    let generator = Arc::new(ScriptedDecomposer::returning(&[
        "What are the steps for laparoscopic appendectomy?",
        "What instruments are needed for laparoscopic appendectomy?",
        "How do you manage a perforated appendix?",
    ]));
    let config = LancetConfig::default();
    let plan = decomposer(Arc::clone(&generator), &config).plan(COMPLEX_QUERY).await;

    assert!(plan.is_complex);
    assert_eq!(plan.subqueries.len(), 3);
    assert_eq!(plan.original_query, COMPLEX_QUERY);
    assert!(plan.complexity_score >= config.decomposition.complexity_threshold);
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn subqueries_are_capped_and_blanks_dropped() {
    let generator = Arc::new(ScriptedDecomposer::returning(&[
        "  one  ", "", "two", "three", "four", "five", "six",
    ]));
    let config = LancetConfig::default();
    let plan = decomposer(generator, &config).plan(COMPLEX_QUERY).await;

    assert!(plan.subqueries.len() <= config.decomposition.max_subqueries);
    assert!(plan.subqueries.iter().all(|s| !s.is_empty()));
    assert_eq!(plan.subqueries[0], "one");
}

#[tokio::test]
async fn service_failure_falls_back_to_original_query() {
    let generator = Arc::new(ScriptedDecomposer::failing());
    let config = LancetConfig::default();
    let plan = decomposer(generator, &config).plan(COMPLEX_QUERY).await;

    assert!(!plan.is_complex);
    assert_eq!(plan.subqueries, vec![COMPLEX_QUERY.to_string()]);
}

#[tokio::test]
async fn zero_usable_subqueries_falls_back() {
    let generator = Arc::new(ScriptedDecomposer::returning_empty());
    let config = LancetConfig::default();
    let plan = decomposer(generator, &config).plan(COMPLEX_QUERY).await;

    assert!(!plan.is_complex);
    assert_eq!(plan.subqueries.len(), 1);
}

#[tokio::test]
async fn slow_service_times_out_and_falls_back() {
    let generator = Arc::new(
        ScriptedDecomposer::returning(&["too", "late"]).with_delay(Duration::from_millis(200)),
    );
    let mut config = LancetConfig::default();
    config.remote.call_timeout_ms = 20;
    config.remote.retry_base_delay_ms = 1;

    let plan = decomposer(Arc::clone(&generator), &config).plan(COMPLEX_QUERY).await;

    assert!(!plan.is_complex, "timeout must degrade, not block");
    assert_eq!(plan.subqueries, vec![COMPLEX_QUERY.to_string()]);
    // Generation-service calls get the first try plus at most one retry.
    assert!(generator.calls() <= config.remote.generation_attempts as usize);
}

#[tokio::test]
async fn disabled_decomposition_never_calls_the_service() {
    let generator = Arc::new(ScriptedDecomposer::returning(&["a", "b"]));
    let mut config = LancetConfig::default();
    config.decomposition.enabled = false;

    let plan = decomposer(Arc::clone(&generator), &config).plan(COMPLEX_QUERY).await;

    assert!(!plan.is_complex);
    assert_eq!(generator.calls(), 0);
}
