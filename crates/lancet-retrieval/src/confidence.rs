//! Composite retrieval confidence.
//!
//! Retrieval similarity, graph-entity coverage, cross-source agreement, and
//! the verification score (when one exists) are normalized and combined
//! under configured weights into one score and a coarse level.
//! Missing inputs degrade to neutral defaults; this component never errors.

use std::collections::{BTreeMap, HashSet};

use lancet_core::config::ConfidenceConfig;
use lancet_core::models::{
    ComponentScore, ConfidenceLevel, ConfidenceReport, RetrievedItem,
};
use lancet_core::scoring;

/// Stateless composite confidence scorer.
#[derive(Debug, Clone)]
pub struct ConfidenceScorer {
    config: ConfidenceConfig,
}

impl ConfidenceScorer {
    pub fn new(config: ConfidenceConfig) -> Self {
        Self { config }
    }

    /// Compute the composite confidence for one query's retrieved context.
    pub fn compute(
        &self,
        items: &[RetrievedItem],
        query_entities: Option<&[String]>,
        graph_entities: Option<&[String]>,
        verification_score: Option<f64>,
    ) -> ConfidenceReport {
        let retrieval = retrieval_similarity(items);
        let coverage = graph_coverage(query_entities, graph_entities);
        let agreement = source_agreement(items);
        let verification = verification_score.unwrap_or(1.0);

        let weights = self.config.normalized();
        let overall = weights[0] * retrieval
            + weights[1] * coverage
            + weights[2] * agreement
            + weights[3] * verification;
        let level = scoring::confidence_level(overall);

        let mut components = BTreeMap::new();
        for (name, score, weight) in [
            ("retrieval", retrieval, weights[0]),
            ("graph_coverage", coverage, weights[1]),
            ("source_agreement", agreement, weights[2]),
            ("verification", verification, weights[3]),
        ] {
            components.insert(name.to_string(), ComponentScore { score, weight });
        }

        ConfidenceReport {
            overall,
            level,
            components,
            warning: warning_for(level, overall),
        }
    }
}

/// Mean of valid similarity scores; sentinel entries are excluded outright.
fn retrieval_similarity(items: &[RetrievedItem]) -> f64 {
    let scores: Vec<f64> = items.iter().map(|i| i.raw_score).collect();
    scoring::mean_valid_scores(&scores)
}

/// Fraction of query entities also present in the graph entity set.
///
/// No query entities means there was nothing to cover (1.0); query entities
/// with an empty graph set means nothing was found (0.0).
fn graph_coverage(query_entities: Option<&[String]>, graph_entities: Option<&[String]>) -> f64 {
    let query: Vec<String> = query_entities
        .unwrap_or_default()
        .iter()
        .map(|e| e.to_lowercase())
        .collect();
    if query.is_empty() {
        return 1.0;
    }
    let graph: HashSet<String> = graph_entities
        .unwrap_or_default()
        .iter()
        .map(|e| e.to_lowercase())
        .collect();
    if graph.is_empty() {
        return 0.0;
    }
    let query_set: HashSet<&String> = query.iter().collect();
    let found = query_set.iter().filter(|e| graph.contains(**e)).count();
    found as f64 / query_set.len() as f64
}

/// Agreement across retrieved chunks: source diversity (60%) blended with
/// score consistency (40%). A single chunk cannot corroborate itself and
/// scores a flat 0.5.
fn source_agreement(items: &[RetrievedItem]) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    if items.len() == 1 {
        return 0.5;
    }

    let sources: HashSet<&str> = items
        .iter()
        .filter_map(|i| i.metadata.source.as_deref())
        .filter(|s| !s.is_empty())
        .collect();
    let diversity = sources.len() as f64 / items.len() as f64;

    let valid_scores: Vec<f64> = items
        .iter()
        .map(|i| i.raw_score)
        .filter(|s| *s > lancet_core::constants::VALID_SCORE_FLOOR)
        .collect();
    let consistency = if valid_scores.len() >= 2 {
        // High variance across chunks means they disagree about relevance.
        1.0 - (scoring::score_variance(&valid_scores) * 10.0).min(1.0)
    } else {
        0.5
    };

    (0.6 * diversity + 0.4 * consistency).clamp(0.0, 1.0)
}

fn warning_for(level: ConfidenceLevel, score: f64) -> Option<String> {
    match level {
        ConfidenceLevel::High => None,
        ConfidenceLevel::Medium => Some(format!(
            "Medium confidence ({:.0}%). Based on available guidelines; verify with a senior clinician before clinical application.",
            score * 100.0
        )),
        ConfidenceLevel::Low => Some(format!(
            "Low confidence ({:.0}%). Insufficient evidence in the knowledge base; consult a supervisor or primary sources before use.",
            score * 100.0
        )),
    }
}
