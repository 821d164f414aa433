//! Query complexity classification and decomposition.
//!
//! A deterministic heuristic gates the call to the text-generation service;
//! anything that goes wrong there degrades to retrieving with the original
//! query. Decomposition failure never blocks retrieval.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::{debug, warn};

use lancet_core::config::{DecompositionConfig, RemoteCallConfig};
use lancet_core::models::SubqueryPlan;
use lancet_core::remote::RemotePolicy;
use lancet_core::traits::TextGenerator;

/// Topical aspects a multi-part question tends to mix.
const ASPECT_KEYWORDS: [&str; 5] = [
    "steps",
    "instruments",
    "complications",
    "anatomy",
    "management",
];

/// Regex for comparison phrasing.
static COMPARISON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(compare|comparison|versus|vs\.?|difference between)\b").unwrap()
});

/// Classifies queries and plans sub-queries.
pub struct QueryDecomposer {
    generator: Arc<dyn TextGenerator>,
    config: DecompositionConfig,
    policy: RemotePolicy,
}

impl QueryDecomposer {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        config: DecompositionConfig,
        remote: &RemoteCallConfig,
    ) -> Self {
        Self {
            generator,
            config,
            policy: RemotePolicy::generation(remote),
        }
    }

    /// Deterministic complexity heuristic. Each structural indicator counts
    /// 1.0; each distinct topical aspect keyword adds 0.5.
    pub fn complexity_score(&self, query: &str) -> f64 {
        let lower = query.to_lowercase();
        let mut score = 0.0;

        if query.split_whitespace().count() > 15 {
            score += 1.0;
        }
        if query.matches(',').count() >= 2 {
            score += 1.0;
        }
        if lower.contains(" and ") {
            score += 1.0;
        }
        // Question marks anywhere before the final character hint at multiple
        // questions packed into one.
        if query.trim_end().trim_end_matches('?').contains('?') {
            score += 1.0;
        }
        if COMPARISON_RE.is_match(&lower) {
            score += 1.0;
        }
        score += 0.5
            * ASPECT_KEYWORDS
                .iter()
                .filter(|k| lower.contains(*k))
                .count() as f64;

        score
    }

    /// Build the sub-query plan for one incoming query.
    pub async fn plan(&self, query: &str) -> SubqueryPlan {
        let complexity_score = self.complexity_score(query);

        if !self.config.enabled || complexity_score < self.config.complexity_threshold {
            debug!(complexity_score, "query is simple, no decomposition");
            return SubqueryPlan {
                complexity_score,
                ..SubqueryPlan::single(query)
            };
        }

        let subqueries = match self
            .policy
            .run("decompose", || self.generator.decompose(query))
            .await
        {
            Ok(raw) => sanitize(raw, self.config.max_subqueries),
            Err(e) => {
                warn!(error = %e, "decomposition service failed, using original query");
                Vec::new()
            }
        };

        if subqueries.len() < 2 {
            // Nothing usable (or already focused): degrade to the original.
            return SubqueryPlan {
                complexity_score,
                ..SubqueryPlan::single(query)
            };
        }

        debug!(count = subqueries.len(), "query decomposed");
        SubqueryPlan {
            original_query: query.to_string(),
            subqueries,
            is_complex: true,
            complexity_score,
        }
    }
}

/// Trim, drop blanks, and cap fan-out.
fn sanitize(raw: Vec<String>, max_subqueries: usize) -> Vec<String> {
    raw.into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .take(max_subqueries)
        .collect()
}
