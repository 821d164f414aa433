use serde::{Deserialize, Serialize};

use super::defaults;
use crate::scoring;

/// Hybrid retriever configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Relative weight of vector-similarity candidates.
    pub vector_weight: f64,
    /// Relative weight of graph-traversal candidates.
    pub graph_weight: f64,
    pub use_graph: bool,
    pub expand_entities: bool,
    /// Vector candidates fetched per query, as a multiple of `top_k`.
    pub candidate_multiplier: usize,
    /// Query procedures taken into graph retrieval.
    pub max_query_procedures: usize,
    /// Related procedures kept per matched procedure.
    pub max_related_procedures: usize,
    /// Traversal depth for related-procedure lookups.
    pub graph_traversal_depth: usize,
    /// Case-folded text prefix length for the dedup fingerprint.
    pub dedup_prefix_len: usize,
    /// Related-procedure names attached per item during entity expansion.
    pub enrichment_limit: usize,
}

impl RetrievalConfig {
    /// Modality weights renormalized to sum to 1.
    pub fn modality_weights(&self) -> (f64, f64) {
        let normalized = scoring::normalize_weights(&[self.vector_weight, self.graph_weight]);
        (normalized[0], normalized[1])
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            vector_weight: defaults::DEFAULT_VECTOR_WEIGHT,
            graph_weight: defaults::DEFAULT_GRAPH_WEIGHT,
            use_graph: true,
            expand_entities: true,
            candidate_multiplier: defaults::DEFAULT_CANDIDATE_MULTIPLIER,
            max_query_procedures: defaults::DEFAULT_MAX_QUERY_PROCEDURES,
            max_related_procedures: defaults::DEFAULT_MAX_RELATED_PROCEDURES,
            graph_traversal_depth: defaults::DEFAULT_GRAPH_TRAVERSAL_DEPTH,
            dedup_prefix_len: defaults::DEFAULT_DEDUP_PREFIX_LEN,
            enrichment_limit: defaults::DEFAULT_ENRICHMENT_LIMIT,
        }
    }
}

/// Query decomposition and cross-sub-query aggregation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecompositionConfig {
    pub enabled: bool,
    /// Upper bound on sub-queries, capping downstream fan-out.
    pub max_subqueries: usize,
    /// Heuristic indicator count at which decomposition is attempted.
    pub complexity_threshold: f64,
    /// Items requested per sub-query during fan-out.
    pub per_subquery_top_k: usize,
    /// Per-extra-hit score boost for items surfaced by several sub-queries.
    pub subquery_boost: f64,
    /// Hard multiplier cap on the boost.
    pub subquery_boost_cap: f64,
}

impl Default for DecompositionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_subqueries: defaults::DEFAULT_MAX_SUBQUERIES,
            complexity_threshold: defaults::DEFAULT_COMPLEXITY_THRESHOLD,
            per_subquery_top_k: defaults::DEFAULT_PER_SUBQUERY_TOP_K,
            subquery_boost: defaults::DEFAULT_SUBQUERY_BOOST,
            subquery_boost_cap: defaults::DEFAULT_SUBQUERY_BOOST_CAP,
        }
    }
}
