/// Lancet system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Vector-index "no match" sentinel floor. Scores at or below this value must
/// be filtered out by callers, never averaged in as real similarities.
pub const VALID_SCORE_FLOOR: f64 = -1e30;

/// Hard cap on sub-queries produced by decomposition.
pub const MAX_SUBQUERIES: usize = 4;

/// Hard cap on graph traversal depth for related-procedure lookups.
pub const MAX_GRAPH_TRAVERSAL_DEPTH: usize = 3;

/// Served when the vector index holds no documents at all. This path
/// short-circuits before retrieval and verification run.
pub const NO_DOCUMENTS_MESSAGE: &str =
    "No documents have been indexed yet. Index source material before asking questions.";

/// Served when retrieval finds no usable context for a query.
pub const NO_RELEVANT_CONTEXT_MESSAGE: &str =
    "Could not find relevant information for this question. Try rephrasing it or indexing more documents.";
