//! Default policy constants. Each one is a tunable decision, not a magic
//! number: keep them named and auditable.

// Hybrid retrieval
pub const DEFAULT_VECTOR_WEIGHT: f64 = 0.6;
pub const DEFAULT_GRAPH_WEIGHT: f64 = 0.4;
pub const DEFAULT_CANDIDATE_MULTIPLIER: usize = 2;
pub const DEFAULT_MAX_QUERY_PROCEDURES: usize = 3;
pub const DEFAULT_MAX_RELATED_PROCEDURES: usize = 2;
pub const DEFAULT_GRAPH_TRAVERSAL_DEPTH: usize = 2;
pub const DEFAULT_DEDUP_PREFIX_LEN: usize = 100;
pub const DEFAULT_ENRICHMENT_LIMIT: usize = 3;

// Query decomposition
pub const DEFAULT_MAX_SUBQUERIES: usize = 4;
pub const DEFAULT_COMPLEXITY_THRESHOLD: f64 = 2.0;
pub const DEFAULT_PER_SUBQUERY_TOP_K: usize = 3;
pub const DEFAULT_SUBQUERY_BOOST: f64 = 0.1;
pub const DEFAULT_SUBQUERY_BOOST_CAP: f64 = 1.3;

// Confidence components
pub const DEFAULT_RETRIEVAL_WEIGHT: f64 = 0.30;
pub const DEFAULT_GRAPH_COVERAGE_WEIGHT: f64 = 0.25;
pub const DEFAULT_SOURCE_AGREEMENT_WEIGHT: f64 = 0.20;
pub const DEFAULT_VERIFICATION_WEIGHT: f64 = 0.25;

// Abstention
pub const DEFAULT_ABSTENTION_THRESHOLD: f64 = 0.5;

// Remote calls
pub const DEFAULT_CALL_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_STORE_ATTEMPTS: u32 = 3;
pub const DEFAULT_GENERATION_ATTEMPTS: u32 = 2;
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 50;
