use serde::{Deserialize, Serialize};

/// The decomposition plan for one incoming query.
///
/// Built once by the query decomposer and consumed read-only downstream.
/// `subqueries` is never empty: a simple or failed decomposition carries the
/// original query as its single entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubqueryPlan {
    pub original_query: String,
    /// Ordered, self-contained sub-questions.
    pub subqueries: Vec<String>,
    pub is_complex: bool,
    /// Number of complexity indicators the heuristic fired on.
    pub complexity_score: f64,
}

impl SubqueryPlan {
    /// Plan that degrades to retrieving with the original query only.
    pub fn single(query: impl Into<String>) -> Self {
        let query = query.into();
        Self {
            subqueries: vec![query.clone()],
            original_query: query,
            is_complex: false,
            complexity_score: 0.0,
        }
    }
}
