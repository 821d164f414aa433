use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::retrieved_item::RetrievedItem;

/// A retrieved item after cross-sub-query aggregation.
///
/// Items surfaced by more than one sub-query carry a bounded score boost;
/// the invariant `subquery_hit_count() == retrieving_subqueries.len()` holds
/// by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedResult {
    pub item: RetrievedItem,
    /// Indices into the `SubqueryPlan` of every sub-query that returned this item.
    pub retrieving_subqueries: BTreeSet<usize>,
    /// Max raw score across hits, scaled by the multi-hit boost.
    pub final_score: f64,
}

impl AggregatedResult {
    pub fn subquery_hit_count(&self) -> usize {
        self.retrieving_subqueries.len()
    }
}
