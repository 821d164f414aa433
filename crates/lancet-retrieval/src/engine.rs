//! RetrievalEngine: the produced `retrieve` operation.
//!
//! plan → per-sub-query hybrid retrieval (concurrent fan-out) → fingerprint
//! grouping → bounded multi-hit boost → final ranking.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use lancet_core::config::LancetConfig;
use lancet_core::models::{AggregatedResult, RetrievedItem, SubqueryPlan};
use lancet_core::scoring;

use crate::decompose::QueryDecomposer;
use crate::hybrid::{HybridRetriever, RetrievalOptions};

/// Orchestrates decomposition and cross-sub-query aggregation on top of the
/// hybrid retriever.
pub struct RetrievalEngine {
    decomposer: QueryDecomposer,
    hybrid: Arc<HybridRetriever>,
    config: LancetConfig,
}

impl RetrievalEngine {
    pub fn new(
        decomposer: QueryDecomposer,
        hybrid: Arc<HybridRetriever>,
        config: LancetConfig,
    ) -> Self {
        Self {
            decomposer,
            hybrid,
            config,
        }
    }

    /// Retrieve ranked context for `query`, decomposing it first when the
    /// complexity heuristic fires.
    pub async fn retrieve(
        &self,
        query: &str,
        top_k: usize,
        options: RetrievalOptions,
    ) -> Vec<AggregatedResult> {
        let plan = self.decomposer.plan(query).await;
        self.retrieve_with_plan(&plan, top_k, options).await
    }

    /// Retrieve with an already-built plan.
    pub async fn retrieve_with_plan(
        &self,
        plan: &SubqueryPlan,
        top_k: usize,
        options: RetrievalOptions,
    ) -> Vec<AggregatedResult> {
        if !plan.is_complex || plan.subqueries.len() < 2 {
            // Simple query: one hybrid call, ranked by its weighted scores.
            let items = self.hybrid.retrieve(&plan.original_query, top_k, &options).await;
            return items
                .into_iter()
                .map(|item| AggregatedResult {
                    final_score: item.weighted_score,
                    item,
                    retrieving_subqueries: BTreeSet::from([0]),
                })
                .collect();
        }

        // Fan out: one independent, read-only hybrid call per sub-query.
        let per_subquery = self.config.decomposition.per_subquery_top_k;
        let mut tasks: JoinSet<(usize, Vec<RetrievedItem>)> = JoinSet::new();
        for (index, subquery) in plan.subqueries.iter().enumerate() {
            let hybrid = Arc::clone(&self.hybrid);
            let subquery = subquery.clone();
            tasks.spawn(async move {
                let items = hybrid.retrieve(&subquery, per_subquery, &options).await;
                (index, items)
            });
        }

        // Fan in after every sub-query completes or times out internally.
        let mut hits: Vec<(usize, RetrievedItem)> = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, items)) => {
                    debug!(subquery = index, items = items.len(), "sub-query returned");
                    hits.extend(items.into_iter().map(|item| (index, item)));
                }
                Err(e) => warn!(error = %e, "sub-query task failed, dropping its results"),
            }
        }

        let results = self.aggregate(hits, top_k);
        info!(
            subqueries = plan.subqueries.len(),
            results = results.len(),
            "multi-step retrieval complete"
        );
        results
    }

    /// Group by content fingerprint, keep the best-scoring representative,
    /// and apply the bounded multi-hit boost.
    fn aggregate(
        &self,
        hits: Vec<(usize, RetrievedItem)>,
        top_k: usize,
    ) -> Vec<AggregatedResult> {
        struct Group {
            best: RetrievedItem,
            subqueries: BTreeSet<usize>,
        }

        let prefix_len = self.config.retrieval.dedup_prefix_len;
        let mut groups: HashMap<String, Group> = HashMap::new();
        for (index, item) in hits {
            let fingerprint = scoring::content_fingerprint(&item.text, prefix_len);
            match groups.entry(fingerprint) {
                Entry::Occupied(mut entry) => {
                    let group = entry.get_mut();
                    group.subqueries.insert(index);
                    if item.raw_score > group.best.raw_score {
                        group.best = item;
                    }
                }
                Entry::Vacant(entry) => {
                    entry.insert(Group {
                        best: item,
                        subqueries: BTreeSet::from([index]),
                    });
                }
            }
        }

        let boost = self.config.decomposition.subquery_boost;
        let cap = self.config.decomposition.subquery_boost_cap;
        let mut results: Vec<AggregatedResult> = groups
            .into_values()
            .map(|group| AggregatedResult {
                final_score: group.best.raw_score
                    * scoring::hit_count_boost(group.subqueries.len(), boost, cap),
                item: group.best,
                retrieving_subqueries: group.subqueries,
            })
            .collect();

        // Rank by boosted score; break ties deterministically by the earliest
        // retrieving sub-query, then id.
        results.sort_by(|a, b| {
            b.final_score
                .partial_cmp(&a.final_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    a.retrieving_subqueries
                        .first()
                        .cmp(&b.retrieving_subqueries.first())
                })
                .then_with(|| a.item.id.cmp(&b.item.id))
        });
        results.truncate(top_k);
        results
    }
}
