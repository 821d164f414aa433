//! Hybrid retriever: dense vector similarity fused with knowledge-graph
//! traversal.
//!
//! Vector search finds semantically similar chunks; graph traversal finds
//! structurally related knowledge for the procedures named in the query. Both
//! candidate sets are deduplicated by content fingerprint, weighted by
//! modality, and merged into one ranked list.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use lancet_core::config::{LancetConfig, RetrievalConfig};
use lancet_core::constants::VALID_SCORE_FLOOR;
use lancet_core::models::{ItemMetadata, RetrievedItem, SourceModality};
use lancet_core::remote::RemotePolicy;
use lancet_core::scoring;
use lancet_core::traits::{EmbeddingProvider, EntityExtractor, GraphStore, VectorIndex};

/// Per-call retrieval switches.
#[derive(Debug, Clone, Copy)]
pub struct RetrievalOptions {
    /// Fetch graph-traversal candidates alongside vector hits.
    pub use_graph: bool,
    /// Enrich surviving items with related-procedure metadata.
    pub expand_entities: bool,
}

impl Default for RetrievalOptions {
    fn default() -> Self {
        Self {
            use_graph: true,
            expand_entities: true,
        }
    }
}

/// Fuses vector-similarity and graph-traversal candidates for one query.
pub struct HybridRetriever {
    vectors: Arc<dyn VectorIndex>,
    embedder: Arc<dyn EmbeddingProvider>,
    graph: Arc<dyn GraphStore>,
    entities: Arc<dyn EntityExtractor>,
    config: RetrievalConfig,
    store_policy: RemotePolicy,
    service_policy: RemotePolicy,
}

impl HybridRetriever {
    pub fn new(
        vectors: Arc<dyn VectorIndex>,
        embedder: Arc<dyn EmbeddingProvider>,
        graph: Arc<dyn GraphStore>,
        entities: Arc<dyn EntityExtractor>,
        config: &LancetConfig,
    ) -> Self {
        Self {
            vectors,
            embedder,
            graph,
            entities,
            config: config.retrieval.clone(),
            store_policy: RemotePolicy::store(&config.remote),
            service_policy: RemotePolicy::generation(&config.remote),
        }
    }

    /// Retrieve up to `top_k` fused candidates for `query`.
    ///
    /// Every external failure degrades that component's contribution; the
    /// call itself always completes with whatever survived.
    pub async fn retrieve(
        &self,
        query: &str,
        top_k: usize,
        options: &RetrievalOptions,
    ) -> Vec<RetrievedItem> {
        // Step 1: vector candidates, over-fetched for merge headroom.
        let fetch = self.config.candidate_multiplier * top_k;
        let vector_items = self.vector_candidates(query, fetch).await;

        let graph_items = if options.use_graph {
            self.graph_candidates(query, top_k).await
        } else {
            Vec::new()
        };

        debug!(
            vector = vector_items.len(),
            graph = graph_items.len(),
            "gathered hybrid candidates"
        );

        // Steps 3–5: dedup by fingerprint (vector items enumerate first, so
        // stable sorting keeps them ahead of graph items on ties), weight by
        // modality, rank, truncate.
        let (vector_weight, graph_weight) = self.config.modality_weights();
        let mut seen = HashSet::new();
        let mut merged: Vec<RetrievedItem> = Vec::new();
        for item in vector_items.into_iter().chain(graph_items) {
            let fingerprint = scoring::content_fingerprint(&item.text, self.config.dedup_prefix_len);
            if !seen.insert(fingerprint) {
                continue;
            }
            let weight = match item.modality {
                SourceModality::Vector => vector_weight,
                SourceModality::Graph => graph_weight,
            };
            merged.push(item.weighted(weight));
        }
        merged.sort_by(|a, b| {
            b.weighted_score
                .partial_cmp(&a.weighted_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        merged.truncate(top_k);

        // Step 6: optional graph-context enrichment; never affects ranking.
        if options.expand_entities {
            self.expand_with_graph_context(&mut merged).await;
        }

        merged
    }

    async fn vector_candidates(&self, query: &str, fetch: usize) -> Vec<RetrievedItem> {
        let embedding = match self
            .store_policy
            .run("embed_query", || self.embedder.embed(query))
            .await
        {
            Ok(embedding) => embedding,
            Err(e) => {
                warn!(error = %e, "query embedding failed, skipping vector retrieval");
                return Vec::new();
            }
        };

        let hits = match self
            .store_policy
            .run("vector_search", || self.vectors.search(&embedding, fetch))
            .await
        {
            Ok(hits) => hits,
            Err(e) => {
                warn!(error = %e, "vector search failed, skipping vector retrieval");
                return Vec::new();
            }
        };

        hits.into_iter()
            .filter(|hit| hit.score > VALID_SCORE_FLOOR)
            .map(|hit| RetrievedItem {
                id: hit.id,
                text: hit.text,
                modality: SourceModality::Vector,
                raw_score: hit.score,
                weighted_score: hit.score,
                metadata: hit.metadata,
            })
            .collect()
    }

    async fn graph_candidates(&self, query: &str, top_k: usize) -> Vec<RetrievedItem> {
        let entities = match self
            .service_policy
            .run("extract_query_entities", || {
                self.entities.extract_entities(query)
            })
            .await
        {
            Ok(entities) => entities,
            Err(e) => {
                warn!(error = %e, "query entity extraction failed, skipping graph retrieval");
                return Vec::new();
            }
        };

        let mut items = Vec::new();
        for procedure in entities
            .procedures
            .iter()
            .take(self.config.max_query_procedures)
        {
            // Exact procedure match scores 1.0.
            match self
                .store_policy
                .run("procedure_context", || self.graph.procedure_context(procedure))
                .await
            {
                Ok(Some(context)) => items.push(graph_item(
                    context.render(),
                    &context.procedure,
                    None,
                    0,
                )),
                Ok(None) => {}
                Err(e) => {
                    warn!(procedure = %procedure, error = %e, "graph context lookup failed");
                    continue;
                }
            }

            // Neighborhood: related procedures decay with traversal distance.
            let related = match self
                .store_policy
                .run("related_procedures", || {
                    self.graph
                        .related_procedures(procedure, self.config.graph_traversal_depth)
                })
                .await
            {
                Ok(related) => related,
                Err(e) => {
                    warn!(procedure = %procedure, error = %e, "related-procedure lookup failed");
                    continue;
                }
            };
            for relative in related.iter().take(self.config.max_related_procedures) {
                if let Ok(Some(context)) = self
                    .store_policy
                    .run("procedure_context", || {
                        self.graph.procedure_context(&relative.name)
                    })
                    .await
                {
                    items.push(graph_item(
                        context.render(),
                        &context.procedure,
                        Some(procedure.clone()),
                        relative.distance,
                    ));
                }
            }
        }

        items.sort_by(|a, b| {
            b.raw_score
                .partial_cmp(&a.raw_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        items.truncate(top_k);
        items
    }

    async fn expand_with_graph_context(&self, items: &mut [RetrievedItem]) {
        for item in items.iter_mut() {
            let entities = match self
                .service_policy
                .run("extract_item_entities", || {
                    self.entities.extract_entities(&item.text)
                })
                .await
            {
                Ok(entities) => entities,
                Err(e) => {
                    debug!(error = %e, "item entity extraction failed, leaving unenriched");
                    continue;
                }
            };

            if let Some(main_procedure) = entities.procedures.first() {
                if let Ok(related) = self
                    .store_policy
                    .run("related_procedures", || {
                        self.graph.related_procedures(main_procedure, 1)
                    })
                    .await
                {
                    item.metadata.related_procedures = related
                        .into_iter()
                        .take(self.config.enrichment_limit)
                        .map(|r| r.name)
                        .collect();
                }
            }
            item.metadata.entities = Some(entities);
        }
    }
}

fn graph_item(
    text: String,
    procedure: &str,
    related_to: Option<String>,
    distance: usize,
) -> RetrievedItem {
    let score = scoring::graph_distance_score(distance);
    RetrievedItem {
        id: format!("graph:{}", procedure.to_lowercase()),
        text,
        modality: SourceModality::Graph,
        raw_score: score,
        weighted_score: score,
        metadata: ItemMetadata {
            source: Some("knowledge_graph".to_string()),
            procedure: Some(procedure.to_string()),
            related_to,
            graph_distance: Some(distance),
            ..Default::default()
        },
    }
}
