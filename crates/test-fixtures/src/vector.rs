//! Deterministic embedding + vector index doubles.

use std::sync::Mutex;

use async_trait::async_trait;
use lancet_core::errors::LancetResult;
use lancet_core::models::ItemMetadata;
use lancet_core::traits::{EmbeddingProvider, VectorHit, VectorIndex};

const DIM: usize = 64;

/// Token-hash embedder: stable, offline, and similar texts land close.
///
/// Every token is hashed into one of `DIM` buckets; the bucket counts are
/// L2-normalized so dot products behave like cosine similarity.
#[derive(Debug, Default, Clone)]
pub struct HashingEmbedder;

impl HashingEmbedder {
    pub fn embed_sync(&self, text: &str) -> Vec<f32> {
        let mut buckets = vec![0f32; DIM];
        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let hash = blake3::hash(token.to_lowercase().as_bytes());
            let bucket = u64::from_le_bytes(hash.as_bytes()[..8].try_into().unwrap()) as usize;
            buckets[bucket % DIM] += 1.0;
        }
        let norm = buckets.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut buckets {
                *v /= norm;
            }
        }
        buckets
    }
}

#[async_trait]
impl EmbeddingProvider for HashingEmbedder {
    async fn embed(&self, text: &str) -> LancetResult<Vec<f32>> {
        Ok(self.embed_sync(text))
    }
}

struct Document {
    id: String,
    text: String,
    embedding: Vec<f32>,
    metadata: ItemMetadata,
}

/// Flat inner-product index over normalized embeddings.
///
/// Like the production index, a search for `top_k` always returns `top_k`
/// slots, padding the tail with sentinel-scored hits that callers are
/// expected to filter out.
#[derive(Default)]
pub struct InMemoryVectorIndex {
    documents: Mutex<Vec<Document>>,
    embedder: HashingEmbedder,
}

impl InMemoryVectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a text chunk; the metadata `source`/`title` mirror ingestion.
    pub fn insert(&self, id: &str, text: &str, source: &str) {
        let metadata = ItemMetadata {
            source: Some(source.to_string()),
            title: Some(source.to_string()),
            ..Default::default()
        };
        self.insert_with_metadata(id, text, metadata);
    }

    pub fn insert_with_metadata(&self, id: &str, text: &str, metadata: ItemMetadata) {
        self.documents.lock().unwrap().push(Document {
            id: id.to_string(),
            text: text.to_string(),
            embedding: self.embedder.embed_sync(text),
            metadata,
        });
    }

    pub fn len(&self) -> usize {
        self.documents.lock().unwrap().len()
    }
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    async fn search(&self, embedding: &[f32], top_k: usize) -> LancetResult<Vec<VectorHit>> {
        let documents = self.documents.lock().unwrap();
        let mut hits: Vec<VectorHit> = documents
            .iter()
            .map(|doc| {
                let score: f64 = doc
                    .embedding
                    .iter()
                    .zip(embedding)
                    .map(|(a, b)| (*a as f64) * (*b as f64))
                    .sum();
                VectorHit {
                    id: doc.id.clone(),
                    score,
                    text: doc.text.clone(),
                    metadata: doc.metadata.clone(),
                }
            })
            .collect();
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(top_k);
        // Pad empty slots with "no match" sentinels.
        while hits.len() < top_k {
            hits.push(VectorHit {
                id: String::new(),
                score: f64::NEG_INFINITY,
                text: String::new(),
                metadata: ItemMetadata::default(),
            });
        }
        Ok(hits)
    }

    async fn is_empty(&self) -> LancetResult<bool> {
        Ok(self.documents.lock().unwrap().is_empty())
    }
}
