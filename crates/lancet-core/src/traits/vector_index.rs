use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::LancetResult;
use crate::models::ItemMetadata;

/// One nearest-neighbor hit from the vector index.
///
/// Scores are cosine similarities in [-1, 1]. A score at or below
/// [`crate::constants::VALID_SCORE_FLOOR`] means "no match" and must be
/// filtered out by the caller, never averaged in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorHit {
    pub id: String,
    pub score: f64,
    /// The indexed chunk text.
    pub text: String,
    pub metadata: ItemMetadata,
}

/// Read side of the dense vector index.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    async fn search(&self, embedding: &[f32], top_k: usize) -> LancetResult<Vec<VectorHit>>;

    /// Whether the index contains any documents at all. Drives the fixed
    /// no-documents response path.
    async fn is_empty(&self) -> LancetResult<bool>;
}
