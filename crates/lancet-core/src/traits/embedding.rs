use async_trait::async_trait;

use crate::errors::LancetResult;

/// Turns text into a normalized embedding vector.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> LancetResult<Vec<f32>>;
}
