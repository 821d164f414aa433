use async_trait::async_trait;

use crate::errors::LancetResult;
use crate::models::{ExtractedEntities, RawClaimSet};

/// External NLU service tagging text spans with entity categories.
///
/// Best-effort: implementations should return an empty structure for text
/// they cannot process rather than failing the pipeline.
#[async_trait]
pub trait EntityExtractor: Send + Sync {
    async fn extract_entities(&self, text: &str) -> LancetResult<ExtractedEntities>;
}

/// External service extracting structured claims from a generated answer.
///
/// Returns the loosely-typed boundary form; strict validation happens in
/// [`crate::models::ClaimSet::from_raw`].
#[async_trait]
pub trait ClaimExtractor: Send + Sync {
    async fn extract_claims(&self, answer: &str, query: &str) -> LancetResult<RawClaimSet>;
}
