use async_trait::async_trait;

use crate::errors::LancetResult;

/// External text-generation service.
///
/// Both operations are optional enhancements with defined fallbacks: a failed
/// decomposition degrades to the original query, and answer generation is
/// upstream of this core (only its output enters here, for verification).
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Break a complex query into 2–4 ordered, self-contained sub-questions.
    async fn decompose(&self, query: &str) -> LancetResult<Vec<String>>;

    /// Draft an answer from retrieved context passages.
    async fn generate_answer(&self, query: &str, contexts: &[String]) -> LancetResult<String>;
}
