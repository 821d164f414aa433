/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("vector search failed: {reason}")]
    SearchFailed { reason: String },

    #[error("graph store unavailable: {reason}")]
    GraphUnavailable { reason: String },

    #[error("query embedding failed: {reason}")]
    EmbeddingFailed { reason: String },
}
