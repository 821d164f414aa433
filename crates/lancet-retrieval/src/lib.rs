//! # lancet-retrieval
//!
//! The retrieval half of the pipeline: classify and decompose the query,
//! gather candidates from the vector index and the knowledge graph, fuse and
//! deduplicate them, aggregate across sub-queries, and score composite
//! confidence for the final context list.

pub mod confidence;
pub mod decompose;
pub mod engine;
pub mod hybrid;

pub use confidence::ConfidenceScorer;
pub use decompose::QueryDecomposer;
pub use engine::RetrievalEngine;
pub use hybrid::{HybridRetriever, RetrievalOptions};
