//! Collaborator seams.
//!
//! The vector index, knowledge graph, and NLU services are owned outside this
//! core. Components receive them as injected trait objects so tests can
//! substitute in-memory fakes; nothing here is an ambient singleton.

mod embedding;
mod extraction;
mod generation;
mod graph_store;
mod vector_index;

pub use embedding::EmbeddingProvider;
pub use extraction::{ClaimExtractor, EntityExtractor};
pub use generation::TextGenerator;
pub use graph_store::{GraphMatch, GraphPattern, GraphStore, NodeType, RelationType};
pub use vector_index::{VectorHit, VectorIndex};
