//! In-memory fakes for every collaborator seam.
//!
//! The real vector index, knowledge graph, and NLU services live outside the
//! workspace; tests inject these doubles through the same traits to exercise
//! the pipeline deterministically and offline.

mod graph;
mod nlu;
mod vector;

pub use graph::InMemoryGraphStore;
pub use nlu::{ScriptedClaimExtractor, ScriptedDecomposer, StaticEntityExtractor};
pub use vector::{HashingEmbedder, InMemoryVectorIndex};

/// Install a fmt subscriber honoring `RUST_LOG`, for debugging test runs.
/// Safe to call from several tests; only the first call installs.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
