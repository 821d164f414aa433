//! # lancet-verification
//!
//! The safety half of the pipeline: extract structured claims from a
//! generated answer, check each one against the knowledge graph, classify
//! what failed onto the hallucination taxonomy, and decide whether the
//! answer is safe to surface at all.

pub mod abstention;
pub mod claims;
pub mod engine;
pub mod report;
pub mod taxonomy;
pub mod verifier;

pub use abstention::AbstentionPolicy;
pub use claims::ClaimBoundary;
pub use engine::VerificationEngine;
pub use verifier::GraphVerifier;
