//! # lancet-core
//!
//! Foundation crate for the Lancet answer-verification pipeline.
//! Defines all types, traits, errors, config, constants, and the pure
//! scoring policy shared by retrieval and verification.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod remote;
pub mod scoring;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::LancetConfig;
pub use errors::{LancetError, LancetResult};
pub use models::{
    AggregatedResult, AnswerAssessment, Claim, ClaimSet, ConfidenceReport, RetrievedItem,
    VerificationReport,
};
