//! Per-request value objects flowing through the pipeline.
//!
//! Everything here is transient: created for one query, never shared mutably
//! across requests, and re-scored into new records rather than mutated.

mod abstention;
mod aggregated;
mod assessment;
mod claim;
mod confidence_report;
mod entities;
mod graph_context;
mod hallucination;
mod retrieved_item;
mod subquery_plan;
mod verification_report;

pub use abstention::AbstentionDecision;
pub use aggregated::AggregatedResult;
pub use assessment::AnswerAssessment;
pub use claim::{
    AnatomyClaim, AnatomyRelation, Claim, ClaimCategory, ClaimDefect, ClaimSet, ComplicationClaim,
    InstrumentClaim, RawClaimSet, StepOrderClaim, StepRelation,
};
pub use confidence_report::{ComponentScore, ConfidenceLevel, ConfidenceReport};
pub use entities::ExtractedEntities;
pub use graph_context::{ProcedureContext, RelatedProcedure};
pub use hallucination::{
    HallucinationAnalysis, HallucinationRecord, HallucinationType, Severity, SeverityCounts,
    TaxonomyCategory,
};
pub use retrieved_item::{ItemMetadata, RetrievedItem, SourceModality};
pub use subquery_plan::SubqueryPlan;
pub use verification_report::{FailureReason, VerificationOutcome, VerificationReport};
