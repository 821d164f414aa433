//! Error types for every Lancet subsystem.
//!
//! External-call failures are recovered close to the call site with a
//! documented neutral default; these types exist for the seams where an
//! error still has to travel.

mod extraction_error;
mod retrieval_error;
mod verification_error;

pub use extraction_error::ExtractionError;
pub use retrieval_error::RetrievalError;
pub use verification_error::VerificationError;

/// Convenience alias used across the workspace.
pub type LancetResult<T> = Result<T, LancetError>;

/// Top-level error uniting all subsystems.
#[derive(Debug, thiserror::Error)]
pub enum LancetError {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error("{operation} timed out after {elapsed_ms}ms")]
    Timeout { operation: String, elapsed_ms: u64 },

    #[error("invalid configuration: {reason}")]
    Config { reason: String },
}
