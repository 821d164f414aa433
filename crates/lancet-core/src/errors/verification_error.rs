/// Verification subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("graph verification query failed: {reason}")]
    GraphQueryFailed { reason: String },
}
