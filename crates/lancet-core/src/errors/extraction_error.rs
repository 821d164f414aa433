/// Errors from the external NLU extraction and generation services.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("extraction service unavailable: {reason}")]
    ServiceUnavailable { reason: String },

    #[error("malformed service response: {reason}")]
    MalformedResponse { reason: String },

    #[error("extraction service credentials missing")]
    MissingCredentials,
}
