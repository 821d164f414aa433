//! Claim extraction boundary.
//!
//! The extraction service is best-effort and its output is untrusted JSON.
//! Anything that fails here (the call, the shape of a record) degrades to
//! fewer claims, never to a pipeline error. Dropped records are the one case
//! logged as a defect rather than silently swallowed.

use std::sync::Arc;

use tracing::{debug, warn};

use lancet_core::config::RemoteCallConfig;
use lancet_core::models::ClaimSet;
use lancet_core::remote::RemotePolicy;
use lancet_core::traits::ClaimExtractor;

/// Drives the external claim extractor and validates its output strictly.
pub struct ClaimBoundary {
    extractor: Arc<dyn ClaimExtractor>,
    policy: RemotePolicy,
}

impl ClaimBoundary {
    pub fn new(extractor: Arc<dyn ClaimExtractor>, remote: &RemoteCallConfig) -> Self {
        Self {
            extractor,
            policy: RemotePolicy::generation(remote),
        }
    }

    /// Extract validated claims from an answer. Never errors: an unreachable
    /// service or a fully malformed payload yields an empty claim set.
    pub async fn extract(&self, answer: &str, query: &str) -> ClaimSet {
        let raw = match self
            .policy
            .run("extract_claims", || {
                self.extractor.extract_claims(answer, query)
            })
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "claim extraction failed, verifying zero claims");
                return ClaimSet::default();
            }
        };

        let (set, defects) = ClaimSet::from_raw(raw);
        for defect in &defects {
            warn!(
                category = ?defect.category,
                reason = %defect.reason,
                "dropping malformed claim record"
            );
        }
        debug!(
            claims = set.total(),
            dropped = defects.len(),
            "claim extraction complete"
        );
        set
    }
}
