//! Bounded timeout/retry wrapper for external calls.
//!
//! Every call out of the pipeline (vector search, graph query, NLU service)
//! runs under a per-call deadline. Store calls get a small retry budget with
//! exponential backoff; generation calls get at most one retry. Nothing here
//! retries indefinitely, and callers treat an exhausted budget as a
//! recoverable failure of that one call.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::config::RemoteCallConfig;
use crate::errors::{LancetError, LancetResult};

/// Timeout + retry policy for one class of external call.
#[derive(Debug, Clone)]
pub struct RemotePolicy {
    timeout: Duration,
    attempts: u32,
    base_delay: Duration,
}

impl RemotePolicy {
    /// Policy for vector and graph store queries.
    pub fn store(config: &RemoteCallConfig) -> Self {
        Self {
            timeout: Duration::from_millis(config.call_timeout_ms),
            attempts: config.store_attempts.max(1),
            base_delay: Duration::from_millis(config.retry_base_delay_ms),
        }
    }

    /// Policy for extraction/decomposition/generation service calls.
    pub fn generation(config: &RemoteCallConfig) -> Self {
        Self {
            timeout: Duration::from_millis(config.call_timeout_ms),
            attempts: config.generation_attempts.max(1),
            base_delay: Duration::from_millis(config.retry_base_delay_ms),
        }
    }

    /// Run `call` under the policy, returning the last error once the
    /// attempt budget is exhausted.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut call: F) -> LancetResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = LancetResult<T>>,
    {
        let mut last_error = None;
        for attempt in 1..=self.attempts {
            match tokio::time::timeout(self.timeout, call()).await {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(e)) => {
                    warn!(operation, attempt, error = %e, "remote call failed");
                    last_error = Some(e);
                }
                Err(_) => {
                    warn!(operation, attempt, timeout_ms = self.timeout.as_millis() as u64, "remote call timed out");
                    last_error = Some(LancetError::Timeout {
                        operation: operation.to_string(),
                        elapsed_ms: self.timeout.as_millis() as u64,
                    });
                }
            }
            if attempt < self.attempts {
                tokio::time::sleep(self.base_delay * 2u32.saturating_pow(attempt - 1)).await;
            }
        }
        Err(last_error.unwrap_or(LancetError::Timeout {
            operation: operation.to_string(),
            elapsed_ms: self.timeout.as_millis() as u64,
        }))
    }
}
