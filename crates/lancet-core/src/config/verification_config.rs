use serde::{Deserialize, Serialize};

use super::defaults;

/// Abstention policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AbstentionConfig {
    /// Minimum verification score to answer. Exclusive on the low side:
    /// a score equal to the threshold answers.
    pub threshold: f64,
    /// Disable only for offline evaluation runs.
    pub enabled: bool,
}

impl Default for AbstentionConfig {
    fn default() -> Self {
        Self {
            threshold: defaults::DEFAULT_ABSTENTION_THRESHOLD,
            enabled: true,
        }
    }
}

/// Timeout and retry policy for every external call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteCallConfig {
    /// Per-call deadline. A timeout is a recoverable failure of that one
    /// call, never of the pipeline.
    pub call_timeout_ms: u64,
    /// Total attempts (first try included) for vector and graph queries.
    pub store_attempts: u32,
    /// Total attempts for generation-service calls: at most one retry.
    pub generation_attempts: u32,
    /// Base delay for exponential backoff between attempts.
    pub retry_base_delay_ms: u64,
}

impl Default for RemoteCallConfig {
    fn default() -> Self {
        Self {
            call_timeout_ms: defaults::DEFAULT_CALL_TIMEOUT_MS,
            store_attempts: defaults::DEFAULT_STORE_ATTEMPTS,
            generation_attempts: defaults::DEFAULT_GENERATION_ATTEMPTS,
            retry_base_delay_ms: defaults::DEFAULT_RETRY_BASE_DELAY_MS,
        }
    }
}
