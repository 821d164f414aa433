use serde::{Deserialize, Serialize};

/// Terminal verdict of one verification cycle: answer or refuse.
///
/// A normal, expected return value, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbstentionDecision {
    pub should_abstain: bool,
    /// Present exactly when abstaining.
    pub reason: Option<String>,
}

impl AbstentionDecision {
    pub fn answer() -> Self {
        Self {
            should_abstain: false,
            reason: None,
        }
    }

    pub fn abstain(reason: impl Into<String>) -> Self {
        Self {
            should_abstain: true,
            reason: Some(reason.into()),
        }
    }
}
