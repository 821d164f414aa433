//! Pure scoring policy shared across components.
//!
//! Weight normalization, the multi-hit boost, severity penalties, and
//! confidence bucketing are policy decisions that several components apply;
//! they live here once so they stay tunable and auditable.

use crate::constants::VALID_SCORE_FLOOR;
use crate::models::{ConfidenceLevel, Severity, SeverityCounts};

/// Normalize weights so they sum to exactly 1.
///
/// A non-positive sum (all zeros, or negatives cancelling) degrades to a
/// uniform split instead of dividing by zero.
pub fn normalize_weights(weights: &[f64]) -> Vec<f64> {
    let sum: f64 = weights.iter().sum();
    if sum <= 0.0 {
        let uniform = 1.0 / weights.len().max(1) as f64;
        return vec![uniform; weights.len()];
    }
    weights.iter().map(|w| w / sum).collect()
}

/// Relevance of a graph node by traversal distance: 1/(1+d).
/// An exact match (distance 0) scores 1.0.
pub fn graph_distance_score(distance: usize) -> f64 {
    1.0 / (1.0 + distance as f64)
}

/// Score multiplier for an item retrieved by `hit_count` sub-queries.
///
/// `1 + per_hit·(hits−1)`, capped at `cap` so repeated hits cannot amplify a
/// score without bound.
pub fn hit_count_boost(hit_count: usize, per_hit: f64, cap: f64) -> f64 {
    let boost = 1.0 + per_hit * hit_count.saturating_sub(1) as f64;
    boost.min(cap)
}

/// Mean of valid similarity scores, clamped to [0, 1].
///
/// Sentinel "no match" scores (at or below the floor) are excluded entirely,
/// never averaged in as zeros. No valid scores means 0.0.
pub fn mean_valid_scores(scores: &[f64]) -> f64 {
    let valid: Vec<f64> = scores
        .iter()
        .copied()
        .filter(|s| *s > VALID_SCORE_FLOOR)
        .collect();
    if valid.is_empty() {
        return 0.0;
    }
    let mean = valid.iter().sum::<f64>() / valid.len() as f64;
    mean.clamp(0.0, 1.0)
}

/// Population variance of the given scores.
pub fn score_variance(scores: &[f64]) -> f64 {
    if scores.len() < 2 {
        return 0.0;
    }
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / scores.len() as f64
}

/// Bucket a composite score into a coarse confidence level.
pub fn confidence_level(score: f64) -> ConfidenceLevel {
    if score >= 0.80 {
        ConfidenceLevel::High
    } else if score >= 0.50 {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}

/// Severity-weighted safety score in [0, 1]; 1.0 when nothing was flagged.
///
/// `1 − Σ weight·count / total`, where the denominator is the all-critical
/// worst case. Strictly decreasing as critical count rises, all else fixed.
pub fn safety_score(counts: &SeverityCounts) -> f64 {
    let total = counts.total();
    if total == 0 {
        return 1.0;
    }
    let penalty = counts.critical as f64 * Severity::Critical.weight()
        + counts.high as f64 * Severity::High.weight()
        + counts.medium as f64 * Severity::Medium.weight()
        + counts.low as f64 * Severity::Low.weight();
    // Worst case: every flagged entry critical.
    let max_penalty = total as f64 * Severity::Critical.weight();
    (1.0 - penalty / max_penalty).clamp(0.0, 1.0)
}

/// Content fingerprint for dedup: blake3 over the case-folded, trimmed first
/// `prefix_len` characters. Later items with an equal fingerprint are
/// duplicates and get dropped, keeping dedup O(n).
pub fn content_fingerprint(text: &str, prefix_len: usize) -> String {
    let folded: String = text
        .trim()
        .chars()
        .take(prefix_len)
        .collect::<String>()
        .to_lowercase();
    blake3::hash(folded.as_bytes()).to_hex().to_string()
}
