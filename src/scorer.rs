/**
 * Scorer
 * Similarity scoring and the match decision
 */

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::alignment::accumulate_distance;
use crate::config::EngineConfig;
use crate::gesture::Gesture;
use crate::normalizer::normalize;

/// Diagnostics reported alongside every scored comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonDetails {
    /// Mean sampled distance, rounded.
    pub avg_distance: u32,
    /// Length penalty, rounded.
    pub length_penalty: u32,
    pub point_count_1: usize,
    pub point_count_2: usize,
    pub sample_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    /// 0..=100
    pub similarity: u8,
    pub is_match: bool,
    /// Absent only when an input gesture was missing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ComparisonDetails>,
}

impl ComparisonResult {
    pub fn rejected() -> Self {
        Self {
            similarity: 0,
            is_match: false,
            details: None,
        }
    }
}

/// Compares a candidate drawing against a reference.
///
/// A match requires the similarity to be strictly above `threshold`. Missing
/// gestures yield a zero-similarity rejection rather than an error.
pub fn compare_patterns(
    reference: &Gesture,
    candidate: &Gesture,
    threshold: f64,
    config: &EngineConfig,
) -> ComparisonResult {
    let (Some(a), Some(b)) = (reference.as_record(), candidate.as_record()) else {
        debug!("Comparison skipped: missing gesture");
        return ComparisonResult::rejected();
    };
    // Present records hold at least one point (see `GestureRecord::new`).
    let norm_a = normalize(a.points(), config.canonical_extent);
    let norm_b = normalize(b.points(), config.canonical_extent);

    let (len_a, len_b) = (norm_a.len(), norm_b.len());
    let max_len = len_a.max(len_b);
    let length_penalty =
        len_a.abs_diff(len_b) as f64 / max_len as f64 * config.length_penalty_weight;

    let acc = accumulate_distance(
        &norm_a,
        &norm_b,
        config.sample_target,
        config.missing_sample_distance,
    );

    let similarity = (100.0 - acc.avg_distance / config.distance_scale - length_penalty)
        .clamp(0.0, 100.0);
    let is_match = similarity > threshold;

    debug!(
        "Compared {} vs {} points: similarity={:.1} threshold={} match={}",
        len_a, len_b, similarity, threshold, is_match
    );

    ComparisonResult {
        similarity: similarity.round() as u8,
        is_match,
        details: Some(ComparisonDetails {
            avg_distance: acc.avg_distance.round() as u32,
            length_penalty: length_penalty.round() as u32,
            point_count_1: len_a,
            point_count_2: len_b,
            sample_count: acc.sample_count,
        }),
    }
}
