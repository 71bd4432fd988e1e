/**
 * Behavioral Features
 * Speed, duration and pen-lift segmentation of a single drawing, derived
 * from its timestamps. Informational only: nothing here feeds the match decision.
 */

use serde::{Deserialize, Serialize};

use crate::gesture::Point;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehavioralProfile {
    /// Mean per-segment speed in pixels per millisecond, two decimals.
    pub avg_speed: f64,
    /// Milliseconds between the first and last sample.
    pub total_time: u64,
    pub stroke_count: usize,
    pub point_count: usize,
}

/// Speed of each consecutive segment. Zero-duration segments count as 0.
pub fn segment_speeds(points: &[Point], timestamps: &[u64]) -> Vec<f64> {
    points
        .windows(2)
        .zip(timestamps.windows(2))
        .map(|(p, t)| {
            let elapsed = t[1].saturating_sub(t[0]);
            if elapsed > 0 {
                p[0].distance(&p[1]) / elapsed as f64
            } else {
                0.0
            }
        })
        .collect()
}

/// Counts strokes, starting a new one after every gap longer than `pause_ms`.
pub fn count_strokes(timestamps: &[u64], pause_ms: u64) -> usize {
    1 + timestamps
        .windows(2)
        .filter(|t| t[1].saturating_sub(t[0]) > pause_ms)
        .count()
}

/// Returns `None` when fewer than two points are available, or when the point
/// and timestamp lists differ in length.
pub fn analyze_drawing_behavior(
    points: &[Point],
    timestamps: &[u64],
    pause_ms: u64,
) -> Option<BehavioralProfile> {
    if points.len() < 2 || points.len() != timestamps.len() {
        return None;
    }

    let speeds = segment_speeds(points, timestamps);
    let avg_speed = if speeds.is_empty() {
        0.0
    } else {
        speeds.iter().sum::<f64>() / speeds.len() as f64
    };

    let total_time = match (timestamps.first(), timestamps.last()) {
        (Some(first), Some(last)) => last.saturating_sub(*first),
        _ => 0,
    };

    Some(BehavioralProfile {
        avg_speed: (avg_speed * 100.0).round() / 100.0,
        total_time,
        stroke_count: count_strokes(timestamps, pause_ms),
        point_count: points.len(),
    })
}
