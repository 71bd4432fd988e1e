/**
 * Alignment
 * Proportional alignment and distance accumulation
 *
 * Two normalized gestures of different lengths are walked in step over the
 * shorter one's index range. Each sample position `i` maps linearly onto both
 * sequences (`i * len / min_len`), and the Euclidean distances between the
 * mapped points are averaged.
 *
 * This is a linear re-parameterization, not dynamic time warping: it assumes
 * both strokes progress through their shape at about the same relative pace.
 * The stride keeps the visited pairs near `sample_target` for long strokes.
 */

use crate::gesture::NormalizedGesture;

/// Outcome of walking two gestures in step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accumulation {
    pub avg_distance: f64,
    pub sample_count: usize,
}

/// Step between sample positions for a shorter gesture of `min_len` points.
pub fn sample_stride(min_len: usize, sample_target: usize) -> usize {
    (min_len / sample_target.max(1)).max(1)
}

/// Index pairs visited when aligning gestures of `len_a` and `len_b` points.
pub fn sample_indices(
    len_a: usize,
    len_b: usize,
    sample_target: usize,
) -> impl Iterator<Item = (usize, usize)> {
    let min_len = len_a.min(len_b);
    let stride = sample_stride(min_len, sample_target);
    (0..min_len)
        .step_by(stride)
        .map(move |i| (i * len_a / min_len, i * len_b / min_len))
}

/// Average distance between proportionally aligned samples of `a` and `b`.
///
/// When no pair can be sampled (either side empty) the mean is reported as
/// `missing_distance`.
pub fn accumulate_distance(
    a: &NormalizedGesture,
    b: &NormalizedGesture,
    sample_target: usize,
    missing_distance: f64,
) -> Accumulation {
    let (pa, pb) = (a.points(), b.points());

    let mut total = 0.0;
    let mut sample_count = 0;
    for (idx_a, idx_b) in sample_indices(pa.len(), pb.len(), sample_target) {
        total += pa[idx_a].distance(&pb[idx_b]);
        sample_count += 1;
    }

    let avg_distance = if sample_count > 0 {
        total / sample_count as f64
    } else {
        missing_distance
    };

    Accumulation {
        avg_distance,
        sample_count,
    }
}
