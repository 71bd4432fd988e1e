/**
 * Normalizer
 * Translates a stroke so its bounding box starts at the origin and scales it
 * uniformly so the longer side spans the canonical extent
 */

use crate::gesture::{NormalizedGesture, Point};

/// Normalizes `points` into a frame of side `extent`.
///
/// All-identical input (zero width and zero height) is returned untouched.
pub fn normalize(points: &[Point], extent: f64) -> NormalizedGesture {
    let Some(first) = points.first() else {
        return NormalizedGesture { points: Vec::new() };
    };

    let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    let width = max_x - min_x;
    let height = max_y - min_y;

    if width == 0.0 && height == 0.0 {
        return NormalizedGesture {
            points: points.to_vec(),
        };
    }

    // Sides shorter than one unit scale as if one unit long.
    let scale = extent / width.max(height).max(1.0);

    NormalizedGesture {
        points: points
            .iter()
            .map(|p| Point::new((p.x - min_x) * scale, (p.y - min_y) * scale))
            .collect(),
    }
}
