/**
 * Pattern Service
 * Stateless entry point to the gesture similarity engine
 */

use crate::behavior::{analyze_drawing_behavior, BehavioralProfile};
use crate::config::EngineConfig;
use crate::gesture::{Gesture, Point};
use crate::scorer::{compare_patterns, ComparisonResult};

/// Holds only the tolerances; every call works on its own arguments, so a
/// single instance can be shared across concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct PatternService {
    config: EngineConfig,
}

impl PatternService {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn compare(
        &self,
        reference: &Gesture,
        candidate: &Gesture,
        threshold: f64,
    ) -> ComparisonResult {
        compare_patterns(reference, candidate, threshold, &self.config)
    }

    pub fn analyze(&self, points: &[Point], timestamps: &[u64]) -> Option<BehavioralProfile> {
        analyze_drawing_behavior(points, timestamps, self.config.stroke_pause_ms)
    }
}
