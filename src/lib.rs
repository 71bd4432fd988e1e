/**
 * Pattern Auth
 * Freehand pattern authentication
 *
 * The core is a gesture similarity engine: two timed point sequences are
 * normalized into a common frame, aligned proportionally over a bounded
 * number of samples, and scored 0..=100 against a caller-chosen threshold.
 * A behavioral extractor reports speed and stroke statistics for display.
 * Around it sit an in-memory credential store, the enrollment/login flow and
 * an axum server.
 */

pub mod alignment;
pub mod auth;
pub mod behavior;
pub mod config;
pub mod credentials;
pub mod error;
pub mod gesture;
pub mod normalizer;
pub mod pattern;
pub mod scorer;
pub mod server;

pub use behavior::{analyze_drawing_behavior, BehavioralProfile};
pub use config::{EngineConfig, ServerConfig};
pub use credentials::sequences_equal;
pub use error::{AuthError, GestureError};
pub use gesture::{Gesture, GestureRecord, NormalizedGesture, Point};
pub use pattern::PatternService;
pub use scorer::{compare_patterns, ComparisonDetails, ComparisonResult};
