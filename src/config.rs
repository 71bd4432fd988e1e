/**
 * Configuration
 * Engine tolerances and server settings, read from the environment
 */

use std::str::FromStr;
use tracing::warn;

/// Tunables for the similarity engine and the behavioral extractor.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Upper bound on point pairs sampled per comparison.
    pub sample_target: usize,
    /// Maximum similarity deducted for differing point counts.
    pub length_penalty_weight: f64,
    /// Divisor applied to the mean sampled distance.
    pub distance_scale: f64,
    /// Side length of the normalized bounding frame.
    pub canonical_extent: f64,
    /// Mean distance reported when nothing could be sampled.
    pub missing_sample_distance: f64,
    /// A timestamp gap longer than this starts a new stroke.
    pub stroke_pause_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_target: 20,
            length_penalty_weight: 20.0,
            distance_scale: 2.0,
            canonical_extent: 100.0,
            missing_sample_distance: 100.0,
            stroke_pause_ms: 300,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            sample_target: env_or("PATTERN_SAMPLE_TARGET", defaults.sample_target).max(1),
            length_penalty_weight: env_checked(
                "PATTERN_LENGTH_PENALTY",
                defaults.length_penalty_weight,
                is_non_negative,
            ),
            distance_scale: env_checked(
                "PATTERN_DISTANCE_SCALE",
                defaults.distance_scale,
                is_positive,
            ),
            stroke_pause_ms: env_or("PATTERN_STROKE_PAUSE_MS", defaults.stroke_pause_ms),
            ..defaults
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Threshold for the pattern-only check that precedes symbol entry.
    pub pattern_check_threshold: f64,
    pub login_threshold: f64,
    /// Threshold for matching an enrollment drawing against its confirmation.
    pub confirmation_threshold: f64,
    pub symbol_count: usize,
    pub min_username_len: usize,
    pub min_enrollment_points: usize,
    pub min_login_points: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            pattern_check_threshold: 50.0,
            login_threshold: 60.0,
            confirmation_threshold: 60.0,
            symbol_count: 3,
            min_username_len: 3,
            min_enrollment_points: 5,
            min_login_points: 3,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            pattern_check_threshold: env_or("PATTERN_CHECK_THRESHOLD", defaults.pattern_check_threshold),
            login_threshold: env_or("LOGIN_THRESHOLD", defaults.login_threshold),
            confirmation_threshold: env_or("CONFIRMATION_THRESHOLD", defaults.confirmation_threshold),
            symbol_count: env_or("SYMBOL_COUNT", defaults.symbol_count),
            min_username_len: env_or("MIN_USERNAME_LEN", defaults.min_username_len),
            min_enrollment_points: env_or("MIN_ENROLLMENT_POINTS", defaults.min_enrollment_points),
            min_login_points: env_or("MIN_LOGIN_POINTS", defaults.min_login_points),
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => parse_or(key, &raw, default),
        Err(_) => default,
    }
}

fn parse_or<T: FromStr>(key: &str, raw: &str, default: T) -> T {
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!("Ignoring unparsable {}={:?}, using default", key, raw);
            default
        }
    }
}

fn env_checked(key: &str, default: f64, valid: fn(f64) -> bool) -> f64 {
    match std::env::var(key) {
        Ok(raw) => parse_checked(key, &raw, default, valid),
        Err(_) => default,
    }
}

fn parse_checked(key: &str, raw: &str, default: f64, valid: fn(f64) -> bool) -> f64 {
    let value = parse_or(key, raw, default);
    if valid(value) {
        value
    } else {
        warn!("Ignoring out-of-range {}={:?}, using default", key, raw);
        default
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.sample_target, 20);
        assert_eq!(config.length_penalty_weight, 20.0);
        assert_eq!(config.distance_scale, 2.0);
        assert_eq!(config.stroke_pause_ms, 300);
    }

    #[test]
    fn test_parse_or_falls_back() {
        assert_eq!(parse_or("X", "42", 7usize), 42);
        assert_eq!(parse_or("X", " 1.5 ", 0.0f64), 1.5);
        assert_eq!(parse_or("X", "lots", 7usize), 7);
    }

    #[test]
    fn test_distance_scale_must_be_positive() {
        let check = |raw| parse_checked("PATTERN_DISTANCE_SCALE", raw, 2.0, is_positive);
        assert_eq!(check("4"), 4.0);
        assert_eq!(check("0"), 2.0);
        assert_eq!(check("-1.5"), 2.0);
        assert_eq!(check("NaN"), 2.0);
        assert_eq!(check("inf"), 2.0);
        assert_eq!(check("wide"), 2.0);
    }

    #[test]
    fn test_length_penalty_may_be_zero_but_not_negative() {
        let check = |raw| parse_checked("PATTERN_LENGTH_PENALTY", raw, 20.0, is_non_negative);
        assert_eq!(check("0"), 0.0);
        assert_eq!(check("35"), 35.0);
        assert_eq!(check("-5"), 20.0);
        assert_eq!(check("-inf"), 20.0);
    }

    #[test]
    fn test_server_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.min_username_len, 3);
        assert_eq!(config.min_enrollment_points, 5);
        assert_eq!(config.min_login_points, 3);
        assert_eq!(config.symbol_count, 3);
    }
}
