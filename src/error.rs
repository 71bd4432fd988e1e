/**
 * Error types
 * The similarity engine itself never fails; these cover capture validation
 * and the authentication flow built around it.
 */

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GestureError {
    #[error("gesture has no points")]
    Empty,
    #[error("gesture has {points} points but {timestamps} timestamps")]
    LengthMismatch { points: usize, timestamps: usize },
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User already exists")]
    UserExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Pattern doesn't match. Similarity: {similarity}%")]
    PatternMismatch { similarity: u8 },
    #[error("Confirmation pattern doesn't match. Similarity: {similarity}%")]
    ConfirmationMismatch { similarity: u8 },
    #[error("Symbol authentication failed")]
    SymbolMismatch,
    #[error("Expected {expected} symbols, got {got}")]
    InvalidSymbols { expected: usize, got: usize },
    #[error("Username must be at least {min} characters")]
    UsernameTooShort { min: usize },
    #[error("Pattern needs at least {min} points, got {got}")]
    TooFewPoints { min: usize, got: usize },
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] GestureError),
}
