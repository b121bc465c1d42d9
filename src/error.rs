//! Error types for the puzzle core and its configuration.

use thiserror::Error;

/// Errors raised by the puzzle core.
///
/// Malformed input is rejected at the boundary. `NoSolutionFound` is a
/// normal outcome that callers are expected to branch on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("unsupported grid size {size} (expected {min}..={max})")]
    InvalidConfiguration { size: usize, min: usize, max: usize },

    #[error("invalid puzzle state: {0}")]
    InvalidState(String),

    #[error("grid size mismatch: {left}x{left} vs {right}x{right}")]
    SizeMismatch { left: usize, right: usize },

    #[error("no solution found")]
    NoSolutionFound,

    #[error("search gave up after {expanded} expansions")]
    SearchLimitExceeded { expanded: usize },

    #[error("search was cancelled")]
    Cancelled,
}

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
