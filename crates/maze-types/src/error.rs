// ─────────────────────────────────────────────────────────────────────
// Bicameral Maze — Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all Bicameral Maze failures.
///
/// Only construction and input validation are fallible. A running
/// decision cycle never fails: out-of-range numbers are clamped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MazeError {
    /// Invalid orchestrator configuration (gate mode, threshold, identity).
    #[error("config error: {0}")]
    Config(String),

    /// Invalid input value (stimulus field out of range).
    #[error("validation error: {0}")]
    Validation(String),

    /// Numerical error (NaN/Inf where a finite value is required).
    #[error("numerical error: {0}")]
    Numerical(String),
}

pub type MazeResult<T> = Result<T, MazeError>;
