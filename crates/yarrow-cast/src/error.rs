//! Error types for the casting engine.

use thiserror::Error;

/// Alias for `Result<T, CastError>`.
pub type CastResult<T> = Result<T, CastError>;

/// Errors that indicate structurally invalid casting data.
///
/// These only arise when raw values from outside the engine (stored line
/// records, pattern strings, hexagram numbers) fail validation. Values
/// produced by the engine itself are valid by construction.
#[derive(Debug, Error)]
pub enum CastError {
    /// A toss sum outside {6, 7, 8, 9}.
    #[error("invalid toss sum: {0} (three coins of weight 2 or 3 total 6-9)")]
    InvalidSum(u32),

    /// A line position outside 1-6.
    #[error("invalid line position: {0} (lines run 1-6, bottom to top)")]
    InvalidPosition(u32),

    /// A pattern string that is not six binary digits.
    #[error("invalid line pattern: \"{0}\"")]
    InvalidPattern(String),

    /// A hexagram number outside 1-64.
    #[error("invalid hexagram number: {0}")]
    InvalidNumber(u32),
}
