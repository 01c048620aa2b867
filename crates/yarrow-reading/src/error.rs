//! Error types for reading assembly.

use thiserror::Error;

use yarrow_cast::CastError;

/// Alias for `Result<T, ReadingError>`.
pub type ReadingResult<T> = Result<T, ReadingError>;

/// Errors that can occur while assembling or reconstructing a reading.
#[derive(Debug, Error)]
pub enum ReadingError {
    /// A cast was requested with an empty question.
    #[error("question must not be empty")]
    EmptyQuestion,

    /// A stored reading did not contain exactly six lines.
    #[error("stored reading has {0} lines, expected 6")]
    WrongLineCount(usize),

    /// Stored line positions do not cover 1-6 exactly once.
    #[error("stored line positions must cover 1-6 exactly once")]
    BadPositions,

    /// Structurally invalid stored values.
    #[error(transparent)]
    Cast(#[from] CastError),
}
