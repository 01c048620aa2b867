//! Error types for book storage.

use thiserror::Error;

/// Errors from a backing book store.
///
/// These never escape the resolver: a failed fetch degrades through the
/// fallback chain instead of propagating.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested book does not exist in this store.
    #[error("book not found: {0}")]
    NotFound(String),

    /// The store could not be reached or answered abnormally.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
