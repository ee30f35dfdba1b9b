//! Error types for company lookup operations.
//!
//! This module defines [`CorpError`] which covers all error cases that can
//! occur when fetching the registry feed, rebuilding the index, or answering
//! a search.

use thiserror::Error;

/// Errors that can occur during company lookup operations.
#[derive(Error, Debug)]
pub enum CorpError {
    /// Network/transport errors or a non-success status from the registry.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// The expected document is missing after extraction, or is malformed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The index store is unavailable, locked, or corrupt.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The caller supplied an empty or whitespace-only search term.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

/// Result type alias using [`CorpError`].
pub type Result<T> = std::result::Result<T, CorpError>;
