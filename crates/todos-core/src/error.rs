//! Error types for todo store operations.
//!
//! Absence is not an error: `load_todo_list`/`load_todo` signal a missing or
//! out-of-scope entity with `Ok(None)`, and a failed credential check is a
//! normal `Ok(false)`. Only genuine faults surface through `TodoError`.

use thiserror::Error;

/// Result type alias for todo store operations.
pub type Result<T> = std::result::Result<T, TodoError>;

/// Core error type for todo store operations.
#[derive(Debug, Error)]
pub enum TodoError {
    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Password hashing or hash-parsing error
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Invalid user input
    #[error("Validation error: {0}")]
    Validation(String),
}
