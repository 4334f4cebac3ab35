/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for administration and resolution operations
pub type PermissionResult<T> = Result<T, PermissionError>;

/// Result type for storage port operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage port errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum StoreError {
    #[error("Permission already exists for user {user_id} at path '{path}'")]
    #[diagnostic(
        code(store::conflict),
        help("A racing grant inserted the same (user, path) row. Re-read and retry the grant.")
    )]
    Conflict { user_id: String, path: String },

    #[error("Permission {0} not found")]
    #[diagnostic(
        code(store::not_found),
        help("The row may have been pruned or revoked concurrently.")
    )]
    NotFound(String),

    #[error("Storage backend failure: {0}")]
    #[diagnostic(
        code(store::backend),
        help("Check backend availability and retry the operation.")
    )]
    Backend(String),
}

/// Permission engine errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum PermissionError {
    #[error("Invalid document path: {reason}")]
    #[diagnostic(
        code(permission::invalid_path),
        help("Paths are non-empty segments joined by ' > '. Empty or whitespace-only segments are rejected.")
    )]
    InvalidPath { reason: String },

    #[error("Conflicting grant for user {user_id} at path '{path}'")]
    #[diagnostic(
        code(permission::conflict),
        help("Another grant for the same (user, path) won the race. Retry the whole grant.")
    )]
    Conflict { user_id: String, path: String },

    #[error("Storage failure: {0}")]
    #[diagnostic(code(permission::storage), help("The storage port reported a failure."))]
    Storage(String),
}

impl From<StoreError> for PermissionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { user_id, path } => PermissionError::Conflict { user_id, path },
            other => PermissionError::Storage(other.to_string()),
        }
    }
}
