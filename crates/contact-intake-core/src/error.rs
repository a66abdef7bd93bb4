//! Error types for contact intake operations

use thiserror::Error;

use crate::storage::StorageError;
use crate::validation::ValidationReport;

/// Errors produced while handling a contact submission
#[derive(Error, Debug)]
pub enum ContactError {
    /// The payload failed schema validation; nothing was stored
    #[error(transparent)]
    Validation(#[from] ValidationReport),

    /// The storage collaborator failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ContactError {
    /// Check if the caller can fix this by changing the input
    pub fn is_user_error(&self) -> bool {
        matches!(self, ContactError::Validation(_))
    }
}

/// Result type alias for intake operations
pub type Result<T> = std::result::Result<T, ContactError>;
