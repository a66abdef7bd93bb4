//! Storage contract for contact submissions
//!
//! The intake path only talks to storage through [`ContactStorage`], so the
//! backend is chosen by whoever builds the service and can be swapped for a
//! fake in tests.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{ContactSubmission, NewContactSubmission};

/// Errors raised by a storage backend
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backend cannot be reached or is not open
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// A record could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend reported a failure
    #[error("Backend error during {operation}: {message}")]
    Backend { operation: String, message: String },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StorageError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        StorageError::Unavailable(msg.into())
    }

    pub fn backend(operation: impl Into<String>, message: impl ToString) -> Self {
        StorageError::Backend {
            operation: operation.into(),
            message: message.to_string(),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence boundary for contact submissions
///
/// Implementations assign `id` and `createdAt` on create. Ids must be unique
/// and timestamps must increase with insertion order; the intake path does
/// not add any coordination of its own. Failures must be returned, never
/// dropped silently.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactStorage: Send + Sync {
    /// Short backend name, reported by health checks
    fn backend(&self) -> &'static str;

    /// Persist a validated submission and return the stored record
    async fn create_contact_submission(
        &self,
        input: NewContactSubmission,
    ) -> StorageResult<ContactSubmission>;

    /// All stored submissions in insertion order
    async fn get_contact_submissions(&self) -> StorageResult<Vec<ContactSubmission>>;

    /// Check that the backend can serve requests
    async fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }
}
