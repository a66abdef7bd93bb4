//! Contact submission records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted contact submission
///
/// `id` and `created_at` are assigned by the storage layer when the record is
/// written and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// A submission that has passed validation and is ready to be stored
///
/// Only the validator builds these from request payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContactSubmission {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    pub message: String,
}

impl NewContactSubmission {
    /// Turn the input into a record with storage-assigned identity
    pub fn into_record(self, id: Uuid, created_at: DateTime<Utc>) -> ContactSubmission {
        ContactSubmission {
            id,
            name: self.name,
            email: self.email,
            company: self.company,
            message: self.message,
            created_at,
        }
    }
}
