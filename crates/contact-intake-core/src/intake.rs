//! Contact intake orchestration
//!
//! Validates one inbound payload and hands the normalized input to storage.
//! A submission is either fully validated and stored or not stored at all.

use serde_json::Value;
use std::sync::Arc;

use crate::error::Result;
use crate::model::ContactSubmission;
use crate::storage::ContactStorage;
use crate::validation::ContactSchema;

/// Create and read paths for contact submissions
///
/// Holds no mutable state of its own; cloning shares the same storage.
#[derive(Clone)]
pub struct ContactIntake {
    storage: Arc<dyn ContactStorage>,
    schema: Arc<ContactSchema>,
}

impl ContactIntake {
    /// Create an intake over the given storage with the default schema
    pub fn new(storage: Arc<dyn ContactStorage>) -> Self {
        Self::with_schema(storage, ContactSchema::default())
    }

    pub fn with_schema(storage: Arc<dyn ContactStorage>, schema: ContactSchema) -> Self {
        Self {
            storage,
            schema: Arc::new(schema),
        }
    }

    pub fn storage(&self) -> &Arc<dyn ContactStorage> {
        &self.storage
    }

    /// Validate and persist a submission
    ///
    /// Storage is not called when validation fails. Storage failures are
    /// logged and returned without retry.
    pub async fn submit(&self, payload: &Value) -> Result<ContactSubmission> {
        let input = self.schema.validate(payload).map_err(|report| {
            tracing::debug!(
                finding_count = report.len(),
                report = %report,
                "Contact submission rejected"
            );
            report
        })?;

        let record = self
            .storage
            .create_contact_submission(input)
            .await
            .map_err(|err| {
                tracing::error!(
                    backend = self.storage.backend(),
                    error = %err,
                    "Error creating contact submission"
                );
                err
            })?;

        tracing::info!(id = %record.id, "Contact submission stored");
        Ok(record)
    }

    /// All stored submissions
    pub async fn list(&self) -> Result<Vec<ContactSubmission>> {
        let records = self.storage.get_contact_submissions().await.map_err(|err| {
            tracing::error!(
                backend = self.storage.backend(),
                error = %err,
                "Error fetching contact submissions"
            );
            err
        })?;

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContactError;
    use crate::storage::{MockContactStorage, StorageError};
    use crate::MemoryStorage;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn mock_storage() -> MockContactStorage {
        let mut storage = MockContactStorage::new();
        storage.expect_backend().return_const("mock");
        storage
    }

    #[tokio::test]
    async fn test_invalid_payload_never_reaches_storage() {
        let mut storage = mock_storage();
        storage.expect_create_contact_submission().never();

        let intake = ContactIntake::new(Arc::new(storage));
        let payloads = [
            json!({"name": "A", "email": "al@x.com", "message": "Hello there friend"}),
            json!({"name": "Al", "email": "not-an-email", "message": "Hello there friend"}),
            json!({"name": "Al", "email": "al@x.com", "message": "short"}),
            json!("not an object"),
        ];

        for payload in &payloads {
            let err = intake.submit(payload).await.unwrap_err();
            assert!(matches!(err, ContactError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_valid_payload_passes_normalized_input() {
        let mut storage = mock_storage();
        storage
            .expect_create_contact_submission()
            .withf(|input| input.name == "Al" && input.company.is_none())
            .times(1)
            .returning(|input| Ok(input.into_record(Uuid::new_v4(), Utc::now())));

        let intake = ContactIntake::new(Arc::new(storage));
        let record = intake
            .submit(&json!({
                "name": "Al",
                "email": "al@x.com",
                "message": "Hello there friend",
                "createdAt": "1999-01-01T00:00:00Z"
            }))
            .await
            .unwrap();

        assert_eq!(record.email, "al@x.com");
        assert!(record.created_at.timestamp() > 946_684_800);
    }

    #[tokio::test]
    async fn test_storage_failure_is_surfaced() {
        let mut storage = mock_storage();
        storage
            .expect_create_contact_submission()
            .times(1)
            .returning(|_| Err(StorageError::unavailable("connection refused")));

        let intake = ContactIntake::new(Arc::new(storage));
        let err = intake
            .submit(&json!({
                "name": "Al",
                "email": "al@x.com",
                "message": "Hello there friend"
            }))
            .await
            .unwrap_err();

        assert!(matches!(err, ContactError::Storage(StorageError::Unavailable(_))));
        assert!(!err.is_user_error());
    }

    #[tokio::test]
    async fn test_list_failure_is_surfaced() {
        let mut storage = mock_storage();
        storage
            .expect_get_contact_submissions()
            .returning(|| Err(StorageError::backend("scan", "corrupt page")));

        let intake = ContactIntake::new(Arc::new(storage));
        assert!(matches!(
            intake.list().await.unwrap_err(),
            ContactError::Storage(_)
        ));
    }

    #[tokio::test]
    async fn test_submit_then_list_round_trip() {
        let intake = ContactIntake::new(Arc::new(MemoryStorage::new()));
        let payload = json!({
            "name": "Al",
            "email": "al@x.com",
            "company": "Acme",
            "message": "Hello there friend"
        });

        let first = intake.submit(&payload).await.unwrap();
        let second = intake.submit(&payload).await.unwrap();
        assert_ne!(first.id, second.id);

        let listed = intake.list().await.unwrap();
        assert_eq!(listed, vec![first, second]);
    }
}
