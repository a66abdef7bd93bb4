//! In-memory storage
//!
//! Keeps records in a vector behind an async lock. Data is lost on restart;
//! intended for development and tests.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ContactStorage, StorageResult};
use crate::clock::MonotonicClock;
use crate::model::{ContactSubmission, NewContactSubmission};

#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: RwLock<Vec<ContactSubmission>>,
    clock: MonotonicClock,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ContactStorage for MemoryStorage {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn create_contact_submission(
        &self,
        input: NewContactSubmission,
    ) -> StorageResult<ContactSubmission> {
        let mut records = self.records.write().await;

        // Assigned under the write lock so push order matches timestamp order.
        let record = input.into_record(Uuid::new_v4(), self.clock.now());

        records.push(record.clone());
        Ok(record)
    }

    async fn get_contact_submissions(&self) -> StorageResult<Vec<ContactSubmission>> {
        Ok(self.records.read().await.clone())
    }
}
