//! Durable storage for contact submissions
//!
//! Records are stored as JSON in a sled tree keyed by a big-endian sequence
//! number from [`sled::Db::generate_id`], so a key-order scan returns them in
//! insertion order.

use async_trait::async_trait;
use contact_intake_core::{
    ContactStorage, ContactSubmission, MonotonicClock, NewContactSubmission, StorageError,
    StorageResult,
};
use std::path::{Path, PathBuf};
use uuid::Uuid;

const SUBMISSIONS_TREE: &str = "contact_submissions";

/// sled-backed [`ContactStorage`]
pub struct SledStorage {
    db: sled::Db,
    submissions: sled::Tree,
    clock: MonotonicClock,
    path: Option<PathBuf>,
}

impl SledStorage {
    /// Open (or create) a database at `path`
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        let db = sled::open(path).map_err(|e| {
            StorageError::unavailable(format!("cannot open {}: {}", path.display(), e))
        })?;

        tracing::info!(path = %path.display(), "Opened contact submission store");
        Self::from_db(db, Some(path.to_path_buf()))
    }

    /// Open a throwaway database that is removed on drop
    pub fn temporary() -> StorageResult<Self> {
        let db = sled::Config::new()
            .temporary(true)
            .open()
            .map_err(|e| StorageError::unavailable(e.to_string()))?;
        Self::from_db(db, None)
    }

    fn from_db(db: sled::Db, path: Option<PathBuf>) -> StorageResult<Self> {
        let submissions = db
            .open_tree(SUBMISSIONS_TREE)
            .map_err(|e| StorageError::backend("open_tree", e))?;

        let clock = match submissions
            .last()
            .map_err(|e| StorageError::backend("last", e))?
        {
            Some((_, bytes)) => {
                let last: ContactSubmission = serde_json::from_slice(&bytes)?;
                MonotonicClock::starting_after(last.created_at)
            }
            None => MonotonicClock::new(),
        };

        Ok(Self {
            db,
            submissions,
            clock,
            path,
        })
    }

    /// Location on disk, if not temporary
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.submissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }

    /// Flush pending writes to disk
    pub async fn flush(&self) -> StorageResult<()> {
        self.db
            .flush_async()
            .await
            .map_err(|e| StorageError::backend("flush", e))?;
        Ok(())
    }
}

#[async_trait]
impl ContactStorage for SledStorage {
    fn backend(&self) -> &'static str {
        "sled"
    }

    async fn create_contact_submission(
        &self,
        input: NewContactSubmission,
    ) -> StorageResult<ContactSubmission> {
        let (sequence, created_at) = self
            .clock
            .stamp(|| self.db.generate_id())
            .map_err(|e| StorageError::backend("generate_id", e))?;

        let record = input.into_record(Uuid::new_v4(), created_at);
        let bytes = serde_json::to_vec(&record)?;

        self.submissions
            .insert(sequence.to_be_bytes(), bytes)
            .map_err(|e| StorageError::backend("insert", e))?;
        self.flush().await?;

        tracing::debug!(id = %record.id, sequence, "Persisted contact submission");
        Ok(record)
    }

    async fn get_contact_submissions(&self) -> StorageResult<Vec<ContactSubmission>> {
        self.submissions
            .iter()
            .values()
            .map(|entry| {
                let bytes = entry.map_err(|e| StorageError::backend("scan", e))?;
                Ok(serde_json::from_slice(&bytes)?)
            })
            .collect()
    }

    async fn health_check(&self) -> StorageResult<()> {
        self.submissions
            .first()
            .map(|_| ())
            .map_err(|e| StorageError::unavailable(e.to_string()))
    }
}
