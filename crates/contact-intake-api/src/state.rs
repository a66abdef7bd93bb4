//! Shared router state

use contact_intake_core::{ContactIntake, ContactStorage, MemoryStorage, StorageResult};
use contact_intake_storage::SledStorage;
use std::sync::Arc;
use std::time::Instant;

use crate::config::{ServerConfig, StorageBackend};

/// State handed to every route
#[derive(Clone)]
pub struct AppState {
    pub intake: ContactIntake,
    /// Start time for uptime calculation
    pub start_time: Instant,
}

impl AppState {
    pub fn new(storage: Arc<dyn ContactStorage>) -> Self {
        Self {
            intake: ContactIntake::new(storage),
            start_time: Instant::now(),
        }
    }
}

/// Build the storage backend named by the configuration
pub fn build_storage(config: &ServerConfig) -> StorageResult<Arc<dyn ContactStorage>> {
    match config.storage {
        StorageBackend::Memory => Ok(Arc::new(MemoryStorage::new())),
        StorageBackend::Sled => Ok(Arc::new(SledStorage::open(&config.data_dir)?)),
    }
}
