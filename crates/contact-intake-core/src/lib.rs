//! Contact Intake Core
//!
//! Domain model, submission validation and the storage contract for the
//! contact intake service.
//!
//! ## Architecture
//!
//! 1. **Model** (`model`): the persisted [`ContactSubmission`] and the
//!    validated [`NewContactSubmission`] input.
//!
//! 2. **Validation** (`validation`): a typed field schema that checks an
//!    untyped JSON payload and reports every violated field at once.
//!
//! 3. **Storage** (`storage`): the [`ContactStorage`] trait consumed by the
//!    intake path, plus an in-memory implementation.
//!
//! 4. **Intake** (`intake`): orchestrates validation and persistence for a
//!    single request.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use contact_intake_core::{ContactIntake, MemoryStorage};
//!
//! #[tokio::main]
//! async fn main() {
//!     let intake = ContactIntake::new(Arc::new(MemoryStorage::new()));
//!
//!     let payload = serde_json::json!({
//!         "name": "Al",
//!         "email": "al@x.com",
//!         "message": "Hello there friend",
//!     });
//!
//!     let record = intake.submit(&payload).await.unwrap();
//!     println!("stored {} at {}", record.id, record.created_at);
//! }
//! ```

pub mod clock;
pub mod error;
pub mod intake;
pub mod model;
pub mod storage;
pub mod validation;

pub use clock::MonotonicClock;
pub use error::{ContactError, Result};
pub use intake::ContactIntake;
pub use model::{ContactSubmission, NewContactSubmission};
pub use storage::{memory::MemoryStorage, ContactStorage, StorageError, StorageResult};
pub use validation::{
    validate_submission, ContactSchema, FieldConstraint, FieldRules, ValidationFinding,
    ValidationReport,
};
