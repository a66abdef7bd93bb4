//! Contact Intake API
//!
//! HTTP surface for the contact intake service, built on axum.
//!
//! ## Endpoints
//!
//! - `POST /api/contact`: validate and store a submission (201, 400, 500)
//! - `GET /api/contact`: list stored submissions (200, 500)
//! - `GET /health`: service and storage health
//!
//! ## Running
//!
//! ```bash
//! contact-intake-server --port 5000 --storage sled --data-dir ./data/contacts
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;

pub use cli::ServerCli;
pub use config::{ConfigError, LogFormat, ServerConfig, StorageBackend};
pub use error::{ApiError, ErrorBody};
pub use routes::{create_router, HealthResponse, HealthStatus};
pub use server::run;
pub use state::{build_storage, AppState};
