//! Route definitions for the contact intake API
//!
//! - POST /api/contact - Validate and store a submission
//! - GET /api/contact - List stored submissions
//! - GET /health - Health check endpoint

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use contact_intake_core::ContactSubmission;
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::middleware::request_logging_middleware;
use crate::state::AppState;

/// Create the router with all routes
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    let router = Router::new()
        .route("/api/contact", post(create_contact).get(list_contacts))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http());

    let router = if config.cors_allow_any_origin {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}

/// POST /api/contact - Store a contact submission
///
/// Unparseable bodies are reported as validation failures, the same as
/// bodies that parse but break the schema.
pub async fn create_contact(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ContactSubmission>), ApiError> {
    let Json(payload) = payload?;
    let record = state.intake.submit(&payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/contact - List all contact submissions in insertion order
pub async fn list_contacts(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContactSubmission>>, ApiError> {
    Ok(Json(state.intake.list().await?))
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub storage: StorageHealth,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageHealth {
    pub backend: String,
    pub healthy: bool,
}

/// GET /health - Health check endpoint
///
/// Returns 503 when the storage backend cannot serve requests. The failure
/// is logged; its detail is not part of the response.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let storage = state.intake.storage();
    let check = storage.health_check().await;

    if let Err(err) = &check {
        tracing::warn!(backend = storage.backend(), error = %err, "Storage health check failed");
    }

    let (status, code) = if check.is_ok() {
        (HealthStatus::Healthy, StatusCode::OK)
    } else {
        (HealthStatus::Unhealthy, StatusCode::SERVICE_UNAVAILABLE)
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        storage: StorageHealth {
            backend: storage.backend().to_string(),
            healthy: check.is_ok(),
        },
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    (code, Json(response))
}
