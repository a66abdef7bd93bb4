//! HTTP error mapping
//!
//! Every failure leaves the server as a JSON body. Validation problems carry
//! the aggregated message; storage and other internal failures are reported
//! generically so backend details never reach the caller.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use contact_intake_core::ContactError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON body of an error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request body failed validation or could not be parsed
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The request body exceeded the configured limit
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Any failure the caller cannot fix
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        match self {
            ApiError::Validation(message) => ErrorBody {
                error: "Validation failed".to_string(),
                message: Some(message.clone()),
            },
            ApiError::PayloadTooLarge(message) => ErrorBody {
                error: "Payload too large".to_string(),
                message: Some(message.clone()),
            },
            ApiError::Internal => ErrorBody {
                error: "Internal server error".to_string(),
                message: None,
            },
        }
    }
}

impl From<ContactError> for ApiError {
    fn from(err: ContactError) -> Self {
        match err {
            ContactError::Validation(report) => ApiError::Validation(report.to_string()),
            // Already logged with backend context by the intake path.
            ContactError::Storage(_) => ApiError::Internal,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(rejection.body_text())
        } else {
            ApiError::Validation(rejection.body_text())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contact_intake_core::{StorageError, ValidationFinding, ValidationReport};

    #[test]
    fn test_validation_error_response() {
        let report = ValidationReport::new(vec![ValidationFinding::new(
            "TOO_SMALL",
            "Name must be at least 2 characters",
            "name",
        )]);
        let error = ApiError::from(ContactError::from(report));

        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            error.body(),
            ErrorBody {
                error: "Validation failed".to_string(),
                message: Some(
                    "Validation error: Name must be at least 2 characters at \"name\"".to_string()
                ),
            }
        );
    }

    #[test]
    fn test_storage_error_hides_detail() {
        let error = ApiError::from(ContactError::from(StorageError::unavailable(
            "postgres://admin:secret@db",
        )));

        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = serde_json::to_value(error.body()).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Internal server error" }));
    }
}
