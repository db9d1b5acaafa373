//! Error types for the HTTP API.
//!
//! Every failure is rendered as a JSON error envelope:
//!
//! ```json
//! {"error": {"code": "not-found", "message": "patient p-1 not found"}}
//! ```
//!
//! # Error Mapping
//!
//! | Error | HTTP Status | Code |
//! |-------|-------------|------|
//! | `NotFound` | 404 | not-found |
//! | `ReferenceNotFound` | 404 | reference-not-found |
//! | `BadRequest` | 400 | bad-request |
//! | `Internal` | 500 | internal |
//!
//! Store-connectivity failures are not classified further; they surface as
//! 500s with the detail logged server-side but never leaked to the caller.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use molar_service::ServiceError;
use molar_store::StoreError;
use std::fmt;
use tracing::error;

/// The primary error type for API operations.
#[derive(Debug)]
pub enum ApiError {
    /// Entity not found (HTTP 404).
    NotFound {
        /// Kind of entity ("patient" or "record").
        kind: &'static str,
        /// The missing id.
        id: String,
    },

    /// Record creation referenced a missing patient (HTTP 404).
    ReferenceNotFound {
        /// The missing patient id.
        patient_id: String,
    },

    /// Malformed request (HTTP 400).
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    Internal {
        /// Error detail; logged, never sent to the caller.
        message: String,
    },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound { kind, id } => write!(f, "{kind} {id} not found"),
            ApiError::ReferenceNotFound { patient_id } => {
                write!(f, "referenced patient {patient_id} not found")
            }
            ApiError::BadRequest { message } => write!(f, "bad request: {message}"),
            ApiError::Internal { message } => write!(f, "internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::NotFound { kind, id } => (
                StatusCode::NOT_FOUND,
                "not-found",
                format!("{kind} {id} not found"),
            ),
            ApiError::ReferenceNotFound { patient_id } => (
                StatusCode::NOT_FOUND,
                "reference-not-found",
                format!("referenced patient {patient_id} not found"),
            ),
            ApiError::BadRequest { message } => {
                (StatusCode::BAD_REQUEST, "bad-request", message.clone())
            }
            ApiError::Internal { message } => {
                error!(detail = %message, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "internal server error".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "error": {
                "code": code,
                "message": message,
            }
        });
        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::ReferenceNotFound { patient_id } => {
                ApiError::ReferenceNotFound { patient_id }
            }
            ServiceError::RecordNotFound { id } => ApiError::NotFound {
                kind: "record",
                id: id.to_string(),
            },
            ServiceError::FieldTooLong(e) => ApiError::BadRequest {
                message: e.to_string(),
            },
            ServiceError::Store(e) => e.into(),
        }
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = ApiError::NotFound {
            kind: "patient",
            id: "p-1".to_string(),
        };
        assert_eq!(err.to_string(), "patient p-1 not found");
    }

    #[test]
    fn test_reference_not_found_display() {
        let err = ApiError::ReferenceNotFound {
            patient_id: "p-404".to_string(),
        };
        assert_eq!(err.to_string(), "referenced patient p-404 not found");
    }

    #[test]
    fn test_service_error_mapping() {
        let err = ApiError::from(ServiceError::ReferenceNotFound {
            patient_id: "p-404".to_string(),
        });
        assert!(matches!(err, ApiError::ReferenceNotFound { .. }));

        let err = ApiError::from(ServiceError::RecordNotFound { id: 9 });
        assert!(matches!(err, ApiError::NotFound { kind: "record", .. }));
    }

    #[test]
    fn test_store_error_maps_to_internal() {
        let err = ApiError::from(StoreError::internal("record", "disk full"));
        assert!(matches!(err, ApiError::Internal { .. }));
    }

    #[test]
    fn test_internal_error_does_not_leak_detail() {
        let response = ApiError::Internal {
            message: "secret connection string".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_status_codes() {
        let not_found = ApiError::NotFound {
            kind: "record",
            id: "1".to_string(),
        };
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let bad_request = ApiError::BadRequest {
            message: "nope".to_string(),
        };
        assert_eq!(bad_request.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
