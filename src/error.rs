//! Error types for the VCF Collector service.
//!
//! This module defines custom error types using `thiserror` for precise error
//! handling, plus the mapping from those errors onto HTTP responses.
//!
//! Validation and precondition failures carry their own status codes; anything
//! unexpected is collapsed into a generic 500 so internals never leak past the
//! handler boundary. Note that a duplicate phone submission is *not* an error:
//! it is a normal business outcome reported with HTTP 200 and `success: false`
//! (see `ledger::SubmitOutcome`).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::domain::ValidationError;

/// Errors surfaced by ledger and admin operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// A required field is missing or malformed (HTTP 400).
    #[error("{0}")]
    InvalidInput(String),

    /// Export was requested before the collection reached the target (HTTP 400).
    #[error("Need {target} contacts to download. Currently have: {count}")]
    TargetNotReached { count: usize, target: usize },

    /// Admin password did not match the configured secret (HTTP 401).
    #[error("Invalid password")]
    Unauthorized,

    /// Unexpected internal fault, e.g. serialization failure (HTTP 500).
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::InvalidInput(_) | AppError::TargetNotReached { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Internal details are logged where they occur, not echoed to clients.
        let message = match &self {
            AppError::Internal(_) => "Server error. Please try again.".to_string(),
            other => other.to_string(),
        };

        (status, Json(json!({ "success": false, "message": message }))).into_response()
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Other(String),
}

/// Convenience type alias for Results with AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::InvalidInput("Name is required".to_string());
        assert_eq!(err.to_string(), "Name is required");

        let err = AppError::TargetNotReached {
            count: 42,
            target: 200,
        };
        assert_eq!(
            err.to_string(),
            "Need 200 contacts to download. Currently have: 42"
        );

        let err = AppError::Unauthorized;
        assert_eq!(err.to_string(), "Invalid password");

        let err = ConfigError::InvalidValue {
            var: "PORT".to_string(),
            reason: "not a number".to_string(),
        };
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_validation_error_maps_to_invalid_input() {
        let err: AppError = ValidationError::EmptyName.into();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_status_codes() {
        let resp = AppError::Unauthorized.into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = AppError::InvalidInput("missing".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = AppError::TargetNotReached {
            count: 0,
            target: 200,
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = AppError::Internal(anyhow::anyhow!("boom")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
