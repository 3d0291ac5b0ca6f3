//! Unified error handling for the dashboard API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::models::ValidationError;
use crate::persistence::StorageError;
use crate::services::{SessionError, SettingsError};
use crate::store::StoreError;

/// Application-level error type for the dashboard API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input rejected before any state changed.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Key-value store I/O or serialization failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Settings save exhausted its retries without finishing.
    #[error("Timed out: {0}")]
    Timeout(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound(err.to_string()),
            StoreError::Validation(e) => Self::Validation(e),
        }
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Validation(e) => Self::Validation(e),
            SessionError::Storage(e) => Self::Storage(e),
        }
    }
}

impl From<SettingsError> for AppError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::Validation(e) => Self::Validation(e),
            SettingsError::Storage(e) => Self::Storage(e),
            SettingsError::Timeout { .. } => Self::Timeout(err.to_string()),
        }
    }
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(self, Self::Storage(_) | Self::Timeout(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Dashboard request error"
            );
        }

        let status = self.status();

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Storage(_) => "Internal server error".to_string(),
            Self::Timeout(_) => "Request timed out".to_string(),
            Self::NotFound(_) | Self::Validation(_) => self.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use merchify_core::EmailError;

    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("order 'ORD-9' not found".to_string());
        assert_eq!(err.to_string(), "Not found: order 'ORD-9' not found");

        let err = AppError::Validation(ValidationError::Required("name"));
        assert_eq!(err.to_string(), "Validation failed: name is required");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::NotFound("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(ValidationError::Email(EmailError::Empty).into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(StorageError::Poisoned.into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(SettingsError::Timeout { attempts: 3 }.into()),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[test]
    fn test_store_errors_map_by_kind() {
        let not_found: AppError = StoreError::not_found("product", "7").into();
        assert!(matches!(not_found, AppError::NotFound(ref m) if m == "product '7' not found"));

        let invalid: AppError = StoreError::Validation(ValidationError::Required("content")).into();
        assert!(matches!(invalid, AppError::Validation(_)));
    }
}
