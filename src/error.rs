//! Error types for the composite gateway

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Main application error type
///
/// Every downstream call site picks exactly one variant; the HTTP mapping
/// lives only in the `IntoResponse` impl below.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Unauthenticated(String),

    #[error("Upstream rejected the request with status {status}")]
    UpstreamRejected { status: StatusCode, detail: Value },

    #[error("{0} service timeout")]
    UpstreamTimeout(&'static str),

    #[error("{0} service unavailable")]
    UpstreamUnavailable(&'static str),

    #[error("Upstream contract violation: {0}")]
    UpstreamContractViolation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Human readable detail, or the backend's own structured detail
    #[schema(value_type = Object)]
    pub detail: Value,
    /// Stable error code
    pub error: String,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::UpstreamRejected { status, .. } => *status,
            AppError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::UpstreamContractViolation(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthenticated(_) => "UNAUTHENTICATED",
            AppError::UpstreamRejected { .. } => "UPSTREAM_REJECTED",
            AppError::UpstreamTimeout(_) => "UPSTREAM_TIMEOUT",
            AppError::UpstreamUnavailable(_) => "UPSTREAM_UNAVAILABLE",
            AppError::UpstreamContractViolation(_) => "UPSTREAM_CONTRACT_VIOLATION",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let display = self.to_string();

        let detail = match self {
            AppError::UpstreamRejected { detail, .. } => detail,
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {}", msg);
                Value::String(msg)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                Value::String("Internal server error".to_string())
            }
            AppError::UpstreamContractViolation(msg) => {
                tracing::warn!("Upstream contract violation: {}", msg);
                Value::String(format!("Upstream contract violation: {}", msg))
            }
            AppError::UpstreamTimeout(_) | AppError::UpstreamUnavailable(_) => {
                Value::String(display)
            }
            AppError::Unauthenticated(msg)
            | AppError::NotFound(msg)
            | AppError::Forbidden(msg)
            | AppError::Validation(msg)
            | AppError::BadRequest(msg) => Value::String(msg),
        };

        let body = Json(ErrorResponse {
            detail,
            error: code.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => AppError::Validation(e.body_text()),
            other => AppError::BadRequest(other.body_text()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_internal_error_hides_cause() {
        let (status, body) = body_json(AppError::Internal("socket exploded".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "Internal server error");
        assert_eq!(body["error"], "INTERNAL_ERROR");
    }

    #[tokio::test]
    async fn test_rejected_relays_status_and_detail() {
        let error = AppError::UpstreamRejected {
            status: StatusCode::CONFLICT,
            detail: Value::String("Email already registered".to_string()),
        };
        let (status, body) = body_json(error).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["detail"], "Email already registered");
    }

    #[tokio::test]
    async fn test_timeout_and_unavailable_statuses() {
        let (status, body) = body_json(AppError::UpstreamTimeout("Search")).await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body["detail"], "Search service timeout");

        let (status, _) = body_json(AppError::UpstreamUnavailable("Auth")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
