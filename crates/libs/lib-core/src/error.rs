//! # Centralized Error Handling
//!
//! This module defines the gateway-wide error type [`AppError`]. Every handler
//! returns it, and its [`IntoResponse`] impl renders the one error shape
//! clients ever see:
//!
//! ```text
//! { "message": "..." }
//! ```
//!
//! ## Error Categories
//!
//! 1. **Detected locally** (no backend call was made)
//!    - [`AuthenticationMissing`](AppError::AuthenticationMissing) → 401
//!    - [`AuthorizationDenied`](AppError::AuthorizationDenied) → 403
//!    - [`ValidationFailed`](AppError::ValidationFailed) → 400
//!    - [`NotFound`](AppError::NotFound) → 404 (unknown gateway route)
//!
//! 2. **Reported by the backend**
//!    - [`Upstream`](AppError::Upstream) → backend status, backend message
//!
//! 3. **Unexpected** (network failure, malformed JSON, bad config)
//!    - [`Internal`](AppError::Internal) / [`Config`](AppError::Config) → 500 with a
//!      generic message; the detail is logged, never returned
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn require_symbol(symbol: &str) -> Result<&str> {
//!     if symbol.trim().is_empty() {
//!         return Err(AppError::ValidationFailed("symbol is required".to_string()));
//!     }
//!     Ok(symbol)
//! }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lib_auth::AuthError;
use shared::ErrorResponse;
use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Message returned when the backend error body has none.
pub const GENERIC_UPSTREAM_MESSAGE: &str = "Request failed";

/// Message returned for every 500.
pub const GENERIC_INTERNAL_MESSAGE: &str = "Internal server error";

/// Gateway-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing, malformed or expired session token.
    ///
    /// **HTTP Status**: 401 Unauthorized
    #[error("Authentication missing: {0}")]
    AuthenticationMissing(String),

    /// Authenticated, but the role check failed.
    ///
    /// **HTTP Status**: 403 Forbidden
    #[error("Authorization denied: {0}")]
    AuthorizationDenied(String),

    /// Required fields missing or invalid.
    ///
    /// **HTTP Status**: 400 Bad Request
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// The backend answered with a non-success status.
    ///
    /// **HTTP Status**: mirrored from the backend
    #[error("Upstream error ({status}): {message}")]
    Upstream { status: StatusCode, message: String },

    /// No such gateway route.
    ///
    /// **HTTP Status**: 404 Not Found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error during startup.
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unexpected failure.
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::AuthenticationMissing(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationDenied(_) => StatusCode::FORBIDDEN,
            AppError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream { status, .. } => *status,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to the caller.
    pub fn user_message(&self) -> String {
        match self {
            AppError::AuthenticationMissing(_) => "Unauthorized".to_string(),
            AppError::AuthorizationDenied(msg) => msg.clone(),
            AppError::ValidationFailed(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Upstream { message, .. } => message.clone(),
            AppError::Config(_) | AppError::Internal(_) => GENERIC_INTERNAL_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::Config(_) | AppError::Internal(_) => tracing::error!("Server error: {}", self),
            AppError::Upstream { .. } => tracing::warn!("Backend rejected request: {}", self),
            _ => tracing::debug!("Client error: {}", self),
        }

        let body = Json(ErrorResponse {
            message: self.user_message(),
        });

        (status, body).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            e if e.is_forbidden() => AppError::AuthorizationDenied("Forbidden".to_string()),
            AuthError::Encoding(msg) => AppError::Internal(msg),
            other => AppError::AuthenticationMissing(other.to_string()),
        }
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert `serde_json::Error` to `AppError`.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let (status, body) = body_of(AppError::Internal("connection reset by peer".to_string())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "message": "Internal server error" }));
    }

    #[tokio::test]
    async fn test_upstream_status_is_mirrored() {
        let err = AppError::Upstream {
            status: StatusCode::NOT_FOUND,
            message: "Not found".to_string(),
        };
        let (status, body) = body_of(err).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({ "message": "Not found" }));
    }

    #[test]
    fn test_auth_errors_split_401_and_403() {
        assert_eq!(AppError::from(AuthError::Expired).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::from(AuthError::MissingToken).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::from(AuthError::ScopedVerifier).status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::from(AuthError::NotAdmin).status_code(), StatusCode::FORBIDDEN);
    }
}
