//! # Authentication Data Transfer Objects
//!
//! Request and response structures for the session endpoints.
//!
//! ## Endpoints Using These DTOs
//!
//! - `POST /api/auth/login` - [`LoginRequest`] -> [`SessionResponse`]
//! - `POST /api/auth/refresh` - (bearer) -> [`SessionResponse`]
//! - `GET /api/auth/session` - (bearer) -> [`SessionResponse`]
//! - `POST /api/auth/logout` - (bearer) -> [`MessageResponse`]
//!
//! The backend answers its own `POST /auth/login` with [`BackendLoginResponse`];
//! the gateway wraps that access token into a short-lived session token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::deserialize_id;

/// Login request body (email + password).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Platform role carried by a session.
///
/// Roles the gateway does not know about deserialize to [`Role::Unknown`] and
/// never pass an admin check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Unknown => "unknown",
        }
    }
}

/// User identity attached to a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub email: String,
    pub role: Role,
    /// Verification areas delegated to a scoped admin.
    ///
    /// An admin with an empty list is a full admin.
    #[serde(default)]
    pub verification_responsibilities: Vec<String>,
}

/// Backend answer to a credential exchange.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendLoginResponse {
    #[serde(alias = "access_token", alias = "token")]
    pub access_token: String,
    pub user: SessionUser,
}

/// Session issued by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Bearer token for subsequent gateway calls
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: SessionUser,
    /// Set on refresh responses only
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub refreshed: Option<bool>,
}

/// Uniform error body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Plain acknowledgement body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
