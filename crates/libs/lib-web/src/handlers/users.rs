//! # Admin User Handlers
//!
//! - `GET /api/admin/users` needs role `admin`.
//! - `PATCH /api/admin/users/{id}` changes roles and permissions, so it needs a
//!   full admin: role `admin` with no verification responsibilities. A scoped
//!   verifier gets 403.
//!
//! Role checks run before the body is looked at, so a caller without the role
//! gets 403 even when the body is malformed.

use axum::{
    extract::{Extension, Path, State},
    http::{Method, Uri},
};
use lib_auth::Claims;
use lib_core::{AppError, Result};
use serde_json::Value;
use tracing::{info, instrument};

use crate::extract::ValidJson;
use crate::services::paths::{is_safe_segment, with_query};
use crate::services::{BackendClient, ProxyResponse};

/// List users, query string passed through.
///
/// **Route**: `GET /api/admin/users`
#[instrument(skip_all, fields(user_id = %claims.sub))]
pub async fn list_users(
    State(backend): State<BackendClient>,
    Extension(claims): Extension<Claims>,
    uri: Uri,
) -> Result<ProxyResponse> {
    claims.ensure_admin()?;

    let path = with_query("/users", uri.query());
    backend.send_empty(Method::GET, &claims.access_token, &path).await
}

/// Update a user's role or permissions.
///
/// **Route**: `PATCH /api/admin/users/{id}`
#[instrument(skip_all, fields(user_id = %claims.sub, target = %id))]
pub async fn update_user(
    State(backend): State<BackendClient>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    body: Result<ValidJson<Value>>,
) -> Result<ProxyResponse> {
    claims.ensure_full_admin()?;
    let ValidJson(body) = body?;

    if !is_safe_segment(&id) {
        return Err(AppError::ValidationFailed("Invalid user id".to_string()));
    }
    if !body.is_object() {
        return Err(AppError::ValidationFailed("Expected a JSON object".to_string()));
    }

    info!("[ADMIN] {} updating user {}", claims.email, id);
    backend
        .send_json(Method::PATCH, Some(&claims.access_token), &format!("/users/{}", id), &body)
        .await
}
