//! # Session Gate
//!
//! Axum middleware that resolves the caller's session before any protected
//! handler runs.
//!
//! The caller sends the gateway session token as `Authorization: Bearer <token>`.
//! On success the verified [`Claims`] (which carry the backend access token)
//! and the raw [`SessionToken`] are injected into the request extensions.
//! On failure the request ends here with a 401 and no backend call is made.
//!
//! Handlers extract what they need:
//!
//! ```rust,ignore
//! use axum::extract::Extension;
//! use lib_auth::Claims;
//!
//! async fn protected_handler(Extension(claims): Extension<Claims>) -> String {
//!     format!("Hello, {}!", claims.email)
//! }
//! ```
//!
//! Role checks are not done here; elevated handlers call
//! [`Claims::ensure_admin`] or [`Claims::ensure_full_admin`] themselves.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use lib_auth::{decode_session, AuthError, Claims};
use lib_core::AppError;
use shared::token_prefix;
use tracing::{debug, warn};

use crate::server::AppState;

/// The raw bearer token the session was resolved from.
#[derive(Clone, Debug)]
pub struct SessionToken(pub String);

/// Extract the bearer token from an `Authorization` header value.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingToken)?;
    let token = header
        .split_once(' ')
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim())
        .ok_or_else(|| AuthError::InvalidToken("expected a Bearer token".to_string()))?;

    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token)
}

/// Session gate middleware.
///
/// # Behavior
///
/// - **Valid session**: continues with `Claims` and `SessionToken` in extensions
/// - **Missing/invalid/expired session**: returns `401` with `{ "message": "Unauthorized" }`
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = req.headers().get(AUTHORIZATION).and_then(|h| h.to_str().ok());

    let token = bearer_token(header).map_err(|e| {
        warn!("[AUTH] {} on {}", e, req.uri().path());
        AppError::from(e)
    })?;

    let claims: Claims = decode_session(token, &state.config.session_secret).map_err(|e| {
        warn!("[AUTH] Session rejected ({}): {}", token_prefix(token), e);
        AppError::from(e)
    })?;

    debug!("[AUTH] Session for {} (id: {}, role: {})", claims.email, claims.sub, claims.role.as_str());

    let token = SessionToken(token.to_string());
    req.extensions_mut().insert(claims);
    req.extensions_mut().insert(token);

    Ok(next.run(req).await)
}
