//! # Session Handlers
//!
//! HTTP endpoints for the gateway session lifecycle.
//!
//! ## Overview
//!
//! - Login exchanges credentials with the backend and wraps the backend
//!   access token in a short-lived session token.
//! - Refresh re-issues the session token when it is inside the refresh window.
//! - Session echoes the current session.
//! - Logout is stateless: the client discards its token.
//!
//! ## Example
//!
//! ```bash
//! curl -X POST http://localhost:3000/api/auth/login \
//!   -H 'Content-Type: application/json' \
//!   -d '{"email":"alice@example.com","password":"hunter22"}'
//! ```

use axum::{
    extract::{Extension, State},
    http::Method,
    Json,
};
use lib_auth::{encode_claims, encode_session, Claims};
use lib_core::{AppError, Config, Result};
use lib_utils::{format_time, minutes_until, now_utc, validate_not_empty};
use shared::{BackendLoginResponse, LoginRequest, MessageResponse, SessionResponse};
use tracing::{debug, info, instrument, warn};

use crate::extract::ValidJson;
use crate::middleware::SessionToken;
use crate::server::AppState;

/// Login handler - exchanges credentials for a session token.
///
/// **Route**: `POST /api/auth/login`
///
/// # Returns
///
/// * `200` - `SessionResponse` with the session token, its expiry and the user
/// * `400` - email or password missing
/// * backend status - the backend rejected the credentials (message passed through)
#[instrument(skip_all, fields(email = %req.email))]
pub async fn login(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> Result<Json<SessionResponse>> {
    info!("[LOGIN] Login attempt");

    validate_not_empty(&req.email, "email").map_err(AppError::ValidationFailed)?;
    validate_not_empty(&req.password, "password").map_err(AppError::ValidationFailed)?;

    let login: BackendLoginResponse = state
        .backend
        .fetch_json(Method::POST, None, "/auth/login", &req)
        .await
        .inspect_err(|e| warn!("[LOGIN] Backend refused login: {}", e))?;

    let (token, claims) = encode_session(
        &login.user,
        &login.access_token,
        &state.config.session_secret,
        state.config.session_max_age(),
    )?;

    info!(
        "[LOGIN] Session issued for {} (role: {}, expires: {})",
        claims.email,
        claims.role.as_str(),
        format_time(claims.expires_at())
    );

    Ok(Json(SessionResponse {
        token,
        expires_at: claims.expires_at(),
        user: claims.user(),
        refreshed: None,
    }))
}

/// Refresh handler - renews the session inside the refresh window.
///
/// **Route**: `POST /api/auth/refresh`
///
/// Outside the window the current token is returned with `refreshed: false`.
#[instrument(skip_all, fields(user_id = %claims.sub))]
pub async fn refresh(
    State(config): State<Config>,
    Extension(claims): Extension<Claims>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Result<Json<SessionResponse>> {
    let now = now_utc();

    if !claims.needs_refresh(now, config.session_refresh_window()) {
        debug!(
            "[REFRESH] {}m left, not yet inside the refresh window",
            minutes_until(claims.expires_at(), now)
        );
        return Ok(Json(SessionResponse {
            token,
            expires_at: claims.expires_at(),
            user: claims.user(),
            refreshed: Some(false),
        }));
    }

    let renewed = claims.refreshed(now, config.session_max_age());
    let token = encode_claims(&renewed, &config.session_secret)?;

    info!("[REFRESH] Session renewed until {}", format_time(renewed.expires_at()));

    Ok(Json(SessionResponse {
        token,
        expires_at: renewed.expires_at(),
        user: renewed.user(),
        refreshed: Some(true),
    }))
}

/// Current session.
///
/// **Route**: `GET /api/auth/session`
pub async fn session(
    Extension(claims): Extension<Claims>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Json<SessionResponse> {
    Json(SessionResponse {
        token,
        expires_at: claims.expires_at(),
        user: claims.user(),
        refreshed: None,
    })
}

/// Logout handler.
///
/// **Route**: `POST /api/auth/logout`
pub async fn logout(Extension(claims): Extension<Claims>) -> Json<MessageResponse> {
    info!("[LOGOUT] Session ended for {}", claims.email);
    Json(MessageResponse {
        message: "Logged out".to_string(),
    })
}
