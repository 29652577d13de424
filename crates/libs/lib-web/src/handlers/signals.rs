//! # Signal Handlers
//!
//! Any session may read signals; creating and closing them is admin-only.

use axum::{
    extract::{Extension, Path, State},
    http::{Method, Uri},
};
use lib_auth::Claims;
use lib_core::{AppError, Result};
use lib_utils::validate_not_empty;
use shared::{Signal, SignalRequest};
use tracing::{info, instrument};

use crate::extract::ValidJson;
use crate::services::paths::{is_safe_segment, with_query};
use crate::services::{BackendClient, ProxyResponse};

/// List signals, query string passed through.
///
/// **Route**: `GET /api/signals`
pub async fn list_signals(
    State(backend): State<BackendClient>,
    Extension(claims): Extension<Claims>,
    uri: Uri,
) -> Result<ProxyResponse> {
    let path = with_query("/signals", uri.query());
    backend.send_empty(Method::GET, &claims.access_token, &path).await
}

/// Create a signal.
///
/// **Route**: `POST /api/signals`
///
/// Prices may arrive as text; the side is lower-cased for the backend.
#[instrument(skip_all, fields(user_id = %claims.sub))]
pub async fn create_signal(
    State(backend): State<BackendClient>,
    Extension(claims): Extension<Claims>,
    req: Result<ValidJson<SignalRequest>>,
) -> Result<ProxyResponse> {
    claims.ensure_admin()?;
    let ValidJson(req) = req?;

    let signal = Signal::from(req);
    validate_not_empty(&signal.symbol, "symbol").map_err(AppError::ValidationFailed)?;

    info!("[SIGNALS] {} {} @ {}", signal.signal_type, signal.symbol, signal.entry_price);
    backend
        .send_json(Method::POST, Some(&claims.access_token), "/signals", &signal)
        .await
}

/// Close a signal.
///
/// **Route**: `POST /api/signals/{id}/close`
#[instrument(skip_all, fields(user_id = %claims.sub, signal = %id))]
pub async fn close_signal(
    State(backend): State<BackendClient>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<ProxyResponse> {
    claims.ensure_admin()?;

    if !is_safe_segment(&id) {
        return Err(AppError::ValidationFailed("Invalid signal id".to_string()));
    }

    info!("[SIGNALS] Closing signal {}", id);
    backend
        .send_empty(Method::POST, &claims.access_token, &format!("/signals/{}/close", id))
        .await
}
