//! # Subscription Handlers
//!
//! - `GET /api/subscriptions` returns the caller's own subscriptions.
//! - `POST /api/subscriptions` buys one. The multipart form is reshaped by
//!   [`crate::services::forms`] before it is forwarded.

use axum::{
    extract::{Extension, Multipart, State},
    http::Method,
};
use lib_auth::Claims;
use lib_core::Result;
use tracing::{info, instrument};

use crate::server::AppState;
use crate::services::forms::{into_reqwest_form, read_multipart, reshape_subscription_form};
use crate::services::{BackendClient, ProxyResponse};

/// Caller's subscriptions.
///
/// **Route**: `GET /api/subscriptions`
#[instrument(skip_all, fields(user_id = %claims.sub))]
pub async fn list_mine(
    State(backend): State<BackendClient>,
    Extension(claims): Extension<Claims>,
) -> Result<ProxyResponse> {
    backend
        .send_empty(Method::GET, &claims.access_token, "/subscriptions/me")
        .await
}

/// Purchase a subscription.
///
/// **Route**: `POST /api/subscriptions`
///
/// # Returns
///
/// * backend status and body on success
/// * `400` - service missing or unknown, price missing/non-numeric/negative
#[instrument(skip_all, fields(user_id = %claims.sub))]
pub async fn create(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    multipart: Multipart,
) -> Result<ProxyResponse> {
    let parts = read_multipart(multipart).await?;
    let parts = reshape_subscription_form(parts, &state.catalog)?;

    info!(
        "[SUBSCRIPTIONS] {} purchasing {} ({} form parts)",
        claims.email,
        parts.first().and_then(|p| p.text_value()).unwrap_or_default(),
        parts.len()
    );

    let form = into_reqwest_form(parts)?;
    state
        .backend
        .send_multipart(Method::POST, &claims.access_token, "/subscriptions", form)
        .await
}
