//! # Challenge Handlers
//!
//! `/api/challenges[/...]` is a pass-through onto the backend's
//! `/challenges[/...]` namespace: suffix segments and the query string are kept
//! verbatim, and POST bodies travel untouched with their content type, so a
//! multipart challenge form keeps its attachments byte-for-byte.
//!
//! Paths with `.` or `..` segments are refused so the backend never resolves
//! them outside `/challenges`. Linking a subscription to a challenge is the one
//! route with further local checks.

use axum::{
    body::Bytes,
    extract::{Extension, State},
    http::{header::CONTENT_TYPE, HeaderMap, Method, Uri},
};
use lib_auth::Claims;
use lib_core::{AppError, Result};
use shared::LinkSubscriptionRequest;
use tracing::{debug, info, instrument, warn};

use crate::extract::ValidJson;
use crate::services::paths::{has_dot_segment, rewrite_prefix};
use crate::services::{BackendClient, ProxyResponse};

const INBOUND_PREFIX: &str = "/api/challenges";
const BACKEND_PREFIX: &str = "/challenges";

/// Forward any challenge request.
///
/// **Route**: `GET|POST /api/challenges[/...]`
#[instrument(skip_all, fields(method = %method, path = %uri.path()))]
pub async fn forward(
    State(backend): State<BackendClient>,
    Extension(claims): Extension<Claims>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<ProxyResponse> {
    let path = rewrite_prefix(&uri, INBOUND_PREFIX, BACKEND_PREFIX)
        .ok_or_else(|| AppError::NotFound("Route not found".to_string()))?;

    if has_dot_segment(uri.path()) {
        warn!("[CHALLENGES] Refused dot segment in {}", uri.path());
        return Err(AppError::ValidationFailed("Invalid challenge path".to_string()));
    }

    debug!("[CHALLENGES] {} {} -> {}", method, uri, path);

    if method == Method::GET {
        return backend.send_empty(method, &claims.access_token, &path).await;
    }

    let content_type = headers.get(CONTENT_TYPE).cloned();
    backend
        .send_raw(method, &claims.access_token, &path, content_type, body)
        .await
}

/// Link a purchased subscription to a challenge.
///
/// **Route**: `POST /api/challenges/link-subscription`
///
/// Both `challengeId` and `subscriptionId` are required; if either is missing
/// the answer is 400 and the backend is not called.
#[instrument(skip_all, fields(user_id = %claims.sub))]
pub async fn link_subscription(
    State(backend): State<BackendClient>,
    Extension(claims): Extension<Claims>,
    ValidJson(req): ValidJson<LinkSubscriptionRequest>,
) -> Result<ProxyResponse> {
    let (Some(challenge_id), Some(subscription_id)) = (req.challenge_id, req.subscription_id) else {
        warn!("[CHALLENGES] Link request missing an identifier");
        return Err(AppError::ValidationFailed(
            "Both challengeId and subscriptionId are required".to_string(),
        ));
    };

    info!("[CHALLENGES] Linking subscription {} to challenge {}", subscription_id, challenge_id);

    let body = LinkSubscriptionRequest {
        challenge_id: Some(challenge_id),
        subscription_id: Some(subscription_id),
    };
    backend
        .send_json(
            Method::POST,
            Some(&claims.access_token),
            "/challenges/link-subscription",
            &body,
        )
        .await
}
