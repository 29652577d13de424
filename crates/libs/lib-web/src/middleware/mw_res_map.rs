//! # Response Mapping Middleware
//!
//! Handlers already answer errors as `{ "message": ... }`. Responses the
//! framework generates itself (405 method not allowed, 413 body too large,
//! extractor rejections) arrive as plain text or empty; this middleware
//! rewrites those into the same JSON shape so clients only ever parse one
//! error format.

use axum::{
    extract::Request,
    http::header::CONTENT_TYPE,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use shared::ErrorResponse;
use tracing::error;

fn is_json(res: &Response) -> bool {
    res.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"))
}

/// Response mapping middleware.
pub async fn map_res(req: Request, next: Next) -> Response {
    let res = next.run(req).await;
    let status = res.status();

    if status.is_server_error() {
        error!("[RESPONSE] Server error: {}", status);
    }

    if !(status.is_client_error() || status.is_server_error()) || is_json(&res) {
        return res;
    }

    let message = status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string();

    let (mut parts, _) = res.into_parts();
    parts.headers.remove(CONTENT_TYPE);
    parts.headers.remove(axum::http::header::CONTENT_LENGTH);

    let mut mapped = (status, Json(ErrorResponse { message })).into_response();
    for (name, value) in parts.headers.iter() {
        mapped.headers_mut().entry(name).or_insert(value.clone());
    }
    mapped
}
