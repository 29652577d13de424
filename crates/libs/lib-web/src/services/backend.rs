//! # Backend Client
//!
//! The single place the gateway talks to the platform backend.
//!
//! Every call:
//! 1. targets `{BACKEND_URL}{path}` (paths already rewritten by the handler),
//! 2. carries `Authorization: Bearer <backend access token>` when a session is present,
//! 3. preserves the body encoding it is given (JSON, raw bytes with the original
//!    content type, or a multipart form),
//! 4. comes back as a [`ProxyResponse`] on success (the body checked to be JSON
//!    but kept byte-for-byte, so key order and number spelling survive), or as
//!    [`AppError::Upstream`] carrying the backend's status and message.
//!
//! Transport errors and unreadable success bodies become [`AppError::Internal`];
//! their detail is logged and never returned to the caller.

use axum::{
    body::Bytes,
    http::{header::CONTENT_TYPE, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};
use lib_core::error::{AppError, Result, GENERIC_UPSTREAM_MESSAGE};
use reqwest::{multipart::Form, Client, RequestBuilder};
use serde::{
    de::{DeserializeOwned, IgnoredAny},
    Serialize,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

/// Backend answer to a successful forwarded call.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    /// Raw JSON as the backend sent it; `None` for an empty body (e.g. 204)
    pub body: Option<Bytes>,
}

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        let Some(body) = self.body else {
            return self.status.into_response();
        };
        let content_type = self
            .content_type
            .unwrap_or_else(|| HeaderValue::from_static("application/json"));
        (self.status, [(CONTENT_TYPE, content_type)], body).into_response()
    }
}

/// HTTP client bound to the backend base URL.
#[derive(Clone, Debug)]
pub struct BackendClient {
    client: Client,
    base_url: Arc<str>,
}

impl BackendClient {
    /// Create a client for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build backend HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        })
    }

    /// Absolute URL for a backend path (which must start with `/`).
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, token: Option<&str>, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Forward a body-less request (GET list/detail/filter, action POSTs).
    pub async fn send_empty(&self, method: Method, token: &str, path: &str) -> Result<ProxyResponse> {
        self.execute(self.request(method, Some(token), path)).await
    }

    /// Forward a JSON body.
    pub async fn send_json<T: Serialize + ?Sized>(
        &self,
        method: Method,
        token: Option<&str>,
        path: &str,
        body: &T,
    ) -> Result<ProxyResponse> {
        self.execute(self.request(method, token, path).json(body)).await
    }

    /// Forward a body untouched, with its original content type.
    ///
    /// Multipart bodies keep their boundary and attachments byte-for-byte.
    pub async fn send_raw(
        &self,
        method: Method,
        token: &str,
        path: &str,
        content_type: Option<HeaderValue>,
        body: Bytes,
    ) -> Result<ProxyResponse> {
        let mut builder = self.request(method, Some(token), path);
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        if !body.is_empty() {
            builder = builder.body(body);
        }
        self.execute(builder).await
    }

    /// Forward a rebuilt multipart form.
    pub async fn send_multipart(&self, method: Method, token: &str, path: &str, form: Form) -> Result<ProxyResponse> {
        self.execute(self.request(method, Some(token), path).multipart(form)).await
    }

    /// Forward a JSON body and decode the success body into `R`.
    pub async fn fetch_json<T, R>(&self, method: Method, token: Option<&str>, path: &str, body: &T) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.send_json(method, token, path, body).await?;
        let body = response
            .body
            .ok_or_else(|| AppError::Internal(format!("Backend sent an empty body for {}", path)))?;
        serde_json::from_slice(&body).map_err(|e| AppError::Internal(format!("Unexpected backend payload for {}: {}", path, e)))
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<ProxyResponse> {
        let start = Instant::now();
        let request = builder
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build backend request: {}", e)))?;
        let method = request.method().clone();
        let path = request.url().path().to_string();

        debug!("[BACKEND] {} {}", method, path);

        let response = self.client.execute(request).await.map_err(|e| {
            error!("[BACKEND] {} {} failed: {}", method, path, e);
            AppError::Internal(format!("Backend request failed: {}", e))
        })?;

        let status = StatusCode::from_u16(response.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
        let content_type = response.headers().get(CONTENT_TYPE).cloned();
        let bytes = response.bytes().await.map_err(|e| {
            error!("[BACKEND] {} {} body read failed: {}", method, path, e);
            AppError::Internal(format!("Failed to read backend response: {}", e))
        })?;

        debug!(
            "[BACKEND] {} {} -> {} ({}ms, {} bytes)",
            method,
            path,
            status.as_u16(),
            start.elapsed().as_millis(),
            bytes.len()
        );

        if !status.is_success() {
            let message = upstream_message(&bytes);
            warn!("[BACKEND] {} {} rejected with {}: {}", method, path, status.as_u16(), message);
            return Err(AppError::Upstream { status, message });
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(ProxyResponse {
                status,
                content_type: None,
                body: None,
            });
        }

        serde_json::from_slice::<IgnoredAny>(&bytes).map_err(|e| {
            error!("[BACKEND] {} {} returned malformed JSON: {}", method, path, e);
            AppError::Internal(format!("Malformed backend JSON: {}", e))
        })?;

        Ok(ProxyResponse {
            status,
            content_type,
            body: Some(bytes),
        })
    }
}

/// Pull a human-readable message out of a backend error body.
///
/// Looks at `message` then `error`; a list of messages is joined. Anything
/// else (no body, not JSON, blank) yields the generic message.
pub fn upstream_message(bytes: &[u8]) -> String {
    let Ok(value) = serde_json::from_slice::<Value>(bytes) else {
        return GENERIC_UPSTREAM_MESSAGE.to_string();
    };

    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(key))
        .find_map(|field| match field {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Array(items) => {
                let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
                (!parts.is_empty()).then(|| parts.join(", "))
            }
            _ => None,
        })
        .unwrap_or_else(|| GENERIC_UPSTREAM_MESSAGE.to_string())
}
