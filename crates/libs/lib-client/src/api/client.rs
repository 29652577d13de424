//! # API Client
//!
//! HTTP client for the gateway.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{ErrorResponse, SessionResponse, Subscription};
use std::time::Duration;

use crate::error::{ClientError, Result};
use crate::service::SubscriptionSource;

/// Per-request timeout, so a stalled gateway never hangs the UI.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the gateway.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the gateway at `base_url` (e.g. `http://127.0.0.1:3000`).
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Exchange credentials for a session.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionResponse> {
        super::auth::login(self, email, password).await
    }

    /// Renew a session that is inside its refresh window.
    pub async fn refresh_session(&self, session_token: &str) -> Result<SessionResponse> {
        super::auth::refresh_session(self, session_token).await
    }
}

#[async_trait]
impl SubscriptionSource for ApiClient {
    async fn fetch_subscriptions(&self, session_token: &str) -> Result<Vec<Subscription>> {
        super::subscriptions::fetch_subscriptions(self, session_token).await
    }
}

/// Decode a success body, or turn an error body into [`ClientError::Api`].
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()));
    }

    let message = response
        .json::<ErrorResponse>()
        .await
        .map(|body| body.message)
        .unwrap_or_else(|_| status.canonical_reason().unwrap_or("Request failed").to_string());

    tracing::warn!(status = status.as_u16(), error = %message, "Gateway request failed");
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
