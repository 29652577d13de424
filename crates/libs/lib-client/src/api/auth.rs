//! # Session Endpoints
//!
//! Login and session refresh.

use shared::{LoginRequest, SessionResponse};

use super::client::{decode, ApiClient};
use crate::error::Result;

/// Login with email and password.
#[tracing::instrument(skip(client, password))]
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<SessionResponse> {
    tracing::info!("Attempting login");
    let start = std::time::Instant::now();

    let request = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };

    let response = client
        .client
        .post(client.url("/api/auth/login"))
        .json(&request)
        .send()
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Login network error"))?;

    let session = decode::<SessionResponse>(response).await?;
    tracing::info!(
        duration_ms = start.elapsed().as_millis(),
        expires_at = %session.expires_at,
        "Login successful"
    );
    Ok(session)
}

/// Trade a session token for a fresh one.
///
/// Outside the refresh window the same token comes back with
/// `refreshed: Some(false)`.
pub async fn refresh_session(client: &ApiClient, session_token: &str) -> Result<SessionResponse> {
    let response = client
        .client
        .post(client.url("/api/auth/refresh"))
        .bearer_auth(session_token)
        .send()
        .await?;

    let session = decode::<SessionResponse>(response).await?;
    tracing::debug!(refreshed = ?session.refreshed, expires_at = %session.expires_at, "Session refresh");
    Ok(session)
}
