//! # Signup Handler
//!
//! Public registration endpoint. The form is validated here, the browser-only
//! fields are dropped, and the rest is forwarded to `POST /auth/register`.

use axum::{extract::State, http::Method};
use lib_core::{AppError, Result};
use lib_utils::{missing_fields, validate_email, validate_min_length};
use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

use crate::extract::ValidJson;
use crate::services::{BackendClient, ProxyResponse};

const MIN_PASSWORD_LENGTH: usize = 8;

/// Fields the registration form sends that the backend does not accept.
const STRIPPED_FIELDS: &[&str] = &["confirmPassword", "acceptTerms"];

fn text<'a>(fields: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    fields.get(name).and_then(Value::as_str)
}

/// Check the registration form and strip it down to what the backend takes.
pub fn prepare_registration(body: Value) -> Result<Value> {
    let Value::Object(mut fields) = body else {
        return Err(AppError::ValidationFailed("Expected a JSON object".to_string()));
    };

    let missing = missing_fields(&[("email", text(&fields, "email")), ("password", text(&fields, "password"))]);
    if !missing.is_empty() {
        return Err(AppError::ValidationFailed(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    validate_email(text(&fields, "email").unwrap_or_default().trim()).map_err(AppError::ValidationFailed)?;

    if let Some(confirm) = fields.get("confirmPassword") {
        if confirm.as_str() != text(&fields, "password") {
            return Err(AppError::ValidationFailed("Passwords do not match".to_string()));
        }
    }

    validate_min_length(text(&fields, "password").unwrap_or_default(), MIN_PASSWORD_LENGTH, "password")
        .map_err(AppError::ValidationFailed)?;

    for name in STRIPPED_FIELDS {
        fields.remove(*name);
    }

    Ok(Value::Object(fields))
}

/// Signup handler.
///
/// **Route**: `POST /api/signup`
///
/// # Returns
///
/// * backend status and body on success (usually `201`)
/// * `400` - missing email/password, bad email, mismatched or short password
#[instrument(skip_all)]
pub async fn signup(State(backend): State<BackendClient>, ValidJson(body): ValidJson<Value>) -> Result<ProxyResponse> {
    let registration = prepare_registration(body).inspect_err(|e| warn!("[SIGNUP] Rejected: {}", e))?;

    let response = backend
        .send_json(Method::POST, None, "/auth/register", &registration)
        .await?;

    info!("[SIGNUP] Registration forwarded ({})", response.status.as_u16());
    Ok(response)
}
