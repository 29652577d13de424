//! # Extractors
//!
//! [`ValidJson`] behaves like [`axum::Json`] but turns every rejection into
//! [`AppError::ValidationFailed`], so a malformed or incomplete body gets the
//! same 400 `{ "message": ... }` answer as any other validation failure.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use lib_core::AppError;
use tracing::debug;

/// JSON body extractor with validation-style rejections.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ValidJson(value)),
            Err(rejection) => {
                debug!("[EXTRACT] JSON body rejected: {}", rejection.body_text());
                let message = match rejection {
                    JsonRejection::MissingJsonContentType(_) => {
                        "Expected a JSON body (Content-Type: application/json)".to_string()
                    }
                    JsonRejection::JsonDataError(e) => format!("Invalid request body: {}", e.body_text()),
                    JsonRejection::JsonSyntaxError(_) => "Malformed JSON body".to_string(),
                    other => other.body_text(),
                };
                Err(AppError::ValidationFailed(message))
            }
        }
    }
}
