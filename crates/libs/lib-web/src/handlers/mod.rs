//! # HTTP Request Handlers
//!
//! One module per backend resource. Each handler:
//!
//! 1. receives the verified session from the gate (protected routes),
//! 2. runs its role check, if the route is elevated (403 on failure),
//! 3. validates required fields (400 on failure, no backend call),
//! 4. reshapes the payload for the backend,
//! 5. forwards it through [`crate::services::BackendClient`],
//! 6. returns the backend's status and JSON body unchanged, or its error
//!    normalized to `{ "message": ... }`.
//!
//! ## Handler Modules
//!
//! - **[`auth`]**: session endpoints
//!   - `POST /api/auth/login` - Exchange credentials for a session
//!   - `POST /api/auth/refresh` - Renew a session inside the refresh window
//!   - `GET /api/auth/session` - Current session
//!   - `POST /api/auth/logout` - End the session
//!
//! - **[`signup`]**: `POST /api/signup` (public)
//!
//! - **[`users`]**: admin user management
//!   - `GET /api/admin/users` - List users (admin)
//!   - `PATCH /api/admin/users/{id}` - Change role/permissions (full admin)
//!
//! - **[`challenges`]**: trading challenges
//!   - `GET|POST /api/challenges[/...]` - Pass-through to `/challenges[/...]`
//!   - `POST /api/challenges/link-subscription` - Link a subscription to a challenge
//!
//! - **[`subscriptions`]**: subscriptions
//!   - `GET /api/subscriptions` - Caller's subscriptions
//!   - `POST /api/subscriptions` - Purchase (multipart)
//!
//! - **[`signals`]**: trading signals
//!   - `GET /api/signals` - List signals
//!   - `POST /api/signals` - Create (admin)
//!   - `POST /api/signals/{id}/close` - Close (admin)
//!
//! ## Error Handling
//!
//! Handlers return `Result<T, AppError>`; see [`lib_core::error`] for the
//! status mapping.

use lib_core::AppError;

pub mod auth;
pub mod challenges;
pub mod signals;
pub mod signup;
pub mod subscriptions;
pub mod users;

#[cfg(test)]
mod tests;

/// Fallback for unmatched routes.
pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
