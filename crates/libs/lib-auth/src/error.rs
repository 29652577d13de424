//! # Authentication Errors

use thiserror::Error;

/// Failures of the session gate.
///
/// The first three are authentication failures (401), the next two are
/// authorization failures (403).
#[derive(Debug, Error, PartialEq)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Session expired")]
    Expired,

    #[error("Invalid session token: {0}")]
    InvalidToken(String),

    #[error("Admin role required")]
    NotAdmin,

    #[error("Scoped verifiers cannot perform this action")]
    ScopedVerifier,

    #[error("Failed to encode session token: {0}")]
    Encoding(String),
}

impl AuthError {
    /// Whether this is an authorization (403) rather than authentication (401) failure.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, AuthError::NotAdmin | AuthError::ScopedVerifier)
    }
}
