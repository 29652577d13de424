//! # Session Token Management
//!
//! A session token is an HS256 JWT signed with the gateway's session secret.
//! It carries the caller's identity and the backend access token obtained at
//! login, so proxied calls never need a server-side session store.
//!
//! Lifetime is short (15 minutes by default). Inside the refresh window before
//! expiry a client may trade its token for a fresh one via [`Claims::refreshed`].

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::{Role, SessionUser};

use crate::error::AuthError;

/// JWT claims of a gateway session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (backend user ID)
    pub sub: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub verification_responsibilities: Vec<String>,
    /// Backend bearer token forwarded on proxied calls
    pub access_token: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Build claims for `user` issued at `now`.
    pub fn new(user: &SessionUser, access_token: &str, now: DateTime<Utc>, max_age: Duration) -> Self {
        Self {
            sub: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            verification_responsibilities: user.verification_responsibilities.clone(),
            access_token: access_token.to_string(),
            exp: (now + max_age).timestamp(),
            iat: now.timestamp(),
        }
    }

    pub fn user(&self) -> SessionUser {
        SessionUser {
            id: self.sub.clone(),
            email: self.email.clone(),
            role: self.role,
            verification_responsibilities: self.verification_responsibilities.clone(),
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0).single().unwrap_or_else(Utc::now)
    }

    /// True once `now` is within `window` of expiry.
    pub fn needs_refresh(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.expires_at() - now <= window
    }

    /// Same identity, re-issued at `now` with a full lifetime.
    pub fn refreshed(&self, now: DateTime<Utc>, max_age: Duration) -> Self {
        Self {
            exp: (now + max_age).timestamp(),
            iat: now.timestamp(),
            ..self.clone()
        }
    }
}

/// Issue a session token for `user`, valid for `max_age` from now.
pub fn encode_session(
    user: &SessionUser,
    access_token: &str,
    secret: &str,
    max_age: Duration,
) -> Result<(String, Claims), AuthError> {
    let claims = Claims::new(user, access_token, lib_utils::now_utc(), max_age);
    let token = encode_claims(&claims, secret)?;
    Ok((token, claims))
}

/// Sign prepared claims.
pub fn encode_claims(claims: &Claims, secret: &str) -> Result<String, AuthError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::Encoding(e.to_string()))
}

/// Verify signature and expiry of a session token.
pub fn decode_session(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => AuthError::InvalidToken(e.to_string()),
        })
}
