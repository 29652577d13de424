//! # Authentication Library
//!
//! Session tokens and the access checks the gateway applies to them.
//!
//! - [`token`]: issue, verify and refresh session tokens
//! - [`access`]: role and responsibility checks on verified claims

pub mod access;
pub mod error;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use token::{decode_session, encode_claims, encode_session, Claims};
