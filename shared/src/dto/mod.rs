//! # Data Transfer Objects (DTOs)
//!
//! Structures exchanged between browser clients, the gateway and the backend.
//!
//! ## Module Organization
//!
//! - [`auth`] - Login, session and user DTOs
//! - [`subscription`] - Subscription records and the enumerations behind tier gating
//! - [`signal`] - Signal creation payloads
//!
//! ## Error Shape
//!
//! Every error the gateway emits has the same body:
//!
//! ```text
//! HTTP/1.1 404 Not Found
//! Content-Type: application/json
//!
//! { "message": "Not found" }
//! ```

pub mod auth;
pub mod signal;
pub mod subscription;

pub use auth::*;
pub use signal::*;
pub use subscription::*;
