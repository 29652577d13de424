//! # Services Layer
//!
//! Everything between a handler and the platform backend.
//!
//! ```text
//! Handlers (HTTP) → Services (reshape + forward) → Platform backend
//! ```
//!
//! ## Module Organization
//!
//! - [`backend`] - [`BackendClient`]: one forwarded call per request, bearer
//!   token attached, backend errors normalized into `AppError`
//! - [`paths`] - Inbound → backend path rewriting
//! - [`forms`] - Multipart reshaping for subscription purchases
//!
//! ## Error Handling
//!
//! All services return `Result<T, AppError>`. Backend rejections become
//! `AppError::Upstream` with the backend's status and message; transport
//! failures and unreadable bodies become `AppError::Internal`.
//!
//! No retries, no caching: each call is a single best-effort forward.

pub mod backend;
pub mod forms;
pub mod paths;

pub use backend::{BackendClient, ProxyResponse};
