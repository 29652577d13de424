//! # Middleware
//!
//! Axum middleware for the session gate, request stamping, logging, and
//! response normalization.
//!
//! ## Modules
//!
//! - **[`mw_auth`]**: Session gate (bearer session token → [`lib_auth::Claims`])
//! - **[`mw_req_stamp`]**: Request ID stamping
//! - **[`mw_res_map`]**: Uniform `{ message }` bodies for framework errors
//! - **[`mw_logging`]**: Request/response logging

// region: --- Modules
pub mod mw_auth;
pub mod mw_logging;
pub mod mw_req_stamp;
pub mod mw_res_map;
// endregion: --- Modules

// region: --- Re-exports
pub use mw_auth::{require_session, SessionToken};
pub use mw_logging::log_requests;
pub use mw_req_stamp::{stamp_req, RequestStamp};
pub use mw_res_map::map_res;
// endregion: --- Re-exports
