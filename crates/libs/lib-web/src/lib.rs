//! # Web Library
//!
//! The gateway: HTTP handlers, middleware, the backend forwarder and server
//! setup.
//!
//! Every protected route runs behind the session gate
//! ([`middleware::require_session`]) and forwards to the platform backend
//! through [`services::BackendClient`], which attaches the backend bearer
//! token and normalizes backend errors into [`lib_core::AppError`].

pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod server;

pub use server::{create_router, start_server, AppState, ServerConfig};
