//! # Gateway API
//!
//! - [`client`]: the [`ApiClient`] and response decoding
//! - [`auth`]: login and session refresh
//! - [`subscriptions`]: the caller's subscription list

pub mod auth;
pub mod client;
pub mod subscriptions;

pub use client::ApiClient;
