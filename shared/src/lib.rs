//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the gateway, its clients, and the
//! platform backend. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::auth`]**: Session, login and user DTOs
//!   - **[`dto::subscription`]**: Subscription tiers, statuses and records
//!   - **[`dto::signal`]**: Trading signal DTOs
//! - **[`utils`]**: Shared serde helpers and log-safe formatting
//!
//! ## Wire Format
//!
//! The backend speaks **camelCase** for users and subscriptions and
//! **snake_case** for signals. Each DTO declares its own `rename_all` so the
//! Rust field names stay snake_case either way. Enumerations crossing the
//! boundary serialize to the exact strings the backend expects
//! (`trading_signals`, `payment_failed`, ...).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shared::dto::subscription::{Subscription, SubscriptionType};
//!
//! let subscriptions: Vec<Subscription> = serde_json::from_str("[]").unwrap();
//! let pro = subscriptions
//!     .iter()
//!     .any(|s| s.subscription_type == SubscriptionType::IvrexPro && s.is_active());
//! ```

pub mod dto;
pub mod utils;

// Note: Wildcard re-exports are used here since shared is a DTO library
// where all exports are meant to be public API
pub use dto::*;
pub use utils::*;
