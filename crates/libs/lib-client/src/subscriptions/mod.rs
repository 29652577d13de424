//! # Subscriptions
//!
//! - [`state`]: phases, fetch tickets and pure transitions
//! - [`access`]: tier predicates over a subscription list
//! - [`tracker`]: async driver with cancellation

pub mod access;
pub mod state;
pub mod tracker;

pub use access::{active_subscriptions, has_access_to_service, has_active_subscription};
pub use state::{FetchTicket, Phase, SubscriptionState};
pub use tracker::SubscriptionTracker;
