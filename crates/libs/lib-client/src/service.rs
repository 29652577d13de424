//! # Service Traits
//!
//! Traits for dependency injection, so the subscription tracker can be driven
//! by the real [`crate::ApiClient`] or by a test double.

use async_trait::async_trait;
use shared::Subscription;

use crate::error::Result;

/// Where the tracker gets the caller's subscription list from.
#[async_trait]
pub trait SubscriptionSource: Send + Sync {
    /// Fetch the subscriptions of the session identified by `session_token`.
    async fn fetch_subscriptions(&self, session_token: &str) -> Result<Vec<Subscription>>;
}
