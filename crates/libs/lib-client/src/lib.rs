//! # Gateway Client Library
//!
//! Client-side half of the platform: talks to the gateway and keeps the
//! caller's subscription state for feature gating.
//!
//! ## Structure
//!
//! - **[`api`]**: [`ApiClient`], a reqwest client for the gateway's session and
//!   subscription endpoints
//! - **[`service`]**: [`SubscriptionSource`], the seam the tracker fetches through
//! - **[`subscriptions`]**: the subscription state machine, the access
//!   predicates, and [`SubscriptionTracker`], which drives the state machine
//!   from session changes and explicit refreshes
//! - **[`error`]**: [`ClientError`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lib_client::{ApiClient, SubscriptionTracker};
//! use shared::SubscriptionType;
//!
//! # async fn example() -> Result<(), lib_client::ClientError> {
//! let api = ApiClient::new("http://127.0.0.1:3000")?;
//! let session = api.login("trader@ivrex.io", "hunter22").await?;
//!
//! let tracker = SubscriptionTracker::new(api);
//! if let Some(fetch) = tracker.set_session(Some(session.token)) {
//!     let _ = fetch.await;
//! }
//!
//! let can_copy_trade = tracker.state().has_access_to_service(SubscriptionType::CopyTrading);
//! # let _ = can_copy_trade;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod error;
pub mod service;
pub mod subscriptions;

pub use api::ApiClient;
pub use error::{ClientError, Result};
pub use service::SubscriptionSource;
pub use subscriptions::{
    active_subscriptions, has_access_to_service, has_active_subscription, FetchTicket, Phase, SubscriptionState,
    SubscriptionTracker,
};
