//! # Subscription DTOs
//!
//! Subscription records as returned by the backend, plus the two enumerations
//! the gateway and clients gate features on.
//!
//! ```text
//! {
//!   "id": "sub_1",
//!   "type": "ivrex_pro",
//!   "status": "active",
//!   "price": 199.0,
//!   "expiresAt": "2026-01-01T00:00:00Z",
//!   "createdAt": "2025-01-01T00:00:00Z"
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::{deserialize_id, deserialize_number};

/// Service tier a subscription grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionType {
    TradingSignals,
    CopyTrading,
    AdvancedAnalytics,
    PersonalCoaching,
    IvrexPro,
    SharesChallenge,
}

impl SubscriptionType {
    /// Every tier, in catalog order.
    pub const ALL: [SubscriptionType; 6] = [
        SubscriptionType::TradingSignals,
        SubscriptionType::CopyTrading,
        SubscriptionType::AdvancedAnalytics,
        SubscriptionType::PersonalCoaching,
        SubscriptionType::IvrexPro,
        SubscriptionType::SharesChallenge,
    ];

    /// Backend enum string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionType::TradingSignals => "trading_signals",
            SubscriptionType::CopyTrading => "copy_trading",
            SubscriptionType::AdvancedAnalytics => "advanced_analytics",
            SubscriptionType::PersonalCoaching => "personal_coaching",
            SubscriptionType::IvrexPro => "ivrex_pro",
            SubscriptionType::SharesChallenge => "shares_challenge",
        }
    }
}

impl fmt::Display for SubscriptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubscriptionType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown subscription type: {}", s))
    }
}

/// Lifecycle status of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Pending,
    Active,
    Expired,
    Cancelled,
    PaymentFailed,
}

/// A subscription owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub subscription_type: SubscriptionType,
    pub status: SubscriptionStatus,
    #[serde(deserialize_with = "deserialize_number")]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }
}

/// Body of `POST /api/challenges/link-subscription`.
///
/// Both identifiers are optional at the type level so a missing one can be
/// reported as a 400 naming both fields instead of a generic parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSubscriptionRequest {
    #[serde(default, deserialize_with = "crate::utils::deserialize_opt_id")]
    pub challenge_id: Option<String>,
    #[serde(default, deserialize_with = "crate::utils::deserialize_opt_id")]
    pub subscription_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_wire_format() {
        let json = r#"{
            "id": 7,
            "type": "payment_failed_is_not_a_type",
            "status": "active",
            "price": 10,
            "createdAt": "2025-01-01T00:00:00Z"
        }"#;
        assert!(serde_json::from_str::<Subscription>(json).is_err());

        let json = r#"{
            "id": 7,
            "type": "copy_trading",
            "status": "payment_failed",
            "price": "49.5",
            "createdAt": "2025-01-01T00:00:00Z"
        }"#;
        let sub: Subscription = serde_json::from_str(json).unwrap();
        assert_eq!(sub.id, "7");
        assert_eq!(sub.subscription_type, SubscriptionType::CopyTrading);
        assert_eq!(sub.status, SubscriptionStatus::PaymentFailed);
        assert_eq!(sub.price, 49.5);
        assert!(sub.expires_at.is_none());
        assert!(!sub.is_active());
    }

    #[test]
    fn test_type_strings_match_serde() {
        for t in SubscriptionType::ALL {
            let encoded = serde_json::to_value(t).unwrap();
            assert_eq!(encoded, serde_json::Value::String(t.as_str().to_string()));
            assert_eq!(t.as_str().parse::<SubscriptionType>().unwrap(), t);
        }
    }
}
